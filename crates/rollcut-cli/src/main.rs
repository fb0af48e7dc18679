use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use rollcut_core::{
    report, CuttingPlan, CuttingPlanner, CuttingRequest, PlannerConfig, RunBasis,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rollcut")]
#[command(about = "Roll Cutting Planner - Split source rolls into catalog widths with minimal waste", long_about = None)]
struct Cli {
    /// Planner config file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override how the number of runs is counted
    #[arg(long, global = true, value_enum)]
    run_basis: Option<RunBasisArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RunBasisArg {
    MainOnly,
    MainAndSecondary,
}

impl From<RunBasisArg> for RunBasis {
    fn from(arg: RunBasisArg) -> Self {
        match arg {
            RunBasisArg::MainOnly => RunBasis::MainOnly,
            RunBasisArg::MainAndSecondary => RunBasis::MainAndSecondary,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a cutting plan from command line values
    Calculate {
        /// Source roll width in mm
        #[arg(short, long)]
        material_width: u32,

        /// Width left after edge trimming in mm
        #[arg(short, long)]
        usable_width: Option<u32>,

        /// Finished roll width in mm
        #[arg(short, long)]
        target_width: f64,

        /// Source roll length in metres
        #[arg(short, long)]
        length: f64,

        /// Finished rolls to produce
        #[arg(short, long)]
        rolls_needed: Option<u32>,

        /// Output file for the plan (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for the text report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Calculate a cutting plan from a request file
    Run {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the plan (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the allowed roll widths
    Widths,

    /// Write a text report for a saved plan
    Report {
        /// Input plan file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate SVG visualization from a saved plan
    Generate {
        /// Input plan file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let planner = load_planner(cli.config.as_deref(), cli.run_basis)?;

    match cli.command {
        Commands::Calculate {
            material_width,
            usable_width,
            target_width,
            length,
            rolls_needed,
            output,
            report: report_path,
        } => {
            let request = CuttingRequest {
                material_width,
                usable_width,
                target_width,
                length,
                rolls_needed,
            };
            let plan = calculate_command(&planner, &request, output)?;
            if let Some(report_path) = report_path {
                std::fs::write(&report_path, report::render_text(&plan)?)?;
                println!(
                    "📝 Saved report to {}",
                    report_path.display().to_string().bright_white()
                );
            }
        }
        Commands::Run { input, output } => {
            println!("{}", "🔍 Loading request...".bright_blue());
            let request = read_request(&input)?;
            calculate_command(&planner, &request, output)?;
        }
        Commands::Widths => widths_command(&planner),
        Commands::Report { input, output } => {
            report_command(input, output)?;
        }
        Commands::Generate { input, output } => {
            generate_command(input, output)?;
        }
    }

    Ok(())
}

fn load_planner(config: Option<&Path>, run_basis: Option<RunBasisArg>) -> Result<CuttingPlanner> {
    let mut config = match config {
        Some(path) => PlannerConfig::from_path(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(basis) = run_basis {
        config = config.with_run_basis(basis.into());
    }
    Ok(CuttingPlanner::new(&config))
}

fn read_request(input: &Path) -> Result<CuttingRequest> {
    let content = std::fs::read_to_string(input)?;
    let request = match input.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };
    Ok(request)
}

fn calculate_command(
    planner: &CuttingPlanner,
    request: &CuttingRequest,
    output: Option<PathBuf>,
) -> Result<CuttingPlan> {
    println!(
        "  Material {} mm x {} m, target width {} mm",
        request.material_width.to_string().bright_white().bold(),
        request.length.to_string().bright_white().bold(),
        request.target_width.to_string().bright_white().bold()
    );
    println!();

    println!("{}", "🚀 Running calculation...".bright_blue());

    let plan = match planner.compute(request) {
        Ok(plan) => plan,
        Err(err) => {
            println!("{} {}", "❌".bright_red(), err.to_string().bright_red());
            return Err(err.into());
        }
    };

    println!();
    println!("{}", "✅ Calculation complete!".bright_green().bold());
    println!();

    print_plan(&plan);
    println!();

    let json = serde_json::to_string_pretty(&plan)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved plan to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(plan)
}

fn print_plan(plan: &CuttingPlan) {
    println!("{}", "📊 Results:".bright_yellow().bold());
    println!(
        "  Main rolls: {} x {} mm",
        plan.main_count.to_string().bright_white().bold(),
        plan.main_width
    );
    if let Some(width) = plan.additional_width {
        println!(
            "  Secondary roll: {} x {} mm",
            plan.additional_count.to_string().bright_cyan(),
            width
        );
    }
    println!(
        "  Waste: {} mm ({} mm per side)",
        plan.waste.to_string().bright_white(),
        plan.waste_per_side
    );
    println!(
        "  Area: {:.2} m2 total, {:.2} m2 useful, {:.2} m2 waste ({:.1}%)",
        plan.total_area, plan.useful_area, plan.waste_area, plan.waste_percentage
    );

    if let Some(run) = &plan.run {
        println!(
            "  Source rolls needed: {} ({} m)",
            run.material_length_needed.to_string().bright_white().bold(),
            run.total_length
        );
        println!(
            "  Surplus stock: {} rolls",
            run.stock_rolls.to_string().bright_green()
        );
    }
}

fn widths_command(planner: &CuttingPlanner) {
    println!("{}", "📏 Allowed roll widths (mm):".bright_yellow().bold());
    for width in planner.catalog().iter() {
        println!("  • {}", width.to_string().bright_white());
    }
    println!();
    println!(
        "  Edge trim: {}, run basis: {:?}",
        if planner.edge_trim() { "on" } else { "off" },
        planner.run_basis()
    );
}

fn read_plan(input: &Path) -> Result<CuttingPlan> {
    let content = std::fs::read_to_string(input)?;
    Ok(serde_json::from_str(&content)?)
}

fn report_command(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let plan = read_plan(&input)?;
    let text = report::render_text(&plan)?;

    match output {
        Some(path) => {
            std::fs::write(&path, text)?;
            println!(
                "{} Saved report to {}",
                "✅".bright_green(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn generate_command(input: PathBuf, output: PathBuf) -> Result<()> {
    println!("{}", "🔍 Loading plan...".bright_blue());
    let plan = read_plan(&input)?;

    println!("{}", "🎨 Generating SVG...".bright_blue());
    let svg = report::render_svg(&plan)?;

    std::fs::write(&output, svg)?;

    println!();
    println!(
        "{} Saved SVG to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}
