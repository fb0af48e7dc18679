//! Human-readable renderings of a [`CuttingPlan`]: a plain-text report and an
//! SVG strip diagram of the cut across the material width.

use crate::types::CuttingPlan;
use std::fmt::{self, Write};

/// Renders the downloadable text report.
pub fn render_text(plan: &CuttingPlan) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(&mut out, "Roll cutting report")?;
    writeln!(&mut out, "===================")?;
    writeln!(&mut out)?;
    writeln!(&mut out, "Material width:     {} mm", plan.material_width)?;
    if plan.usable_width != plan.material_width {
        writeln!(&mut out, "Usable width:       {} mm", plan.usable_width)?;
    }
    writeln!(&mut out, "Material length:    {} m", plan.length)?;
    writeln!(&mut out)?;
    writeln!(
        &mut out,
        "Main width:         {} mm x {}",
        plan.main_width, plan.main_count
    )?;
    match plan.additional_width {
        Some(width) => writeln!(
            &mut out,
            "Secondary width:    {} mm x {}",
            width, plan.additional_count
        )?,
        None => writeln!(&mut out, "Secondary width:    none")?,
    }
    writeln!(&mut out, "Rolls per length:   {}", plan.rolls_per_length)?;
    writeln!(&mut out, "Waste:              {} mm", plan.waste)?;
    writeln!(&mut out, "Waste per side:     {} mm", plan.waste_per_side)?;
    writeln!(&mut out)?;
    writeln!(&mut out, "Total area:         {:.2} m2", plan.total_area)?;
    writeln!(&mut out, "Useful area:        {:.2} m2", plan.useful_area)?;
    writeln!(
        &mut out,
        "Waste area:         {:.2} m2 ({:.2}%)",
        plan.waste_area, plan.waste_percentage
    )?;

    if let Some(run) = &plan.run {
        writeln!(&mut out)?;
        writeln!(&mut out, "Rolls needed:       {}", run.rolls_needed)?;
        writeln!(&mut out, "Source rolls (runs): {}", run.material_length_needed)?;
        writeln!(&mut out, "Total length:       {} m", run.total_length)?;
        writeln!(&mut out, "Surplus stock:      {}", run.stock_rolls)?;
    }

    Ok(out)
}

/// Renders the cutting pattern as a strip diagram, one pixel per millimetre.
pub fn render_svg(plan: &CuttingPlan) -> Result<String, fmt::Error> {
    let mut svg = String::new();
    let margin = 20.0;
    let strip_height = 120.0;

    let material_width = f64::from(plan.material_width);
    let svg_width = material_width + (2.0 * margin);
    let svg_height = strip_height + (3.0 * margin);

    writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        svg_width, svg_height, svg_width, svg_height
    )?;
    writeln!(
        &mut svg,
        r##"  <rect width="100%" height="100%" fill="#f5f5f5"/>"##
    )?;

    // Material outline; anything not covered by a roll below shows as waste
    writeln!(
        &mut svg,
        r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#e57373" stroke="#333" stroke-width="2"/>"##,
        margin, margin, material_width, strip_height
    )?;

    let mut x = margin + plan.waste_per_side;
    let right_edge = margin + material_width + 1e-6;
    let main_rolls = std::iter::repeat(plan.main_width).take(plan.main_count as usize);
    let extra_rolls = plan
        .additional_width
        .into_iter()
        .take(plan.additional_count as usize);

    for (index, width) in main_rolls.chain(extra_rolls).enumerate() {
        // Plans arrive from clients too; draw only rolls that fit the material
        if !(width > 0.0 && x + width <= right_edge) {
            break;
        }
        let secondary = index as u32 >= plan.main_count;
        let (fill, stroke) = if secondary {
            ("#42A5F5", "#1565C0")
        } else {
            ("#4CAF50", "#2E7D32")
        };

        writeln!(
            &mut svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="1"/>"##,
            x, margin, width, strip_height, fill, stroke
        )?;
        writeln!(
            &mut svg,
            r##"  <text x="{}" y="{}" font-family="Arial" font-size="10" fill="#fff" text-anchor="middle">{}</text>"##,
            x + width / 2.0,
            margin + strip_height / 2.0 + 3.0,
            width
        )?;

        x += width;
    }

    writeln!(
        &mut svg,
        r##"  <text x="{}" y="{}" font-family="Arial" font-size="12" fill="#666">"##,
        margin,
        svg_height - margin + 5.0
    )?;
    writeln!(
        &mut svg,
        r#"    Rolls: {} | Waste: {} mm ({:.1}%)"#,
        plan.rolls_per_length, plan.waste, plan.waste_percentage
    )?;
    writeln!(&mut svg, r#"  </text>"#)?;

    writeln!(&mut svg, "</svg>")?;

    Ok(svg)
}
