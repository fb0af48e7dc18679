use serde::{Deserialize, Serialize};

/// Input: What user provides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingRequest {
    /// Full width of the source roll in millimetres
    pub material_width: u32,
    /// Width left after trimming both edges; defaults to `material_width`
    #[serde(default)]
    pub usable_width: Option<u32>,
    /// Width of the finished rolls, must be in the catalog
    pub target_width: f64,
    /// Length of the source roll in metres
    pub length: f64,
    /// Number of finished rolls the order asks for
    #[serde(default)]
    pub rolls_needed: Option<u32>,
}

impl CuttingRequest {
    pub fn new(material_width: u32, target_width: f64, length: f64) -> Self {
        Self {
            material_width,
            usable_width: None,
            target_width,
            length,
            rolls_needed: None,
        }
    }

    pub fn with_usable_width(mut self, usable_width: u32) -> Self {
        self.usable_width = Some(usable_width);
        self
    }

    pub fn with_rolls_needed(mut self, rolls_needed: u32) -> Self {
        self.rolls_needed = Some(rolls_needed);
        self
    }
}

/// Production run figures, present when the request named a roll quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunPlan {
    pub rolls_needed: u32,
    /// How many source rolls have to be cut
    pub material_length_needed: u32,
    /// Finished rolls produced beyond `rolls_needed`
    pub stock_rolls: u64,
    /// Metres of source material consumed by all runs
    pub total_length: f64,
}

/// Output: What the planner returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingPlan {
    pub material_width: u32,
    pub usable_width: u32,
    pub length: f64,
    pub main_width: f64,
    pub main_count: u32,
    pub additional_width: Option<f64>,
    pub additional_count: u32,
    /// Leftover across the width, edge trim included
    pub waste: f64,
    pub waste_per_side: f64,
    pub total_area: f64,
    pub useful_area: f64,
    pub waste_area: f64,
    pub waste_percentage: f64,
    /// Finished rolls cut from one pass along the length
    pub rolls_per_length: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub run: Option<RunPlan>,
}

impl CuttingPlan {
    /// Width of the trimmed edges on both sides combined.
    pub fn edge_waste(&self) -> f64 {
        f64::from(self.material_width.saturating_sub(self.usable_width))
    }

    /// Width taken by finished rolls.
    pub fn used_width(&self) -> f64 {
        self.main_width * f64::from(self.main_count)
            + self.additional_width.unwrap_or(0.0) * f64::from(self.additional_count)
    }
}

/// Error type for planning
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    #[error("Material width must be between 500 and 910 mm")]
    OutOfRangeMaterialWidth,

    #[error("Usable width must be at least 500 mm and no wider than the material")]
    OutOfRangeUsableWidth,

    #[error("Material length must be between 30 and 1100 meters")]
    OutOfRangeLength,

    #[error("Selected width is not one of the allowed values")]
    InvalidTargetWidth,

    #[error("Number of rolls needed must be a positive whole number")]
    InvalidRollsNeeded,

    #[error("Please enter valid numeric values")]
    InvalidNumericInput,
}

pub type Result<T> = std::result::Result<T, PlannerError>;
