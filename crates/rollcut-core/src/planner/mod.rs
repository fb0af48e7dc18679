use crate::catalog::AllowedWidths;
use crate::config::{PlannerConfig, RunBasis};
use crate::limits::*;
use crate::types::*;

mod secondary;
mod summary;

/// Splits a source roll into finished rolls of one main width plus at most
/// one secondary width taken from the catalog.
#[derive(Debug, Clone)]
pub struct CuttingPlanner {
    catalog: AllowedWidths,
    edge_trim: bool,
    run_basis: RunBasis,
}

impl Default for CuttingPlanner {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}

impl CuttingPlanner {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            catalog: config.catalog.resolve(),
            edge_trim: config.edge_trim,
            run_basis: config.run_basis,
        }
    }

    pub fn catalog(&self) -> &AllowedWidths {
        &self.catalog
    }

    pub fn edge_trim(&self) -> bool {
        self.edge_trim
    }

    pub fn run_basis(&self) -> RunBasis {
        self.run_basis
    }

    /// Same as [`CuttingPlanner::compute`] with the request given field by field.
    pub fn compute_with(
        &self,
        material_width: u32,
        usable_width: Option<u32>,
        target_width: f64,
        length: f64,
        rolls_needed: Option<u32>,
    ) -> Result<CuttingPlan> {
        self.compute(&CuttingRequest {
            material_width,
            usable_width,
            target_width,
            length,
            rolls_needed,
        })
    }

    /// Validates the request and computes the cutting plan.
    pub fn compute(&self, request: &CuttingRequest) -> Result<CuttingPlan> {
        let usable_width = self.validate(request)?;
        let usable = f64::from(usable_width);
        let target = request.target_width;

        let main_count = (usable / target).floor() as u32;
        let remainder = usable % target;
        let edge_waste = f64::from(request.material_width - usable_width);

        let (additional_width, additional_count, strip_waste) =
            match self.find_secondary_width(remainder) {
                Some(width) => (Some(width), 1, remainder - width),
                None => (None, 0, remainder),
            };
        let waste = strip_waste + edge_waste;

        // Trimmed edges are split evenly; untrimmed rolls spread the leftover instead
        let waste_per_side = if edge_waste > 0.0 {
            edge_waste / 2.0
        } else {
            waste / 2.0
        };

        let rolls_per_length = main_count + additional_count;
        let run = request
            .rolls_needed
            .map(|needed| self.plan_run(needed, main_count, rolls_per_length, request.length));

        let used_width = target * f64::from(main_count)
            + additional_width.unwrap_or(0.0) * f64::from(additional_count);
        let areas = summary::Areas::new(
            f64::from(request.material_width),
            used_width,
            waste,
            request.length,
        )
        .scaled(run.as_ref().map_or(1, |r| r.material_length_needed));

        Ok(CuttingPlan {
            material_width: request.material_width,
            usable_width,
            length: request.length,
            main_width: target,
            main_count,
            additional_width,
            additional_count,
            waste,
            waste_per_side,
            total_area: summary::round2(areas.total),
            useful_area: summary::round2(areas.useful),
            waste_area: summary::round2(areas.waste),
            waste_percentage: summary::round2(areas.waste_percentage()),
            rolls_per_length,
            run,
        })
    }

    /// Checks every input in a fixed order and returns the usable width.
    fn validate(&self, request: &CuttingRequest) -> Result<u32> {
        if !(MIN_MATERIAL_WIDTH..=MAX_MATERIAL_WIDTH).contains(&request.material_width) {
            return Err(PlannerError::OutOfRangeMaterialWidth);
        }

        let usable_width = match request.usable_width {
            Some(usable) if self.edge_trim => {
                if !(MIN_USABLE_WIDTH..=request.material_width).contains(&usable) {
                    return Err(PlannerError::OutOfRangeUsableWidth);
                }
                usable
            }
            _ => request.material_width,
        };

        if !(MIN_LENGTH..=MAX_LENGTH).contains(&request.length) {
            return Err(PlannerError::OutOfRangeLength);
        }

        if !self.catalog.contains(request.target_width) {
            return Err(PlannerError::InvalidTargetWidth);
        }

        if request.rolls_needed == Some(0) {
            return Err(PlannerError::InvalidRollsNeeded);
        }

        Ok(usable_width)
    }
}
