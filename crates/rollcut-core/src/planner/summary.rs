use super::*;

/// Areas in square metres, unrounded.
#[derive(Debug, Clone, Copy)]
pub(super) struct Areas {
    pub total: f64,
    pub useful: f64,
    pub waste: f64,
}

impl Areas {
    /// Widths in millimetres, length in metres.
    pub(super) fn new(material_width: f64, used_width: f64, waste: f64, length: f64) -> Self {
        Self {
            total: (material_width / 1000.0) * length,
            useful: (used_width / 1000.0) * length,
            waste: (waste / 1000.0) * length,
        }
    }

    /// Areas for a production run of `runs` source rolls.
    pub(super) fn scaled(self, runs: u32) -> Self {
        let factor = f64::from(runs);
        Self {
            total: self.total * factor,
            useful: self.useful * factor,
            waste: self.waste * factor,
        }
    }

    pub(super) fn waste_percentage(&self) -> f64 {
        if self.total > 0.0 {
            (self.waste / self.total) * 100.0
        } else {
            0.0
        }
    }
}

pub(super) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl CuttingPlanner {
    /// Works out how many source rolls cover the order and the surplus they leave.
    pub(super) fn plan_run(
        &self,
        rolls_needed: u32,
        main_count: u32,
        rolls_per_length: u32,
        length: f64,
    ) -> RunPlan {
        let basis = match self.run_basis {
            RunBasis::MainOnly => main_count,
            RunBasis::MainAndSecondary => rolls_per_length,
        };
        // The catalog guarantees at least one main roll per pass
        let runs = rolls_needed.div_ceil(basis.max(1));
        // runs * rolls_per_length may exceed u32::MAX
        let produced = u64::from(runs) * u64::from(rolls_per_length);

        RunPlan {
            rolls_needed,
            material_length_needed: runs,
            stock_rolls: produced - u64::from(rolls_needed),
            total_length: f64::from(runs) * length,
        }
    }
}
