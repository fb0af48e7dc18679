use super::*;

impl CuttingPlanner {
    /// Picks the catalog width that best fills what is left after the main rolls.
    /// Smallest leftover wins; equal leftovers go to the wider width.
    pub(super) fn find_secondary_width(&self, remainder: f64) -> Option<f64> {
        self.catalog
            .iter()
            .filter(|&width| width <= remainder)
            .min_by(|a, b| {
                (remainder - a)
                    .total_cmp(&(remainder - b))
                    .then_with(|| b.total_cmp(a))
            })
    }
}
