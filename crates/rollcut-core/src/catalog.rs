use crate::limits::{MIN_CATALOG_WIDTH, MIN_USABLE_WIDTH};
use serde::{Deserialize, Serialize};

const STANDARD_WIDTHS: [f64; 22] = [
    20.0, 25.0, 30.0, 32.5, 35.0, 40.0, 44.0, 50.0, 55.0, 60.0, 63.0, 70.0, 74.0, 80.0, 84.0,
    90.0, 94.0, 100.0, 104.0, 110.0, 120.0, 150.0,
];

const WHOLE_MM_WIDTHS: [f64; 22] = [
    20.0, 25.0, 30.0, 35.0, 40.0, 44.0, 50.0, 55.0, 60.0, 63.0, 64.0, 70.0, 74.0, 80.0, 84.0,
    90.0, 94.0, 100.0, 104.0, 110.0, 120.0, 150.0,
];

/// Legal finished-roll widths, ascending and without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct AllowedWidths {
    widths: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Width catalog must not be empty")]
    Empty,

    #[error("Catalog width {0} must be between 1 and 500 mm")]
    OutOfRange(f64),

    #[error("Catalog width {0} is listed more than once")]
    Duplicate(f64),
}

impl AllowedWidths {
    /// Builds a catalog from widths given in any order.
    pub fn new(mut widths: Vec<f64>) -> Result<Self, CatalogError> {
        if widths.is_empty() {
            return Err(CatalogError::Empty);
        }

        // Every width has to fit at least once into the narrowest usable roll
        if let Some(&bad) = widths
            .iter()
            .find(|w| !(MIN_CATALOG_WIDTH..=f64::from(MIN_USABLE_WIDTH)).contains(*w))
        {
            return Err(CatalogError::OutOfRange(bad));
        }

        widths.sort_by(f64::total_cmp);
        if let Some(pair) = widths.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(CatalogError::Duplicate(pair[0]));
        }

        Ok(Self { widths })
    }

    /// Catalog including the fractional 32.5 mm width.
    pub fn standard() -> Self {
        Self {
            widths: STANDARD_WIDTHS.to_vec(),
        }
    }

    /// Catalog of whole-millimetre widths, with 64 mm in place of 32.5 mm.
    pub fn whole_mm() -> Self {
        Self {
            widths: WHOLE_MM_WIDTHS.to_vec(),
        }
    }

    /// Exact membership test, no nearest-fit.
    pub fn contains(&self, width: f64) -> bool {
        self.widths.iter().any(|&w| w == width)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.widths.iter().copied()
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

impl Default for AllowedWidths {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<f64>> for AllowedWidths {
    type Error = CatalogError;

    fn try_from(widths: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(widths)
    }
}

impl From<AllowedWidths> for Vec<f64> {
    fn from(catalog: AllowedWidths) -> Self {
        catalog.widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid_catalogs() {
        for preset in [AllowedWidths::standard(), AllowedWidths::whole_mm()] {
            let rebuilt = AllowedWidths::new(preset.widths().to_vec()).unwrap();
            assert_eq!(rebuilt, preset);
        }
    }

    #[test]
    fn test_whole_mm_swaps_fractional_width() {
        let standard = AllowedWidths::standard();
        let whole = AllowedWidths::whole_mm();

        assert!(standard.contains(32.5));
        assert!(!standard.contains(64.0));
        assert!(!whole.contains(32.5));
        assert!(whole.contains(64.0));
        assert!(whole.iter().all(|w| w.fract() == 0.0));
    }

    #[test]
    fn test_catalog_width_bounds_are_inclusive() {
        let catalog = AllowedWidths::new(vec![1.0, 500.0]).unwrap();
        assert_eq!(catalog.widths(), &[1.0, 500.0]);
    }

    #[test]
    fn test_new_sorts_widths() {
        let catalog = AllowedWidths::new(vec![100.0, 20.0, 50.0]).unwrap();
        assert_eq!(catalog.widths(), &[20.0, 50.0, 100.0]);
    }

    #[test]
    fn test_new_rejects_bad_catalogs() {
        assert_eq!(AllowedWidths::new(vec![]), Err(CatalogError::Empty));
        assert_eq!(
            AllowedWidths::new(vec![20.0, 0.0]),
            Err(CatalogError::OutOfRange(0.0))
        );
        assert_eq!(
            AllowedWidths::new(vec![20.0, 600.0]),
            Err(CatalogError::OutOfRange(600.0))
        );
        assert_eq!(
            AllowedWidths::new(vec![20.0, 1e-10]),
            Err(CatalogError::OutOfRange(1e-10))
        );
        assert_eq!(
            AllowedWidths::new(vec![0.5, 20.0]),
            Err(CatalogError::OutOfRange(0.5))
        );
        assert!(matches!(
            AllowedWidths::new(vec![20.0, f64::NAN]),
            Err(CatalogError::OutOfRange(_))
        ));
        assert_eq!(
            AllowedWidths::new(vec![50.0, 20.0, 50.0]),
            Err(CatalogError::Duplicate(50.0))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let catalog: AllowedWidths = serde_json::from_str("[40, 20.5]").unwrap();
        assert_eq!(catalog.widths(), &[20.5, 40.0]);

        let err = serde_json::from_str::<AllowedWidths>("[20, 20]").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
