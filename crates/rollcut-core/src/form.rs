use crate::types::{CuttingRequest, PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Raw field values as submitted by an HTML form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationForm {
    #[serde(default)]
    pub material_width: String,
    #[serde(default)]
    pub usable_width: String,
    #[serde(default)]
    pub target_width: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub rolls_needed: String,
}

impl CalculationForm {
    /// Converts the raw fields into a request. Blank optional fields become `None`.
    pub fn parse(&self) -> Result<CuttingRequest> {
        Ok(CuttingRequest {
            material_width: required(&self.material_width)?,
            usable_width: optional(&self.usable_width)?,
            target_width: finite(required(&self.target_width)?)?,
            length: finite(required(&self.length)?)?,
            rolls_needed: optional(&self.rolls_needed)?,
        })
    }
}

fn required<T: FromStr>(raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| PlannerError::InvalidNumericInput)
}

fn optional<T: FromStr>(raw: &str) -> Result<Option<T>> {
    match raw.trim() {
        "" => Ok(None),
        value => required(value).map(Some),
    }
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlannerError::InvalidNumericInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(material: &str, usable: &str, target: &str, length: &str, rolls: &str) -> CalculationForm {
        CalculationForm {
            material_width: material.to_string(),
            usable_width: usable.to_string(),
            target_width: target.to_string(),
            length: length.to_string(),
            rolls_needed: rolls.to_string(),
        }
    }

    #[test]
    fn test_parse_full_form() {
        let request = form("900", " 880 ", "32.5", "120.5", "40").parse().unwrap();
        assert_eq!(
            request,
            CuttingRequest::new(900, 32.5, 120.5)
                .with_usable_width(880)
                .with_rolls_needed(40)
        );
    }

    #[test]
    fn test_blank_optional_fields() {
        let request = form("900", "", "100", "100", "  ").parse().unwrap();
        assert_eq!(request.usable_width, None);
        assert_eq!(request.rolls_needed, None);
    }

    #[test]
    fn test_non_numeric_fields_are_rejected() {
        for bad in [
            form("wide", "", "100", "100", ""),
            form("900.5", "", "100", "100", ""),
            form("900", "abc", "100", "100", ""),
            form("900", "", "", "100", ""),
            form("900", "", "100", "inf", ""),
            form("900", "", "100", "100", "-3"),
        ] {
            assert_eq!(bad.parse(), Err(PlannerError::InvalidNumericInput));
        }
    }
}
