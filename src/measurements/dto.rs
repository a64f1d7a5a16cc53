use serde::Deserialize;
use time::{macros::format_description, Date};

use crate::error::ApiError;

/// Body of create and update requests. `id`, `userId` and `createdAt` are
/// server-owned; if a client sends them they are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementInput {
    pub date: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub chest: f64,
    #[serde(default)]
    pub waist: f64,
    #[serde(default)]
    pub arm: f64,
    #[serde(default)]
    pub leg: f64,
}

impl MeasurementInput {
    /// `date` must be a real `YYYY-MM-DD` calendar date; metrics must be finite.
    pub fn validate(&self) -> Result<(), ApiError> {
        Date::parse(&self.date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| ApiError::Validation("date must be YYYY-MM-DD".into()))?;

        let metrics = [self.weight, self.chest, self.waist, self.arm, self.leg];
        if metrics.iter().any(|v| !v.is_finite()) {
            return Err(ApiError::Validation("measurements must be numbers".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_client_owner_and_defaults_metrics() {
        let input: MeasurementInput =
            serde_json::from_str(r#"{"date":"2024-01-01","weight":70,"userId":999,"id":5}"#).unwrap();
        assert_eq!(input.weight, 70.0);
        assert_eq!(input.leg, 0.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn missing_date_fails_to_parse() {
        assert!(serde_json::from_str::<MeasurementInput>(r#"{"weight":70}"#).is_err());
    }

    #[test]
    fn rejects_bad_dates() {
        for date in ["", "01.01.2024", "2024-13-01", "2024-02-30", "2024-1-1"] {
            let input = MeasurementInput {
                date: date.into(),
                weight: 0.0,
                chest: 0.0,
                waist: 0.0,
                arm: 0.0,
                leg: 0.0,
            };
            assert!(input.validate().is_err(), "{date} should be rejected");
        }
    }
}
