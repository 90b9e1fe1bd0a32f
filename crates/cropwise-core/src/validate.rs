//! Input validation for untrusted JSON payloads.
//!
//! Every field must be present, a JSON number and inside its declared range.
//! All problems are collected so the caller sees them at once.

use crate::error::{CropwiseError, FieldIssue};
use crate::model::{Location, PredictionRequest, SoilSample, WeatherReading};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Inclusive range a numeric field must fall in.
#[derive(Debug, Clone, Copy)]
pub struct FieldBounds {
    pub field: &'static str,
    pub min: Decimal,
    pub max: Decimal,
}

const fn bounds(field: &'static str, min: i64, max: i64) -> FieldBounds {
    FieldBounds {
        field,
        min: Decimal::from_parts(min.unsigned_abs() as u32, 0, 0, min < 0, 0),
        max: Decimal::from_parts(max.unsigned_abs() as u32, 0, 0, max < 0, 0),
    }
}

pub const NITROGEN: FieldBounds = bounds("nitrogen", 0, 1000);
pub const PHOSPHORUS: FieldBounds = bounds("phosphorus", 0, 1000);
pub const POTASSIUM: FieldBounds = bounds("potassium", 0, 1000);
pub const PH: FieldBounds = bounds("ph", 0, 14);
pub const RAINFALL: FieldBounds = bounds("rainfall", 0, 1000);
pub const TEMPERATURE: FieldBounds = bounds("temperature", -50, 60);
pub const HUMIDITY: FieldBounds = bounds("humidity", 0, 100);
pub const LATITUDE: FieldBounds = bounds("lat", -90, 90);
pub const LONGITUDE: FieldBounds = bounds("lon", -180, 180);

/// Validate a full seven-field prediction request.
pub fn parse_prediction_request(body: &Value) -> Result<PredictionRequest, CropwiseError> {
    let mut issues = Vec::new();
    let soil = soil_fields(body, &mut issues);
    let weather = weather_fields(body, &mut issues);

    match (soil, weather) {
        (Some(soil), Some(weather)) if issues.is_empty() => Ok(PredictionRequest { soil, weather }),
        _ => Err(CropwiseError::Validation(issues)),
    }
}

/// Validate the five soil fields.
pub fn parse_soil_sample(body: &Value) -> Result<SoilSample, CropwiseError> {
    let mut issues = Vec::new();
    match soil_fields(body, &mut issues) {
        Some(soil) if issues.is_empty() => Ok(soil),
        _ => Err(CropwiseError::Validation(issues)),
    }
}

/// Validate a `{lat, lon}` pair.
pub fn parse_location(body: &Value) -> Result<Location, CropwiseError> {
    let mut issues = Vec::new();
    let lat = field(body, &LATITUDE, &mut issues);
    let lon = field(body, &LONGITUDE, &mut issues);

    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Location { lat, lon }),
        _ => Err(CropwiseError::Validation(issues)),
    }
}

/// Check an already-typed weather reading, e.g. one returned by a weather service.
pub fn check_weather(reading: &WeatherReading) -> Result<(), CropwiseError> {
    let mut issues = Vec::new();
    check_range(reading.temperature, &TEMPERATURE, &mut issues);
    check_range(reading.humidity, &HUMIDITY, &mut issues);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CropwiseError::Validation(issues))
    }
}

fn soil_fields(body: &Value, issues: &mut Vec<FieldIssue>) -> Option<SoilSample> {
    if !body.is_object() {
        issues.push(FieldIssue {
            field: "body".into(),
            reason: "expected a JSON object".into(),
        });
        return None;
    }

    let nitrogen = field(body, &NITROGEN, issues);
    let phosphorus = field(body, &PHOSPHORUS, issues);
    let potassium = field(body, &POTASSIUM, issues);
    let ph = field(body, &PH, issues);
    let rainfall = field(body, &RAINFALL, issues);

    Some(SoilSample {
        nitrogen: nitrogen?,
        phosphorus: phosphorus?,
        potassium: potassium?,
        ph: ph?,
        rainfall: rainfall?,
    })
}

fn weather_fields(body: &Value, issues: &mut Vec<FieldIssue>) -> Option<WeatherReading> {
    if !body.is_object() {
        return None;
    }

    let temperature = field(body, &TEMPERATURE, issues);
    let humidity = field(body, &HUMIDITY, issues);

    Some(WeatherReading {
        temperature: temperature?,
        humidity: humidity?,
    })
}

/// Extract one bounded numeric field, recording an issue if it is unusable.
fn field(body: &Value, bounds: &FieldBounds, issues: &mut Vec<FieldIssue>) -> Option<Decimal> {
    let value = match body.get(bounds.field) {
        None | Some(Value::Null) => {
            issues.push(issue(bounds.field, "is required"));
            return None;
        }
        Some(Value::Number(n)) => match to_decimal(n) {
            Some(d) => d,
            None => {
                issues.push(issue(bounds.field, "is not a representable number"));
                return None;
            }
        },
        Some(_) => {
            issues.push(issue(bounds.field, "must be a number"));
            return None;
        }
    };

    let before = issues.len();
    check_range(value, bounds, issues);
    (issues.len() == before).then_some(value)
}

fn check_range(value: Decimal, bounds: &FieldBounds, issues: &mut Vec<FieldIssue>) {
    if value < bounds.min || value > bounds.max {
        issues.push(FieldIssue {
            field: bounds.field.to_string(),
            reason: format!(
                "{} is outside the allowed range {} to {}",
                value, bounds.min, bounds.max
            ),
        });
    }
}

fn to_decimal(n: &serde_json::Number) -> Option<Decimal> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn issue(field: &str, reason: &str) -> FieldIssue {
    FieldIssue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "nitrogen": 90,
            "phosphorus": 45,
            "potassium": 45,
            "ph": 6.5,
            "rainfall": 160,
            "temperature": 25,
            "humidity": 78
        })
    }

    fn issue_fields(err: CropwiseError) -> Vec<String> {
        err.issues().iter().map(|i| i.field.clone()).collect()
    }

    #[test]
    fn test_valid_request() {
        let req = parse_prediction_request(&valid_body()).unwrap();
        assert_eq!(req.soil.ph, dec!(6.5));
        assert_eq!(req.weather.humidity, dec!(78));
    }

    #[test]
    fn test_ph_out_of_range_rejected() {
        let mut body = valid_body();
        body["ph"] = json!(15);
        let err = parse_prediction_request(&body).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input parameters");
        assert_eq!(issue_fields(err), vec!["ph"]);
    }

    #[test]
    fn test_missing_and_non_numeric_fields_all_reported() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("rainfall");
        body["nitrogen"] = json!("90");
        body["humidity"] = Value::Null;
        let err = parse_prediction_request(&body).unwrap_err();
        assert_eq!(issue_fields(err), vec!["nitrogen", "rainfall", "humidity"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let body = json!({
            "nitrogen": 0,
            "phosphorus": 1000,
            "potassium": 0,
            "ph": 14,
            "rainfall": 1000,
            "temperature": -50,
            "humidity": 100
        });
        let req = parse_prediction_request(&body).unwrap();
        assert_eq!(req.weather.temperature, dec!(-50));
    }

    #[test]
    fn test_negative_nutrient_rejected() {
        let mut body = valid_body();
        body["potassium"] = json!(-0.5);
        assert!(parse_prediction_request(&body).is_err());
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err = parse_prediction_request(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(issue_fields(err), vec!["body"]);
    }

    #[test]
    fn test_soil_sample_ignores_weather_fields() {
        let body = json!({
            "nitrogen": 10, "phosphorus": 10, "potassium": 10, "ph": 7, "rainfall": 10
        });
        assert!(parse_soil_sample(&body).is_ok());
        assert!(parse_prediction_request(&body).is_err());
    }

    #[test]
    fn test_location_bounds() {
        assert!(parse_location(&json!({ "lat": 28.6, "lon": 77.2 })).is_ok());
        assert!(parse_location(&json!({ "lat": 90.5, "lon": 0 })).is_err());
        assert!(parse_location(&json!({ "lat": 0, "lon": -181 })).is_err());
        assert!(parse_location(&json!({ "lat": 0 })).is_err());
    }

    #[test]
    fn test_scientific_notation_accepted() {
        let mut body = valid_body();
        body["rainfall"] = json!(1.5e2);
        let req = parse_prediction_request(&body).unwrap();
        assert_eq!(req.soil.rainfall, dec!(150));
    }

    #[test]
    fn test_check_weather_range() {
        let ok = WeatherReading {
            temperature: dec!(25),
            humidity: dec!(60),
        };
        assert!(check_weather(&ok).is_ok());
        let hot = WeatherReading {
            temperature: dec!(61),
            humidity: dec!(60),
        };
        assert!(check_weather(&hot).is_err());
    }
}
