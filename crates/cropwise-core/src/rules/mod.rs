pub mod builtin;
pub mod schema;

use crate::error::CropwiseError;
use crate::model::Axis;
use schema::CropTableDef;
use std::collections::HashSet;
use std::path::Path;

/// Candidate crops needed so that a winner and two alternatives always exist.
pub const MIN_CROPS: usize = 3;

/// Load a crop table from a JSON file.
pub fn load_table(path: &Path) -> Result<CropTableDef, CropwiseError> {
    let content = std::fs::read_to_string(path).map_err(|e| CropwiseError::TableLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_table(&content, path)
}

/// Parse a crop table from a JSON string.
pub fn parse_table(json: &str, source: &Path) -> Result<CropTableDef, CropwiseError> {
    let table: CropTableDef = serde_json::from_str(json).map_err(|e| CropwiseError::TableLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_table(&table)?;
    Ok(table)
}

/// Parse a crop table from a JSON string (no file path context).
pub fn parse_table_str(json: &str) -> Result<CropTableDef, CropwiseError> {
    let table: CropTableDef = serde_json::from_str(json).map_err(CropwiseError::Json)?;
    validate_table(&table)?;
    Ok(table)
}

/// Validate that a crop table is well-formed.
pub fn validate_table(table: &CropTableDef) -> Result<(), CropwiseError> {
    if table.name.trim().is_empty() {
        return Err(CropwiseError::TableInvalid(
            "table name must not be empty".into(),
        ));
    }

    if table.crops.len() < MIN_CROPS {
        return Err(CropwiseError::TableInvalid(format!(
            "table must list at least {} crops, found {}",
            MIN_CROPS,
            table.crops.len()
        )));
    }

    let mut seen = HashSet::new();
    for rule in &table.crops {
        if rule.crop.trim().is_empty() {
            return Err(CropwiseError::TableInvalid(
                "crop name must not be empty".into(),
            ));
        }

        if !seen.insert(rule.crop.to_lowercase()) {
            return Err(CropwiseError::TableInvalid(format!(
                "crop '{}' is listed more than once",
                rule.crop
            )));
        }

        for axis in Axis::ALL {
            let Some(range) = rule.criteria.get(&axis) else {
                return Err(CropwiseError::TableInvalid(format!(
                    "crop '{}' has no criterion for '{}'",
                    rule.crop,
                    axis.key()
                )));
            };

            if range.gt.is_some() && range.gte.is_some() {
                return Err(CropwiseError::TableInvalid(format!(
                    "crop '{}' sets both 'gt' and 'gte' for '{}'",
                    rule.crop,
                    axis.key()
                )));
            }

            if range.lt.is_some() && range.lte.is_some() {
                return Err(CropwiseError::TableInvalid(format!(
                    "crop '{}' sets both 'lt' and 'lte' for '{}'",
                    rule.crop,
                    axis.key()
                )));
            }

            if range.is_unbounded() {
                return Err(CropwiseError::TableInvalid(format!(
                    "crop '{}' has an empty range for '{}'",
                    rule.crop,
                    axis.key()
                )));
            }

            if let (Some(lo), Some(hi)) = (range.lower(), range.upper()) {
                if lo > hi {
                    return Err(CropwiseError::TableInvalid(format!(
                        "crop '{}' has lower bound {} above upper bound {} for '{}'",
                        rule.crop,
                        lo,
                        hi,
                        axis.key()
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRITERIA: &str = r#"{
        "nitrogen": { "gt": "80" },
        "phosphorus": { "gt": "40" },
        "potassium": { "gt": "40" },
        "ph": { "gte": "5", "lte": "7" },
        "rainfall": { "gt": "200" },
        "temperature": { "gte": "20", "lte": "35" },
        "humidity": { "gt": "80" }
    }"#;

    fn table_json(crops: &[&str]) -> String {
        let rules: Vec<String> = crops
            .iter()
            .map(|c| format!(r#"{{ "crop": "{}", "criteria": {} }}"#, c, CRITERIA))
            .collect();
        format!(
            r#"{{ "name": "Test", "version": "1.0", "crops": [{}] }}"#,
            rules.join(",")
        )
    }

    #[test]
    fn test_parse_valid_table() {
        let table = parse_table_str(&table_json(&["A", "B", "C"])).unwrap();
        assert_eq!(table.name, "Test");
        assert_eq!(table.crop_names(), vec!["A", "B", "C"]);
        assert_eq!(table.crops[0].criteria.len(), 7);
    }

    #[test]
    fn test_too_few_crops_rejected() {
        assert!(parse_table_str(&table_json(&["A", "B"])).is_err());
    }

    #[test]
    fn test_duplicate_crop_rejected() {
        let err = parse_table_str(&table_json(&["A", "B", "a"])).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_missing_axis_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "crops": [
                { "crop": "A", "criteria": { "nitrogen": { "gt": "1" } } },
                { "crop": "B", "criteria": { "nitrogen": { "gt": "1" } } },
                { "crop": "C", "criteria": { "nitrogen": { "gt": "1" } } }
            ]
        }"#;
        let err = parse_table_str(json).unwrap_err();
        assert!(err.to_string().contains("phosphorus"));
    }

    #[test]
    fn test_conflicting_bounds_rejected() {
        let json = table_json(&["A", "B", "C"]).replacen(
            r#""gt": "80""#,
            r#""gt": "80", "gte": "81""#,
            1,
        );
        assert!(parse_table_str(&json).is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let json = table_json(&["A", "B", "C"]).replacen(
            r#""gte": "5", "lte": "7""#,
            r#""gte": "7", "lte": "5""#,
            1,
        );
        let err = parse_table_str(&json).unwrap_err();
        assert!(err.to_string().contains("above upper bound"));
    }

    #[test]
    fn test_unknown_axis_rejected() {
        let json = table_json(&["A", "B", "C"]).replacen("\"humidity\"", "\"salinity\"", 1);
        assert!(parse_table_str(&json).is_err());
    }
}
