use crate::error::CropwiseError;
use crate::rules::schema::CropTableDef;
use crate::rules::validate_table;

const DEFAULT_CROPS_JSON: &str = include_str!("../../../../rules/crops.json");

/// Available predefined crop tables.
pub const PRESETS: &[&str] = &["default"];

/// Load a predefined crop table by name.
pub fn load_preset(name: &str) -> Result<CropTableDef, CropwiseError> {
    match name {
        "default" => {
            let table: CropTableDef = serde_json::from_str(DEFAULT_CROPS_JSON)?;
            validate_table(&table)?;
            Ok(table)
        }
        _ => Err(CropwiseError::TableInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
