use crate::commands::load_table;
use crate::TableArgs;
use cropwise_core::error::CropwiseError;
use cropwise_core::model::Axis;
use cropwise_core::rules::{self, builtin};
use std::path::Path;

pub fn list() -> Result<(), CropwiseError> {
    println!("Available crop tables:\n");
    for name in builtin::PRESETS {
        let table = builtin::load_preset(name)?;
        println!("  {:<8} {} (v{})", name, table.name, table.version);
        if let Some(ref desc) = table.description {
            println!("           {}", desc);
        }
        println!("           Crops: {}", table.crop_names().join(", "));
        println!();
    }
    Ok(())
}

pub fn explain(args: &TableArgs) -> Result<(), CropwiseError> {
    let table = load_table(args)?;

    println!("{} (version {})\n", table.name, table.version);

    if let Some(ref desc) = table.description {
        println!("{}\n", desc);
    }

    println!(
        "Each of the {} crops earns one point per criterion the field meets.",
        table.crops.len()
    );
    println!("The highest score wins; ties go to the crop listed first.\n");

    let name_width = table
        .crops
        .iter()
        .map(|c| c.crop.len())
        .max()
        .unwrap_or(10)
        .max(4);

    print!("  {:<width$}", "Crop", width = name_width + 2);
    for axis in Axis::ALL {
        print!("  {:<12}", axis.to_string());
    }
    println!();
    println!("  {}", "-".repeat(name_width + 2 + Axis::ALL.len() * 14));

    for rule in &table.crops {
        print!("  {:<width$}", rule.crop, width = name_width + 2);
        for axis in Axis::ALL {
            match rule.criteria.get(&axis) {
                Some(range) => print!("  {:<12}", range.to_string()),
                None => print!("  {:<12}", "-"),
            }
        }
        println!();
    }

    println!();
    println!("Ranges written a-b include both ends.");
    println!();

    Ok(())
}

pub fn schema() -> Result<(), CropwiseError> {
    print!(
        r#"Crop Table Schema
=================

A crop table lists candidate crops and, for each, the range of every
soil and weather measurement the crop prefers. `cropwise predict`
scores a sample by counting how many ranges it falls into.

Top-level fields:
  name          (string, required)  Human-readable name of the table
  description   (string, optional)  What this table is for
  version       (string, required)  Version identifier (e.g., "1.0")
  crops         (array, required)   At least three crop rules, in tie-break
                                    order (earlier wins on equal scores)

Each entry in "crops":
  crop          (string, required)  Crop name, unique within the table
  criteria      (object, required)  One range for each of: nitrogen,
                                    phosphorus, potassium, ph, rainfall,
                                    temperature, humidity
  note          (string, optional)  Free-form remark

A range has at least one of:
  gt / gte      lower bound, exclusive / inclusive
  lt / lte      upper bound, exclusive / inclusive
Values are quoted decimal strings. "gt" and "gte" may not both be set
(likewise "lt" and "lte").

Example:
{{
  "name": "Highland table",
  "version": "1.0",
  "crops": [
    {{
      "crop": "Barley",
      "criteria": {{
        "nitrogen": {{ "gte": "40", "lte": "90" }},
        "phosphorus": {{ "gt": "25" }},
        "potassium": {{ "gt": "25" }},
        "ph": {{ "gte": "6", "lte": "8" }},
        "rainfall": {{ "gte": "40", "lte": "90" }},
        "temperature": {{ "gte": "12", "lte": "22" }},
        "humidity": {{ "gte": "45", "lte": "70" }}
      }}
    }}
  ]
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), CropwiseError> {
    let table = rules::load_table(file)?;

    println!("Crop table '{}' (v{}) is valid.", table.name, table.version);
    println!("  Crops: {}", table.crop_names().join(", "));

    // Ranges no sample can ever satisfy are legal but almost certainly a mistake.
    let mut warnings = Vec::new();
    for rule in &table.crops {
        for (axis, range) in &rule.criteria {
            if let (Some(lo), Some(hi)) = (range.lower(), range.upper()) {
                let touching_exclusive = lo == hi && (range.gt.is_some() || range.lt.is_some());
                if touching_exclusive {
                    warnings.push(format!(
                        "crop '{}' has an empty {} range ({})",
                        rule.crop,
                        axis.key(),
                        range
                    ));
                }
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
