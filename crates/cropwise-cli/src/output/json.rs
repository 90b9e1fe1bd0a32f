use cropwise_core::error::CropwiseError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), CropwiseError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
