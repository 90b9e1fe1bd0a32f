//! Per-nutrient fertilizer advice from fixed agronomic breakpoints.

use crate::model::SoilSample;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
    #[serde(rename = "pH")]
    Ph,
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nutrient::Nitrogen => write!(f, "Nitrogen"),
            Nutrient::Phosphorus => write!(f, "Phosphorus"),
            Nutrient::Potassium => write!(f, "Potassium"),
            Nutrient::Ph => write!(f, "pH"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NutrientStatus {
    Low,
    Medium,
    Adequate,
    #[serde(rename = "Too Acidic")]
    TooAcidic,
    #[serde(rename = "Too Alkaline")]
    TooAlkaline,
    Suboptimal,
    Optimal,
}

impl fmt::Display for NutrientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NutrientStatus::Low => "Low",
            NutrientStatus::Medium => "Medium",
            NutrientStatus::Adequate => "Adequate",
            NutrientStatus::TooAcidic => "Too Acidic",
            NutrientStatus::TooAlkaline => "Too Alkaline",
            NutrientStatus::Suboptimal => "Suboptimal",
            NutrientStatus::Optimal => "Optimal",
        };
        write!(f, "{s}")
    }
}

/// Traffic-light severity shown next to each advice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Red,
    Yellow,
    Green,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Red => write!(f, "red"),
            Severity::Yellow => write!(f, "yellow"),
            Severity::Green => write!(f, "green"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientAdvice {
    pub nutrient: Nutrient,
    pub status: NutrientStatus,
    pub recommendation: String,
    #[serde(rename = "color")]
    pub severity: Severity,
}

/// Breakpoints for a macronutrient: below `low` is Low, below `medium` is Medium.
struct MacroBands {
    nutrient: Nutrient,
    low: Decimal,
    medium: Decimal,
    advice_low: &'static str,
    advice_medium: &'static str,
    advice_adequate: &'static str,
}

const NITROGEN: MacroBands = MacroBands {
    nutrient: Nutrient::Nitrogen,
    low: Decimal::from_parts(50, 0, 0, false, 0),
    medium: Decimal::from_parts(80, 0, 0, false, 0),
    advice_low: "Apply a nitrogen-rich fertilizer such as urea (46-0-0) or well-rotted manure before sowing.",
    advice_medium: "Top-dress with a moderate dose of nitrogen, for example ammonium sulphate, during early growth.",
    advice_adequate: "Nitrogen is sufficient. Maintain current practice and avoid excess application.",
};

const PHOSPHORUS: MacroBands = MacroBands {
    nutrient: Nutrient::Phosphorus,
    low: Decimal::from_parts(30, 0, 0, false, 0),
    medium: Decimal::from_parts(50, 0, 0, false, 0),
    advice_low: "Apply DAP (18-46-0) or single superphosphate and work it into the root zone.",
    advice_medium: "Add a light phosphorus dressing such as bone meal to support root development.",
    advice_adequate: "Phosphorus is sufficient. No additional application is needed this season.",
};

const POTASSIUM: MacroBands = MacroBands {
    nutrient: Nutrient::Potassium,
    low: Decimal::from_parts(30, 0, 0, false, 0),
    medium: Decimal::from_parts(50, 0, 0, false, 0),
    advice_low: "Apply muriate of potash (0-0-60) or wood ash to raise potassium levels.",
    advice_medium: "Supplement with sulphate of potash to improve disease resistance and grain filling.",
    advice_adequate: "Potassium is sufficient. Return crop residues to the field to maintain it.",
};

// pH 5.5, 6.0, 7.5 and 8.0
const PH_ACIDIC: Decimal = Decimal::from_parts(55, 0, 0, false, 1);
const PH_OPTIMAL_LOW: Decimal = Decimal::from_parts(60, 0, 0, false, 1);
const PH_OPTIMAL_HIGH: Decimal = Decimal::from_parts(75, 0, 0, false, 1);
const PH_ALKALINE: Decimal = Decimal::from_parts(80, 0, 0, false, 1);

const PH_ADVICE_ACIDIC: &str = "Apply agricultural lime (calcium carbonate) to raise soil pH.";
const PH_ADVICE_ALKALINE: &str =
    "Apply elemental sulphur or gypsum and add organic matter to lower soil pH.";
const PH_ADVICE_SUBOPTIMAL: &str =
    "Make small corrections with lime or sulphur and retest the soil after one season.";
const PH_ADVICE_OPTIMAL: &str = "Soil pH is in the ideal range for most crops.";

/// Advice for each nutrient axis, always ordered Nitrogen, Phosphorus, Potassium, pH.
pub fn advise(soil: &SoilSample) -> Vec<NutrientAdvice> {
    vec![
        classify_macro(&NITROGEN, soil.nitrogen),
        classify_macro(&PHOSPHORUS, soil.phosphorus),
        classify_macro(&POTASSIUM, soil.potassium),
        classify_ph(soil.ph),
    ]
}

fn classify_macro(bands: &MacroBands, value: Decimal) -> NutrientAdvice {
    let (status, severity, text) = if value < bands.low {
        (NutrientStatus::Low, Severity::Red, bands.advice_low)
    } else if value < bands.medium {
        (NutrientStatus::Medium, Severity::Yellow, bands.advice_medium)
    } else {
        (
            NutrientStatus::Adequate,
            Severity::Green,
            bands.advice_adequate,
        )
    };

    NutrientAdvice {
        nutrient: bands.nutrient,
        status,
        recommendation: text.to_string(),
        severity,
    }
}

fn classify_ph(ph: Decimal) -> NutrientAdvice {
    let (status, severity, text) = if ph < PH_ACIDIC {
        (NutrientStatus::TooAcidic, Severity::Red, PH_ADVICE_ACIDIC)
    } else if ph > PH_ALKALINE {
        (NutrientStatus::TooAlkaline, Severity::Red, PH_ADVICE_ALKALINE)
    } else if ph < PH_OPTIMAL_LOW || ph > PH_OPTIMAL_HIGH {
        (
            NutrientStatus::Suboptimal,
            Severity::Yellow,
            PH_ADVICE_SUBOPTIMAL,
        )
    } else {
        (NutrientStatus::Optimal, Severity::Green, PH_ADVICE_OPTIMAL)
    };

    NutrientAdvice {
        nutrient: Nutrient::Ph,
        status,
        recommendation: text.to_string(),
        severity,
    }
}
