use crate::model::Axis;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A table of crops, each with one acceptance range per axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropTableDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Candidate crops in declaration order. Earlier crops win score ties.
    pub crops: Vec<CropRuleDef>,
}

impl CropTableDef {
    pub fn crop_names(&self) -> Vec<&str> {
        self.crops.iter().map(|c| c.crop.as_str()).collect()
    }
}

/// Growing window for a single crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRuleDef {
    pub crop: String,
    /// Map of axis -> acceptance range. Must cover every axis.
    pub criteria: BTreeMap<Axis, RangeDef>,
    #[serde(default)]
    pub note: Option<String>,
}

/// An interval with optional strict or inclusive bounds (decimal strings in JSON).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<Decimal>,
}

impl RangeDef {
    pub fn contains(&self, value: Decimal) -> bool {
        self.gt.map_or(true, |b| value > b)
            && self.gte.map_or(true, |b| value >= b)
            && self.lt.map_or(true, |b| value < b)
            && self.lte.map_or(true, |b| value <= b)
    }

    pub fn lower(&self) -> Option<Decimal> {
        self.gt.or(self.gte)
    }

    pub fn upper(&self) -> Option<Decimal> {
        self.lt.or(self.lte)
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower().is_none() && self.upper().is_none()
    }
}

impl fmt::Display for RangeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(lo), Some(hi)) = (self.gte, self.lte) {
            return write!(f, "{lo}-{hi}");
        }

        let mut parts = Vec::new();
        if let Some(b) = self.gt {
            parts.push(format!("> {b}"));
        }
        if let Some(b) = self.gte {
            parts.push(format!(">= {b}"));
        }
        if let Some(b) = self.lt {
            parts.push(format!("< {b}"));
        }
        if let Some(b) = self.lte {
            parts.push(format!("<= {b}"));
        }
        if parts.is_empty() {
            write!(f, "any")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}
