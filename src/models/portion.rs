use serde::{Deserialize, Serialize};

use crate::error::PortionError;

/// A human-scale serving, e.g. "2 tablespoons", with a known mass or volume.
///
/// At least one of the gram or milliliter equivalents is always present;
/// construction and deserialization both reject a portion without either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PortionRecord")]
pub struct Portion {
    quantity: f64,
    unit: String,
    label: String,
    grams_equivalent: Option<f64>,
    milliliters_equivalent: Option<f64>,
}

#[derive(Deserialize)]
struct PortionRecord {
    quantity: f64,
    unit: String,
    label: String,
    #[serde(default)]
    grams_equivalent: Option<f64>,
    #[serde(default)]
    milliliters_equivalent: Option<f64>,
}

impl TryFrom<PortionRecord> for Portion {
    type Error = PortionError;

    fn try_from(r: PortionRecord) -> Result<Self, Self::Error> {
        Portion::new(
            r.quantity,
            r.unit,
            r.label,
            r.grams_equivalent,
            r.milliliters_equivalent,
        )
    }
}

impl Portion {
    pub fn new(
        quantity: f64,
        unit: impl Into<String>,
        label: impl Into<String>,
        grams_equivalent: Option<f64>,
        milliliters_equivalent: Option<f64>,
    ) -> Result<Self, PortionError> {
        let label = label.into();
        if grams_equivalent.is_none() && milliliters_equivalent.is_none() {
            return Err(PortionError::NoEquivalent(label));
        }
        Ok(Self {
            quantity,
            unit: unit.into(),
            label,
            grams_equivalent,
            milliliters_equivalent,
        })
    }

    /// A plain mass portion, e.g. `Portion::grams(100.0)` is "100 g".
    pub fn grams(grams: f64) -> Self {
        Self {
            quantity: grams,
            unit: "g".to_string(),
            label: format!("{} g", format_quantity(grams)),
            grams_equivalent: Some(grams),
            milliliters_equivalent: None,
        }
    }

    /// A plain volume portion.
    pub fn milliliters(ml: f64) -> Self {
        Self {
            quantity: ml,
            unit: "ml".to_string(),
            label: format!("{} ml", format_quantity(ml)),
            grams_equivalent: None,
            milliliters_equivalent: Some(ml),
        }
    }

    /// Same serving multiplied by `factor`; both equivalents scale with it.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            quantity: self.quantity * factor,
            unit: self.unit.clone(),
            label: format!("{} x {}", format_quantity(factor), self.label),
            grams_equivalent: self.grams_equivalent.map(|g| g * factor),
            milliliters_equivalent: self.milliliters_equivalent.map(|ml| ml * factor),
        }
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn grams_equivalent(&self) -> Option<f64> {
        self.grams_equivalent
    }

    pub fn milliliters_equivalent(&self) -> Option<f64> {
        self.milliliters_equivalent
    }
}

fn format_quantity(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}
