use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::models::{Nutrients, Portion};

/// Reference quantity a food's nutrient table is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaseUnit {
    Per100G,
    Per100Ml,
}

impl BaseUnit {
    /// The 100 g or 100 ml portion used when a food declares none.
    pub fn reference_portion(self) -> Portion {
        match self {
            BaseUnit::Per100G => Portion::grams(100.0),
            BaseUnit::Per100Ml => Portion::milliliters(100.0),
        }
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseUnit::Per100G => write!(f, "100 g"),
            BaseUnit::Per100Ml => write!(f, "100 ml"),
        }
    }
}

/// A catalog food. Immutable once built; re-ingestion replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub base_unit: BaseUnit,
    pub nutrients_base: Nutrients,
    /// Energy as printed in the source table, if any. Scoring ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_kcal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_g_per_ml: Option<f64>,
    #[serde(default)]
    pub portions: Vec<Portion>,
}

impl Food {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_unit: BaseUnit,
        nutrients_base: Nutrients,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: None,
            origin: None,
            group: None,
            base_unit,
            nutrients_base,
            declared_kcal: None,
            density_g_per_ml: None,
            portions: Vec::new(),
        }
    }

    pub fn with_portions(mut self, portions: Vec<Portion>) -> Self {
        self.portions = portions;
        self
    }

    pub fn with_density(mut self, density_g_per_ml: f64) -> Self {
        self.density_g_per_ml = Some(density_g_per_ml);
        self
    }

    /// Nutrients for `portion`, scaled from the base reference quantity.
    ///
    /// Per-100g foods take grams directly or derive them from ml and density.
    /// Per-100ml foods need a milliliter equivalent; there is no reverse
    /// density conversion.
    pub fn nutrients_for(&self, portion: &Portion) -> Result<Nutrients, ConversionError> {
        let amount = match self.base_unit {
            BaseUnit::Per100G => portion.grams_equivalent().or_else(|| {
                portion
                    .milliliters_equivalent()
                    .zip(self.density_g_per_ml)
                    .map(|(ml, density)| ml * density)
            }),
            BaseUnit::Per100Ml => portion.milliliters_equivalent(),
        };

        let amount = amount.ok_or_else(|| ConversionError::MissingEquivalent {
            food_id: self.id.clone(),
            portion: portion.label().to_string(),
            base_unit: self.base_unit,
        })?;

        Ok(self.nutrients_base * (amount / 100.0))
    }

    /// Declared portions, or the reference 100 g / 100 ml portion when there are none.
    pub fn portions_or_reference(&self) -> Vec<Portion> {
        if self.portions.is_empty() {
            vec![self.base_unit.reference_portion()]
        } else {
            self.portions.clone()
        }
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        let n = &self.nutrients_base;
        format!(
            "{} [{}]: per {} P:{} C:{} F:{} ({:.0} kcal)",
            self.name,
            self.id,
            self.base_unit,
            n.protein,
            n.carbs,
            n.fat,
            n.energy_kcal()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> Food {
        Food::new("rice", "Arroz cozido", BaseUnit::Per100G, Nutrients::macros(2.5, 28.0, 0.2))
    }

    fn milk() -> Food {
        Food::new("milk", "Leite integral", BaseUnit::Per100Ml, Nutrients::macros(3.2, 4.7, 3.3))
    }

    #[test]
    fn test_per_100g_uses_grams() {
        let n = rice().nutrients_for(&Portion::grams(50.0)).unwrap();
        assert!((n.carbs - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_100g_derives_grams_from_density() {
        let oil = Food::new("oil", "Azeite", BaseUnit::Per100G, Nutrients::macros(0.0, 0.0, 100.0))
            .with_density(0.92);
        let n = oil.nutrients_for(&Portion::milliliters(10.0)).unwrap();
        assert!((n.fat - 9.2).abs() < 1e-9);
    }

    #[test]
    fn test_per_100g_without_density_fails() {
        let err = rice().nutrients_for(&Portion::milliliters(10.0)).unwrap_err();
        assert_eq!(
            err,
            ConversionError::MissingEquivalent {
                food_id: "rice".to_string(),
                portion: "10 ml".to_string(),
                base_unit: BaseUnit::Per100G,
            }
        );
    }

    #[test]
    fn test_per_100ml_needs_milliliters() {
        let food = milk().with_density(1.03);
        let n = food.nutrients_for(&Portion::milliliters(200.0)).unwrap();
        assert!((n.protein - 6.4).abs() < 1e-9);
        assert!(food.nutrients_for(&Portion::grams(200.0)).is_err());
    }

    #[test]
    fn test_doubling_grams_doubles_nutrients() {
        let food = rice();
        let portion = Portion::new(1.0, "cup", "1 cup", Some(160.0), None).unwrap();
        let single = food.nutrients_for(&portion).unwrap();
        let double = food.nutrients_for(&portion.scaled(2.0)).unwrap();
        assert_eq!(single * 2.0, double);
    }

    #[test]
    fn test_portions_or_reference() {
        assert_eq!(rice().portions_or_reference(), vec![Portion::grams(100.0)]);
        assert_eq!(milk().portions_or_reference(), vec![Portion::milliliters(100.0)]);
    }

    #[test]
    fn test_debug_string() {
        assert_eq!(
            milk().debug_string(),
            "Leite integral [milk]: per 100 ml P:3.2 C:4.7 F:3.3 (61 kcal)"
        );
    }
}
