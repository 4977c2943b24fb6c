use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// Atwater energy factors, kcal per gram.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Nutrient vector for some quantity of food.
///
/// Macros and fiber are in grams; sodium, potassium, calcium, iron and
/// vitamin C are in milligrams. Addition and scaling are pointwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub sodium: f64,
    #[serde(default)]
    pub potassium: f64,
    #[serde(default)]
    pub calcium: f64,
    #[serde(default)]
    pub iron: f64,
    #[serde(default)]
    pub vitamin_c: f64,
}

impl Nutrients {
    /// Nutrients with only the three macros set.
    pub fn macros(protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
            ..Self::default()
        }
    }

    /// Energy from macros only; fiber and micronutrients contribute nothing.
    #[inline]
    pub fn energy_kcal(&self) -> f64 {
        KCAL_PER_G_PROTEIN * self.protein
            + KCAL_PER_G_CARBS * self.carbs
            + KCAL_PER_G_FAT * self.fat
    }

    /// Copy with every field rounded to `decimals` places. Display only.
    pub fn rounded(&self, decimals: u32) -> Self {
        let factor = 10f64.powi(decimals as i32);
        self.map(|v| (v * factor).round() / factor)
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            protein: f(self.protein),
            carbs: f(self.carbs),
            fat: f(self.fat),
            fiber: f(self.fiber),
            sodium: f(self.sodium),
            potassium: f(self.potassium),
            calcium: f(self.calcium),
            iron: f(self.iron),
            vitamin_c: f(self.vitamin_c),
        }
    }
}

impl Add for Nutrients {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
            fiber: self.fiber + rhs.fiber,
            sodium: self.sodium + rhs.sodium,
            potassium: self.potassium + rhs.potassium,
            calcium: self.calcium + rhs.calcium,
            iron: self.iron + rhs.iron,
            vitamin_c: self.vitamin_c + rhs.vitamin_c,
        }
    }
}

impl AddAssign for Nutrients {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for Nutrients {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }
}

impl Sum for Nutrients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Nutrients {
        Nutrients {
            protein: 20.0,
            carbs: 10.0,
            fat: 5.0,
            fiber: 2.0,
            sodium: 300.0,
            potassium: 150.0,
            calcium: 12.0,
            iron: 1.5,
            vitamin_c: 0.4,
        }
    }

    #[test]
    fn test_energy_uses_atwater_factors() {
        let n = sample();
        assert!((n.energy_kcal() - (80.0 + 40.0 + 45.0)).abs() < 1e-9);
    }

    #[test]
    fn test_energy_ignores_fiber_and_micros() {
        let a = Nutrients::macros(1.0, 1.0, 1.0);
        let mut b = a;
        b.fiber = 50.0;
        b.sodium = 900.0;
        assert_eq!(a.energy_kcal(), b.energy_kcal());
    }

    #[test]
    fn test_add_and_scale_are_pointwise() {
        let n = sample();
        let doubled = n * 2.0;
        assert_eq!(n + n, doubled);
        assert_eq!(doubled.sodium, 600.0);
        assert_eq!(doubled.vitamin_c, 0.8);
    }

    #[test]
    fn test_sum() {
        let total: Nutrients = vec![sample(), sample(), sample()].into_iter().sum();
        assert!((total.protein - 60.0).abs() < 1e-9);
        assert!((total.iron - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_rounded() {
        let n = Nutrients::macros(1.23456, 2.0049, 0.005);
        let r = n.rounded(2);
        assert_eq!(r.protein, 1.23);
        assert_eq!(r.carbs, 2.0);
        assert_eq!(r.fat, 0.01);
    }
}
