use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::records::NutritionRow;

pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// Gram quantity per ingredient name. Quantities are never negative.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ServingTable {
    grams: HashMap<String, f64>,
}

impl ServingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.grams.get(name).copied()
    }

    /// Grams used for aggregation: the stored quantity, or 100g when none is stored.
    pub fn grams_or_default(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(DEFAULT_SERVING_GRAMS)
    }

    /// Stores a quantity clamped to >= 0 and returns the stored value.
    /// Non-finite quantities store 0.
    pub fn set(&mut self, name: impl Into<String>, grams: f64) -> f64 {
        let clamped = clamp_grams(grams);
        self.grams.insert(name.into(), clamped);
        clamped
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.grams.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.grams.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.grams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    pub fn clear(&mut self) {
        self.grams.clear();
    }
}

fn clamp_grams(grams: f64) -> f64 {
    if grams.is_finite() {
        grams.max(0.0)
    } else {
        0.0
    }
}

/// What one ingredient contributes at its serving size. `None` means unavailable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientServing {
    pub name: String,
    pub grams: f64,
    pub kcal: Option<i64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
}

/// Recipe totals. `kcal` is always reported; a macro total that rounds to zero is
/// reported as absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NutritionTotals {
    pub kcal: i64,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RecipeNutrition {
    pub ingredients: Vec<IngredientServing>,
    pub totals: NutritionTotals,
}

// Half away from zero, as f64::round does.
fn round_kcal(value: f64) -> i64 {
    value.round() as i64
}

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn non_zero(value: f64) -> Option<f64> {
    if value == 0.0 {
        None
    } else {
        Some(value)
    }
}

/// Scales one row to its serving size.
pub fn scale_row(row: &NutritionRow, grams: f64) -> IngredientServing {
    let factor = grams / 100.0;
    IngredientServing {
        name: row.name.clone(),
        grams,
        kcal: row.calories.map(|v| round_kcal(v * factor)),
        protein: row.protein.map(|v| round_1dp(v * factor)),
        fat: row.fat.map(|v| round_1dp(v * factor)),
        carbs: row.carbs.map(|v| round_1dp(v * factor)),
    }
}

/// Computes the per-ingredient breakdown and the recipe totals.
pub fn aggregate(rows: &[NutritionRow], servings: &ServingTable) -> RecipeNutrition {
    let ingredients: Vec<IngredientServing> = rows
        .iter()
        .map(|row| scale_row(row, servings.grams_or_default(&row.name)))
        .collect();

    let mut total_kcal = 0_i64;
    let mut total_protein = 0.0_f64;
    let mut total_fat = 0.0_f64;
    let mut total_carbs = 0.0_f64;

    for serving in &ingredients {
        total_kcal = total_kcal.saturating_add(serving.kcal.unwrap_or(0));
        total_protein += serving.protein.unwrap_or(0.0);
        total_fat += serving.fat.unwrap_or(0.0);
        total_carbs += serving.carbs.unwrap_or(0.0);
    }

    RecipeNutrition {
        ingredients,
        totals: NutritionTotals {
            kcal: total_kcal,
            protein: non_zero(round_1dp(total_protein)),
            fat: non_zero(round_1dp(total_fat)),
            carbs: non_zero(round_1dp(total_carbs)),
        },
    }
}
