use std::fmt::Write;

use crate::recipe_aggregator::RecipeNutrition;

const UNAVAILABLE: &str = "-";

fn grams_text(value: Option<f64>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), |v| format!("{:.1} g", v))
}

fn kcal_text(value: Option<i64>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), |v| format!("{} kcal", v))
}

/// Renders a plain-text nutrition-facts label: one line per ingredient, then the totals.
pub fn render_label(nutrition: &RecipeNutrition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "營養標示 Nutrition Facts");
    // One line per ingredient; CJK names are double-width, so no column padding.
    for item in &nutrition.ingredients {
        let _ = writeln!(
            out,
            "{} {} g｜熱量 {}｜蛋白質 {}｜脂肪 {}｜碳水 {}",
            item.name,
            item.grams,
            kcal_text(item.kcal),
            grams_text(item.protein),
            grams_text(item.fat),
            grams_text(item.carbs),
        );
    }

    let totals = &nutrition.totals;
    let _ = writeln!(out, "----------------------------------------");
    let _ = writeln!(out, "熱量：{}", kcal_text(Some(totals.kcal)));
    let _ = writeln!(out, "蛋白質：{}", grams_text(totals.protein));
    let _ = writeln!(out, "脂肪：{}", grams_text(totals.fat));
    let _ = writeln!(out, "碳水化合物：{}", grams_text(totals.carbs));
    out
}
