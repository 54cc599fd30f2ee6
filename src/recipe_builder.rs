use std::collections::HashSet;
use tracing::{info, warn};

use crate::api_connection::{FdaClient, FdaError, LocalDataset};
use crate::cli::IngredientSpec;
use crate::records::NutritionRow;
use crate::session::{RecipeSession, SessionError};

/// Where ingredient records come from.
pub enum RecordSource {
    Remote(FdaClient),
    Local(LocalDataset),
}

impl RecordSource {
    pub async fn lookup(&self, name: &str) -> Result<Option<NutritionRow>, FdaError> {
        match self {
            RecordSource::Remote(client) => client.lookup(name).await,
            RecordSource::Local(dataset) => dataset.lookup(name),
        }
    }
}

/// Ingredients that did not make it into the recipe.
#[derive(Debug, Default, PartialEq)]
pub struct BuildReport {
    pub not_found: Vec<String>,
    pub failed: Vec<(String, String)>, // (ingredient, error message)
}

/// Looks up every ingredient and adds it to the session.
///
/// Servings are keyed by the name of the resolved row, which can differ from the query.
/// Ingredients resolving to the same row have their grams added together. Lookup
/// failures are recorded and the remaining ingredients are still processed.
pub async fn build_recipe(
    session: &mut RecipeSession,
    source: &RecordSource,
    ingredients: &[IngredientSpec],
) -> Result<BuildReport, SessionError> {
    let mut report = BuildReport::default();
    let mut resolved_here: HashSet<String> = HashSet::new();
    let ingredient_count = ingredients.len();

    for (idx, ingredient) in ingredients.iter().enumerate() {
        info!(
            "Looking up ingredient {}/{}: {}",
            idx + 1,
            ingredient_count,
            ingredient.name
        );

        match source.lookup(&ingredient.name).await {
            Ok(Some(row)) => {
                let resolved = row.name.clone();
                if resolved != ingredient.name {
                    info!(query = %ingredient.name, resolved = %resolved, "resolved to a different sample");
                }
                session.upsert_row(row);

                let grams = if resolved_here.contains(&resolved) {
                    session.grams_for(&resolved).unwrap_or(0.0) + ingredient.grams
                } else {
                    ingredient.grams
                };
                session.set_grams(&resolved, grams)?;
                resolved_here.insert(resolved);
            }
            Ok(None) => report.not_found.push(ingredient.name.clone()),
            Err(e) => {
                warn!(ingredient = %ingredient.name, error = %e, "lookup failed");
                report.failed.push((ingredient.name.clone(), e.to_string()));
            }
        }
    }
    Ok(report)
}
