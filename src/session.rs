//! The recipe being assembled: normalized rows plus their serving sizes.
//!
//! Rendering layers subscribe to [`SessionEvent`]s instead of polling; totals are
//! recomputed from the current state on every call to [`RecipeSession::totals`].

use thiserror::Error;
use tracing::debug;

use crate::recipe_aggregator::{aggregate, RecipeNutrition, ServingTable, DEFAULT_SERVING_GRAMS};
use crate::records::NutritionRow;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("No ingredient named '{0}' in the recipe")]
    UnknownIngredient(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RowAdded { name: String },
    RowReplaced { name: String },
    ServingChanged { name: String, grams: f64 },
    RowRemoved { name: String },
    Cleared,
}

type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Default)]
pub struct RecipeSession {
    rows: Vec<NutritionRow>,
    servings: ServingTable,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for RecipeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeSession")
            .field("rows", &self.rows)
            .field("servings", &self.servings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl RecipeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl Fn(&SessionEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, event: SessionEvent) {
        debug!(?event, "recipe session changed");
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// Adds a row, or replaces the row with the same name in place.
    /// A replaced row keeps its position and serving size; a new row starts at 100g.
    pub fn upsert_row(&mut self, row: NutritionRow) {
        let name = row.name.clone();
        if let Some(existing) = self.rows.iter_mut().find(|r| r.name == name) {
            *existing = row;
            self.notify(SessionEvent::RowReplaced { name });
        } else {
            self.rows.push(row);
            self.servings.set(name.clone(), DEFAULT_SERVING_GRAMS);
            self.notify(SessionEvent::RowAdded { name });
        }
    }

    /// Sets the serving size of an existing row; negative and non-finite quantities clamp to 0.
    pub fn set_grams(&mut self, name: &str, grams: f64) -> Result<f64, SessionError> {
        if !self.rows.iter().any(|r| r.name == name) {
            return Err(SessionError::UnknownIngredient(name.to_string()));
        }
        let stored = self.servings.set(name, grams);
        self.notify(SessionEvent::ServingChanged {
            name: name.to_string(),
            grams: stored,
        });
        Ok(stored)
    }

    pub fn remove_row(&mut self, name: &str) -> Option<NutritionRow> {
        let index = self.rows.iter().position(|r| r.name == name)?;
        let removed = self.rows.remove(index);
        self.servings.remove(name);
        self.notify(SessionEvent::RowRemoved {
            name: name.to_string(),
        });
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.servings.clear();
        self.notify(SessionEvent::Cleared);
    }

    pub fn rows(&self) -> &[NutritionRow] {
        &self.rows
    }

    pub fn servings(&self) -> &ServingTable {
        &self.servings
    }

    pub fn grams_for(&self, name: &str) -> Option<f64> {
        self.servings.get(name)
    }

    pub fn totals(&self) -> RecipeNutrition {
        aggregate(&self.rows, &self.servings)
    }
}
