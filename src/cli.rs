use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::recipe_aggregator::DEFAULT_SERVING_GRAMS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// An ingredient given on the command line as `name` or `name=grams`.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientSpec {
    pub name: String,
    pub grams: f64,
}

pub fn parse_ingredient(s: &str) -> Result<IngredientSpec, String> {
    let (name, grams) = match s.rsplit_once('=') {
        Some((name, grams)) => {
            let grams = grams
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|g| g.is_finite())
                .ok_or_else(|| format!("invalid gram quantity '{}' in '{}'", grams, s))?;
            (name, grams)
        }
        None => (s, DEFAULT_SERVING_GRAMS),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing ingredient name in '{}'", s));
    }
    Ok(IngredientSpec {
        name: name.to_string(),
        grams,
    })
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds a nutrition-facts label from FDA food composition data", long_about = None)]
pub struct Cli {
    /// Ingredients as `name` or `name=grams` (grams default to 100)
    #[arg(required = true, value_parser = parse_ingredient)]
    pub ingredients: Vec<IngredientSpec>,

    /// Read records from a saved JSON or CSV export instead of the live endpoint
    #[arg(short, long)]
    pub records_file: Option<PathBuf>,

    /// Output format of the label
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
