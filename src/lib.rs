pub mod api_connection;
pub mod cli;
pub mod label;
pub mod recipe_aggregator;
pub mod recipe_builder;
pub mod record_normalizer;
pub mod records;
pub mod session;
