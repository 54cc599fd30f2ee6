use anyhow::{Context, Result};
use foodcount::api_connection::{FdaClient, FdaConfig, LocalDataset};
use foodcount::cli::{parse_args, OutputFormat};
use foodcount::label::render_label;
use foodcount::recipe_builder::{build_recipe, RecordSource};
use foodcount::session::RecipeSession;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("foodcount=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli_args = parse_args();

    let source = match &cli_args.records_file {
        Some(path) => RecordSource::Local(
            LocalDataset::from_path(path)
                .await
                .with_context(|| format!("Failed to load records from {:?}", path))?,
        ),
        None => {
            let config = FdaConfig::from_env().context("Failed to read FDA configuration")?;
            RecordSource::Remote(FdaClient::new(config).context("Failed to build HTTP client")?)
        }
    };

    let mut session = RecipeSession::new();
    let report = build_recipe(&mut session, &source, &cli_args.ingredients)
        .await
        .context("Failed to assemble the recipe")?;
    for name in &report.not_found {
        eprintln!("Not found: {}", name);
    }
    for (name, error) in &report.failed {
        eprintln!("Error looking up '{}': {}", name, error);
    }

    if session.rows().is_empty() {
        anyhow::bail!("None of the requested ingredients were found");
    }

    let nutrition = session.totals();
    match cli_args.format {
        OutputFormat::Text => print!("{}", render_label(&nutrition)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&nutrition).context("Failed to serialize label")?
        ),
    }

    Ok(())
}
