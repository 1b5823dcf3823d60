use clap::Parser;
use form_schema::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> form_schema::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.into_config();
    let schema = form_schema::scrape(&config).await?;

    println!(
        "Saved {} fields to {}",
        schema.fields.len(),
        config.output.display()
    );
    Ok(())
}
