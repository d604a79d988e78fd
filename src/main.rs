use clap::Parser;
use recache::cli::{Cli, Commands};
use recache::types::config::Config;
use recache::CacheResult;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> CacheResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default_config()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("recache={}", log_level)
            .parse::<Directive>()
            .unwrap_or_else(|_| {
                "recache=info"
                    .parse::<Directive>()
                    .expect("fallback directive is valid")
            }),
    );

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            recache::cli::commands::init(path).await?;
        }
        Commands::Check => {
            recache::cli::commands::check(&config, &cli.config).await?;
        }
        Commands::Replay {
            script,
            max_items,
            json,
        } => {
            recache::cli::commands::replay(&script, max_items, json, &config).await?;
        }
        Commands::Version => {
            recache::cli::commands::version();
        }
    }

    Ok(())
}
