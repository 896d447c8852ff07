use clap::Parser;
use ghprofile::{
    cli::{commands, Cli, Commands},
    config::Settings,
    Result,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!("{}", e.log_safe());
        eprintln!("\x1b[31m\u{2717}\x1b[0m {}", e.user_message());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging; stdout is reserved for the rendered profile
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,ghprofile=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::from_env()?;

    match cli.command {
        Commands::Lookup {
            username,
            pages,
            json,
            display,
        } => {
            commands::apply_display_args(&mut settings, &display);
            settings.validate()?;
            commands::lookup(settings, &username, pages, json, &display).await?;
        }
        Commands::Interactive { username, display } => {
            commands::apply_display_args(&mut settings, &display);
            settings.validate()?;
            commands::interactive(settings, username, &display).await?;
        }
        Commands::Theme { action } => {
            commands::theme(settings, &action).await?;
        }
    }

    Ok(())
}
