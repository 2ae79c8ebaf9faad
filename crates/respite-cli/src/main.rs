use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "respite-cli", version, about = "Work/break timer with remote playback control")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive timer session
    Run,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Playback service authorization
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Playback transport control
    Playback {
        #[command(subcommand)]
        action: commands::playback::PlaybackAction,
    },
    /// User profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
}

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr so they never mix with the session display.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run => commands::run::run().await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Playback { action } => commands::playback::run(action).await,
        Commands::Profile { action } => commands::profile::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
