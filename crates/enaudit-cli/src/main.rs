use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "enaudit-cli", version, about = "Energy audit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Building and room management
    Building {
        #[command(subcommand)]
        action: commands::building::BuildingAction,
    },
    /// Illumination calculations
    Illumination {
        #[command(subcommand)]
        action: commands::illumination::IlluminationAction,
    },
    /// Load schedule calculations
    Load {
        #[command(subcommand)]
        action: commands::load::LoadAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Building { action } => commands::building::run(action),
        Commands::Illumination { action } => commands::illumination::run(action),
        Commands::Load { action } => commands::load::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
