use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod core;
mod orbit;
mod tle;
mod tracker;

use crate::core::settings::Settings;

#[derive(Parser)]
#[command(name = "overhead-gps")]
#[command(author, version, about = "Show which GPS satellite is closest to your zenith")]
struct Cli {
    /// Config file (default: <config dir>/overhead-gps/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Track the overhead satellite every second until interrupted (default)
    Track {
        #[command(flatten)]
        observer: ObserverArgs,
    },

    /// Print the current overhead satellite once
    Now {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        observer: ObserverArgs,
    },

    /// Refresh the cached TLE file if it is outdated
    Refresh {
        /// Download even if the cached file is still fresh
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Default)]
struct ObserverArgs {
    /// Observer latitude in degrees (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
}

impl ObserverArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(lat) = self.lat {
            settings.observer.latitude = lat;
        }
        if let Some(lon) = self.lon {
            settings.observer.longitude = lon;
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the tracking display
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_settings(path: Option<&std::path::Path>, observer: Option<&ObserverArgs>) -> anyhow::Result<Settings> {
    let mut settings = Settings::load(path)?;
    if let Some(observer) = observer {
        observer.apply(&mut settings);
    }
    settings.validate()?;
    Ok(settings)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let command = cli.command.unwrap_or(Commands::Track {
        observer: ObserverArgs::default(),
    });

    match command {
        Commands::Track { observer } => {
            init_logging();
            let settings = load_settings(config, Some(&observer))?;
            cli::track::run(&settings).await
        }
        Commands::Now { json, observer } => {
            init_logging();
            let settings = load_settings(config, Some(&observer))?;
            cli::now::run(&settings, json).await
        }
        Commands::Refresh { force } => {
            init_logging();
            let settings = load_settings(config, None)?;
            cli::refresh::run(&settings, force).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_track() {
        let cli = Cli::try_parse_from(["overhead-gps"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_negative_longitude_override() {
        let cli = Cli::try_parse_from(["overhead-gps", "now", "--lat", "38.4", "--lon", "-107.8"]).unwrap();
        let Some(Commands::Now { observer, json }) = cli.command else {
            panic!("expected now command");
        };
        assert!(!json);

        let mut settings = Settings::default();
        observer.apply(&mut settings);
        assert_eq!(settings.observer.latitude, 38.4);
        assert_eq!(settings.observer.longitude, -107.8);
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["overhead-gps", "refresh", "--force", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Some(Commands::Refresh { force: true })));
    }
}
