use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tokio::net::TcpListener;
use weather_core::{Config, OpenWeatherProvider};

use crate::routes::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather proxy service")]
pub struct Cli {
    /// Path to the TOML config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service (default).
    Serve {
        /// Listen address, e.g. "0.0.0.0:8080". Overrides config and WEATHER_BIND.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Prompt for the OpenWeather API key and store it in the config file.
    Configure,

    /// Print the config file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command.unwrap_or(Command::Serve { bind: None }) {
            Command::Serve { bind } => serve(&path, bind).await,
            Command::Configure => configure(&path),
            Command::ConfigPath => {
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

async fn serve(path: &std::path::Path, bind: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load_from(path)?;
    if let Some(bind) = bind {
        config.bind = bind;
    }

    if !config.has_real_api_key() {
        tracing::warn!(
            "No OpenWeather API key configured; set OPENWEATHER_API_KEY or run `weather-server configure`"
        );
    }

    let provider = Arc::new(OpenWeatherProvider::new(&config));
    let app = routes::router(AppState::new(provider.clone(), provider));

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn configure(path: &std::path::Path) -> anyhow::Result<()> {
    let mut config = Config::read_file(path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.api_key = api_key.trim().to_string();
    config.save_to(path)?;

    println!("Saved API key to {}", path.display());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
