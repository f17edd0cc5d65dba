use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::demo;
use workbench::{tui, Settings, Workbench, WorkbenchConfig};

/// Workbench - modules as tiles and tabs in your terminal
#[derive(Parser, Debug)]
#[command(
    name = "workbench",
    version,
    about = "Modules as tiles and tabs in your terminal",
    long_about = r#"Workbench hosts a set of modules on a paged home screen. Opened modules
become tabs; a navigation drawer and dialogs are shown on top.

Examples:
  workbench                         # Start interactive mode
  workbench --modules-per-page 6    # Smaller home-screen pages
  workbench settings                # Print the resolved settings"#
)]
pub struct Cli {
    /// Settings file to use instead of the default search path
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Tiles per home-screen page
    #[arg(long = "modules-per-page", global = true)]
    pub modules_per_page: Option<usize>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Log to stderr instead of the log file
    #[arg(long = "log-stderr", global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved settings as JSON
    Settings,
}

impl Cli {
    /// Settings from file and environment with command-line overrides applied
    pub async fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::init(self.config.as_deref()).await?;
        if let Some(modules_per_page) = self.modules_per_page {
            settings.modules_per_page = modules_per_page;
        }
        settings.validate()?;
        Ok(settings)
    }

    pub async fn execute(self, settings: Settings) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        match self.command {
            Some(Commands::Settings) => {
                println!("{}", serde_json::to_string_pretty(&settings)?);
                Ok(())
            }
            None => start_interactive_mode(settings).await,
        }
    }
}

async fn start_interactive_mode(settings: Settings) -> Result<()> {
    info!("Starting interactive mode");

    let modules = demo::modules();
    let config = WorkbenchConfig::new(modules.clone())
        .with_settings(&settings)
        .navigation_drawer_items(demo::navigation_drawer_items(&modules))
        .toolbar_controls(demo::toolbar_controls());
    let workbench = Workbench::new(config)?;

    tui::run(workbench, settings).await?;

    info!("Application finished");
    Ok(())
}
