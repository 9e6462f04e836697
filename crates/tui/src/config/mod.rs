use clap::Parser;
use serde::Deserialize;
use tracker::{BudgetSavePolicy, TrackerOptions};

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Pre-filled on the login screen.
    pub email: String,
    /// Label printed after amounts.
    pub currency: String,
    pub log_file: String,
    pub log_level: String,
    /// Revert the displayed budget when saving it fails.
    pub budget_rollback: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://paas-crud-app.onrender.com".to_string(),
            email: String::new(),
            currency: "PLN".to_string(),
            log_file: "tracker_tui.log".to_string(),
            log_level: "info".to_string(),
            budget_rollback: true,
        }
    }
}

impl AppConfig {
    pub fn tracker_options(&self) -> TrackerOptions {
        let budget_policy = if self.budget_rollback {
            BudgetSavePolicy::Revert
        } else {
            BudgetSavePolicy::Keep
        };
        TrackerOptions { budget_policy }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tracker_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL of the expense API.
    #[arg(long)]
    base_url: Option<String>,
    /// Override login email (password is never read from CLI).
    #[arg(long)]
    email: Option<String>,
    /// Override currency label.
    #[arg(long)]
    currency: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("TRACKER_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(email) = args.email {
        settings.email = email;
    }
    if let Some(currency) = args.currency {
        settings.currency = currency;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
