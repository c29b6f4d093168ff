//! Command routing and execution

use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::abstractions::{ReqwestWebhookClient, WebhookClient};
use crate::analysis::{demo_report, AnalysisSubmitter};
use crate::cli::args::{Commands, SettingsCommands};
use crate::cli::output;
use crate::config::AppConfig;
use crate::connection::ConnectionTester;
use crate::error::Error;
use crate::intake::ContractDraft;
use crate::settings::{JsonFileStore, MemoryStore, SettingsStore, SharedSettings};

/// Everything one invocation works with
pub struct App {
    pub settings: SharedSettings,
    pub client: Arc<dyn WebhookClient>,
}

impl App {
    /// With `ephemeral`, settings live in memory and start empty
    pub fn from_config(config: &AppConfig, ephemeral: bool) -> Result<Self> {
        let store = if ephemeral {
            debug!("Ephemeral run: settings are kept in memory only");
            SettingsStore::new(MemoryStore::new())
        } else {
            debug!("Using settings file {}", config.settings_path.display());
            SettingsStore::new(JsonFileStore::new(&config.settings_path))
        };
        let client = ReqwestWebhookClient::new(config.request_timeout())
            .context("Failed to set up the webhook client")?;
        Ok(Self {
            settings: SharedSettings::new(store),
            client: Arc::new(client),
        })
    }
}

/// Turn a library error into the message the user sees
fn user_error(err: Error) -> anyhow::Error {
    anyhow!(err.user_message())
}

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Settings { command } => run_settings(app, command),
        Commands::TestConnection { url } => run_test_connection(app, url).await,
        Commands::Analyze {
            text,
            file,
            file_name,
            url,
            json,
            demo,
        } => {
            if demo {
                return run_demo(json);
            }
            run_analyze(app, text, file, file_name, url, json).await
        }
    }
}

fn run_settings(app: &App, command: SettingsCommands) -> Result<()> {
    match command {
        SettingsCommands::Show { json } => {
            let settings = app.settings.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&output::settings_json(&settings))?);
            } else {
                println!("{}", output::render_settings(&settings));
            }
        }
        SettingsCommands::Set {
            webhook_url,
            api_key,
            no_save,
        } => {
            if webhook_url.is_none() && api_key.is_none() {
                bail!("Nothing to change: pass --webhook-url and/or --api-key");
            }
            if let Some(url) = webhook_url {
                app.settings.set_webhook_url(url);
            }
            if let Some(key) = api_key {
                app.settings.set_api_key(key);
            }
            if no_save {
                println!("Settings changed for this run only");
            } else {
                app.settings.save();
                println!("Settings saved");
            }
        }
    }
    Ok(())
}

async fn run_test_connection(app: &App, url: Option<String>) -> Result<()> {
    let tester = ConnectionTester::new(Arc::clone(&app.client), app.settings.clone());
    let outcome = match url {
        Some(url) => tester.test_connection(&url).await,
        None => tester.test_configured().await,
    }
    .map_err(user_error)?;

    if !outcome.is_connected() {
        bail!(outcome.message());
    }
    println!("{}", outcome.message());
    Ok(())
}

async fn run_analyze(
    app: &App,
    text: Option<String>,
    file: Option<PathBuf>,
    file_name: Option<String>,
    url: Option<String>,
    json: bool,
) -> Result<()> {
    let mut draft = ContractDraft::default();
    if let Some(path) = file {
        draft
            .load_file(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }
    if let Some(text) = text {
        draft.set_text(text);
    }
    if let Some(name) = file_name {
        draft.file_name = Some(name);
    }
    if let Some(url) = url {
        app.settings.set_webhook_url(url);
    }

    let submitter = AnalysisSubmitter::new(Arc::clone(&app.client), app.settings.clone());
    let result = submitter.submit_draft(&draft).await.map_err(user_error)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output::result_json(&result))?);
    } else {
        println!("{}", output::render_result(&result));
    }
    Ok(())
}

fn run_demo(json: bool) -> Result<()> {
    let demo = demo_report();
    if json {
        println!("{}", serde_json::to_string_pretty(&output::demo_json(&demo))?);
    } else {
        println!("{}", output::render_demo(&demo));
    }
    Ok(())
}
