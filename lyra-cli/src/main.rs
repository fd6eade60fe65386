use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use lyra_core::account::{MediaServicesAccount, StorageBinding};
use lyra_core::reconciler::{ReadOutcome, Reconciler};
use lyra_core::validation;
use lyra_provider_azure::{
    ArmClientConfig, ArmMediaServicesClient, ClientSecretCredential, StaticTokenCredential,
    TokenCredential,
};

#[derive(Parser)]
#[command(name = "lyra")]
#[command(about = "Reconcile Azure Media Services accounts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a manifest without touching Azure
    Validate {
        /// Path to the account manifest
        #[arg(default_value = "account.json")]
        file: PathBuf,
    },
    /// Create or update the account described by a manifest
    Apply {
        /// Path to the account manifest
        #[arg(default_value = "account.json")]
        file: PathBuf,
    },
    /// Show the remote state of an account by resource ID
    Read {
        /// Full resource ID of the account
        id: String,
    },
    /// Delete an account by resource ID
    Destroy {
        /// Full resource ID of the account
        id: String,

        /// Skip confirmation prompt (auto-approve)
        #[arg(long)]
        auto_approve: bool,
    },
}

/// Manifest mirroring the declarative configuration surface
#[derive(Debug, Deserialize)]
struct Manifest {
    name: String,
    location: String,
    resource_group_name: String,
    #[serde(default)]
    tags: HashMap<String, String>,
    #[serde(default)]
    storage_account: Vec<StorageAccountBlock>,
}

#[derive(Debug, Deserialize)]
struct StorageAccountBlock {
    id: String,
    is_primary: bool,
}

impl Manifest {
    fn into_account(self) -> MediaServicesAccount {
        MediaServicesAccount {
            name: self.name,
            location: self.location,
            resource_group: self.resource_group_name,
            tags: self.tags,
            storage_accounts: self
                .storage_account
                .into_iter()
                .map(|block| StorageBinding {
                    id: block.id,
                    is_primary: block.is_primary,
                })
                .collect(),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("{}", "Interrupt received, cancelling...".yellow());
                cancel.cancel();
            }
        });
    }

    let result = match cli.command {
        Commands::Validate { file } => run_validate(&file),
        Commands::Apply { file } => run_apply(&file, cancel).await,
        Commands::Read { id } => run_read(&id, cancel).await,
        Commands::Destroy { id, auto_approve } => run_destroy(&id, auto_approve, cancel).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_manifest(path: &Path) -> Result<MediaServicesAccount, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid manifest {}: {e}", path.display()))?;
    Ok(manifest.into_account())
}

fn env_var(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("{name} is not set"))
}

fn build_client(cancel: CancellationToken) -> Result<ArmMediaServicesClient, String> {
    let subscription_id = env_var("AZURE_SUBSCRIPTION_ID")?;
    let http = reqwest::Client::new();

    // A pre-issued token wins over the service-principal flow
    let credential: Arc<dyn TokenCredential> =
        if let Ok(token) = std::env::var("AZURE_ACCESS_TOKEN") {
            Arc::new(StaticTokenCredential::new(token))
        } else {
            Arc::new(ClientSecretCredential::new(
                http.clone(),
                env_var("AZURE_TENANT_ID")?,
                env_var("AZURE_CLIENT_ID")?,
                env_var("AZURE_CLIENT_SECRET")?,
            ))
        };

    let mut config = ArmClientConfig::new(subscription_id);
    if let Ok(endpoint) = std::env::var("ARM_ENDPOINT") {
        config = config.with_endpoint(endpoint);
    }

    Ok(ArmMediaServicesClient::new(http, config, credential, cancel))
}

fn run_validate(file: &Path) -> Result<(), String> {
    let account = load_manifest(file)?;

    validation::validate_account_name(&account.name).map_err(|e| e.to_string())?;
    let entries =
        validation::expand_storage_accounts(&account.storage_accounts).map_err(|e| e.to_string())?;

    println!(
        "{} {} ({} storage {})",
        "Valid:".green().bold(),
        account.name,
        entries.len(),
        if entries.len() == 1 { "account" } else { "accounts" }
    );
    Ok(())
}

async fn run_apply(file: &Path, cancel: CancellationToken) -> Result<(), String> {
    let account = load_manifest(file)?;
    let client = build_client(cancel)?;
    let reconciler = Reconciler::new(client);

    let id = reconciler
        .create_or_update(&account)
        .await
        .map_err(|e| e.to_string())?;

    println!("{} {}", "Applied:".green().bold(), account.name);
    println!("id = {id}");
    Ok(())
}

async fn run_read(id: &str, cancel: CancellationToken) -> Result<(), String> {
    let client = build_client(cancel)?;
    let reconciler = Reconciler::new(client);

    match reconciler.read(id).await.map_err(|e| e.to_string())? {
        ReadOutcome::Found(account) => {
            println!("name     = {}", account.name);
            if let Some(location) = &account.location {
                println!("location = {location}");
            }
            let mut tags: Vec<_> = account.tags.iter().collect();
            tags.sort();
            for (key, value) in tags {
                println!("tags.{key} = {value}");
            }
        }
        ReadOutcome::Absent => {
            println!(
                "{}",
                "Account not found; it would be removed from local state.".yellow()
            );
        }
    }
    Ok(())
}

async fn run_destroy(id: &str, auto_approve: bool, cancel: CancellationToken) -> Result<(), String> {
    if !auto_approve {
        println!(
            "{}",
            "This action cannot be undone. Type 'yes' to confirm.".yellow()
        );
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(|e| e.to_string())?;
        if answer.trim() != "yes" {
            println!("{}", "Destroy cancelled.".yellow());
            return Ok(());
        }
    }

    let client = build_client(cancel)?;
    let reconciler = Reconciler::new(client);
    reconciler.delete(id).await.map_err(|e| e.to_string())?;

    println!("{} {id}", "Destroyed:".green().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_maps_to_the_typed_account() {
        let raw = r#"{
            "name": "ams-2",
            "location": "UK West",
            "resource_group_name": "media-rg",
            "tags": { "environment": "staging" },
            "storage_account": [
                { "id": "sa1", "is_primary": true },
                { "id": "sa2", "is_primary": false }
            ]
        }"#;

        let manifest: Manifest = serde_json::from_str(raw).unwrap();
        let account = manifest.into_account();

        assert_eq!(account.name, "ams-2");
        assert_eq!(account.resource_group, "media-rg");
        assert_eq!(account.storage_accounts.len(), 2);
        assert!(account.storage_accounts[0].is_primary);
        assert!(!account.storage_accounts[1].is_primary);
    }

    #[test]
    fn tags_and_storage_accounts_are_optional() {
        let raw = r#"{
            "name": "ams-2",
            "location": "westus",
            "resource_group_name": "media-rg"
        }"#;

        let manifest: Manifest = serde_json::from_str(raw).unwrap();
        let account = manifest.into_account();

        assert!(account.tags.is_empty());
        assert!(account.storage_accounts.is_empty());
    }
}
