//! holder-gate: verify that a wallet holds enough assets from a collection.

use anyhow::Context;
use clap::Parser;
use gate_backend::HttpVerificationBackend;
use gate_index::{HeliusIndexClient, OwnershipIndex};
use gate_types::{ExternalIdentity, VerificationOutcome, VerificationStatus, WalletAddress, WalletState};
use gate_utils::LogFormat;
use gate_verification::{identity_from_page_url, GateConfig, OwnershipRule, VerificationWorkflow};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "holder-gate", about = "NFT holder verification gate")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "GATE_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the DAS ownership index.
    #[arg(long, env = "GATE_INDEX_URL")]
    index_url: Option<String>,

    /// API key for the ownership index.
    #[arg(long, env = "GATE_INDEX_API_KEY", hide_env_values = true)]
    index_api_key: Option<String>,

    /// Target collection identifier.
    #[arg(long, env = "GATE_COLLECTION")]
    collection: Option<String>,

    /// Minimum number of matching assets.
    #[arg(long, env = "GATE_REQUIRED_COUNT")]
    required_count: Option<u32>,

    /// Base URL of the verification backend.
    #[arg(long, env = "GATE_BACKEND_URL")]
    backend_url: Option<String>,

    /// Shared secret sent to the backend.
    #[arg(long, env = "GATE_BACKEND_SECRET", hide_env_values = true)]
    backend_secret: Option<String>,

    /// Marketplace link shown when a wallet holds too few assets.
    #[arg(long, env = "GATE_MARKETPLACE_URL")]
    marketplace_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "GATE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a full verification session for one wallet.
    Verify {
        /// Page URL carrying the `tgUserId` parameter.
        #[arg(long, conflicts_with = "tg_user_id")]
        page_url: Option<String>,

        /// Telegram user id, instead of a page URL.
        #[arg(long)]
        tg_user_id: Option<String>,

        /// Wallet address to check.
        #[arg(long)]
        owner: WalletAddress,

        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Count matching assets for a wallet without notifying the backend.
    Count {
        /// Wallet address to check.
        #[arg(long)]
        owner: WalletAddress,
    },
}

/// Apply CLI/env overrides on top of a file (or default) configuration.
fn layer_config(base: GateConfig, cli: &Cli) -> GateConfig {
    GateConfig {
        index_url: cli.index_url.clone().unwrap_or(base.index_url),
        index_api_key: cli.index_api_key.clone().unwrap_or(base.index_api_key),
        collection: cli.collection.clone().unwrap_or(base.collection),
        required_count: cli.required_count.unwrap_or(base.required_count),
        backend_url: cli.backend_url.clone().or(base.backend_url),
        backend_secret: cli.backend_secret.clone().or(base.backend_secret),
        marketplace_url: cli.marketplace_url.clone().or(base.marketplace_url),
        log_format: cli.log_format.unwrap_or(base.log_format),
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<GateConfig> {
    let base = match &cli.config {
        Some(path) => GateConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GateConfig::default(),
    };
    Ok(layer_config(base, cli))
}

fn print_outcome(owner: &WalletAddress, outcome: &VerificationOutcome) {
    println!("Connected: {}", owner.abbreviated());
    println!("{}", outcome.status.headline());
    if outcome.status.holdings_verified() {
        println!("You hold {} NFTs from the collection.", outcome.owned_count);
    }
    if let Some(message) = &outcome.message {
        println!("{message}");
    }
    if let Some(url) = &outcome.marketplace_hint {
        println!("Buy more NFTs: {url}");
    }
}

async fn run_verify(
    config: &GateConfig,
    identity: Option<ExternalIdentity>,
    owner: WalletAddress,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let index = HeliusIndexClient::new(config.index_url.clone(), config.index_api_key.clone())?;
    let backend =
        HttpVerificationBackend::new(config.backend_url.clone(), config.backend_secret.clone());
    let workflow = VerificationWorkflow::new(config, identity, index, backend)?;

    let outcome = workflow
        .wallet_changed(WalletState::connected(owner.clone()))
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&owner, &outcome);
    }

    tracing::info!(
        status = %outcome.status,
        owned = outcome.owned_count,
        "verification session finished"
    );
    Ok(if outcome.status == VerificationStatus::BackendNotified {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_count(config: &GateConfig, owner: WalletAddress) -> anyhow::Result<ExitCode> {
    config.validate()?;
    let index = HeliusIndexClient::new(config.index_url.clone(), config.index_api_key.clone())?;
    let assets = index.assets_by_owner(&owner).await?;
    let rule = OwnershipRule::from_config(config);

    match rule.evaluate(&assets) {
        Ok(count) => {
            println!(
                "{}: {count} of {} required assets from {} (pass)",
                owner.abbreviated(),
                rule.required_count,
                rule.collection
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}: {e}", owner.abbreviated());
            Ok(ExitCode::FAILURE)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    gate_utils::init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::Verify {
            page_url,
            tg_user_id,
            owner,
            json,
        } => {
            let identity = match (page_url, tg_user_id) {
                (Some(url), _) => identity_from_page_url(&url),
                (None, Some(id)) => ExternalIdentity::new(id),
                (None, None) => None,
            };
            if identity.is_none() {
                tracing::warn!("no tgUserId supplied; nothing will be checked");
            }
            run_verify(&config, identity, owner, json).await
        }
        Command::Count { owner } => run_count(&config, owner).await,
    }
}
