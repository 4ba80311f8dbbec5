//! Greeter dapp (v1)
//!
//! Console demo of a wallet session driving a one-string smart contract.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                         GREETER DAPP                         │
//!   │                                                              │
//!   │  stdin ──▶ console ──▶ session::Dapp (guarded Stage)         │
//!   │                           │                                  │
//!   │            ┌──────────────┼───────────────┐                  │
//!   │            ▼              ▼               ▼                  │
//!   │      auth adapter   WalletProvider   GreeterArtifact         │
//!   │     (login/logout)  (RPC + signing)  (creation code)         │
//!   │                           │                                  │
//!   │  ┌────────────────────────┼───────────────────────────────┐  │
//!   │  │ Cross-cutting: config · logging · metrics              │  │
//!   │  └────────────────────────┼───────────────────────────────┘  │
//!   └───────────────────────────┼──────────────────────────────────┘
//!                               ▼
//!                        JSON-RPC node (testnet)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use greeter_dapp::auth::LocalKeyAdapter;
use greeter_dapp::blockchain::GreeterArtifact;
use greeter_dapp::config::{load_config, AppConfig};
use greeter_dapp::observability::{logging, metrics};
use greeter_dapp::{console, Dapp};

#[derive(Parser)]
#[command(name = "greeter-dapp")]
#[command(about = "Log in with a wallet, deploy a greeter contract and talk to it", long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hex bytecode file, overriding contract.bytecode_path
    #[arg(short, long)]
    artifact: Option<PathBuf>,

    /// Log level, overriding observability.log_level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    logging::init_logging(&log_level);

    tracing::info!("greeter-dapp v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        network = %config.network.display_name,
        chain_id = config.network.chain_id,
        rpc_url = %config.network.rpc_url,
        verifier = %config.login.verifier,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let artifact = match &args.artifact {
        Some(path) => GreeterArtifact::load(path)?,
        None => match GreeterArtifact::load(&PathBuf::from(&config.contract.bytecode_path)) {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::warn!(error = %e, "Using built-in greeter bytecode");
                GreeterArtifact::builtin()?
            }
        },
    };

    let adapter = Arc::new(LocalKeyAdapter::new(config.login.clone(), config.rpc.clone()));
    let dapp = Dapp::new(config, artifact);

    // The shell still starts after a failed init so `status` can be inspected.
    if let Err(e) = dapp.initialize(adapter).await {
        eprintln!("{}", console::init_failure_notice(&e));
    }

    console::run(&dapp, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
