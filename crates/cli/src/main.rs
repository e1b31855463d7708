//! chainopt CLI - autonomous network-parameter optimization agent.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use chainopt_agent::{render_report, CycleOutcome, DecisionLoop};
use chainopt_core::AgentConfig;
use chainopt_oracle::{MetricsCollector, RpcCollector, SimulatedCollector};
use clap::{Args, Parser, Subcommand};
use tokio::sync::watch;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "chainopt")]
#[command(about = "Autonomous network-parameter optimization agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Seconds between decision cycles
    #[arg(long, default_value = "30", env = "CHAINOPT_INTERVAL")]
    interval: u64,

    /// Proposals below this confidence are discarded
    #[arg(long, default_value = "0.75", env = "CHAINOPT_MIN_CONFIDENCE")]
    min_confidence: f64,

    /// Seconds one metrics acquisition may block before the tick is skipped
    #[arg(long, default_value = "10")]
    sample_timeout: u64,

    /// Reserved improvement threshold, accepted for forward compatibility
    #[arg(long, default_value = "0.15", env = "CHAINOPT_OPT_THRESHOLD")]
    optimization_threshold: f64,
}

impl ConfigArgs {
    fn build(&self) -> AgentConfig {
        AgentConfig {
            monitoring_interval: Duration::from_secs(self.interval),
            min_confidence: self.min_confidence,
            sample_timeout: Duration::from_secs(self.sample_timeout),
            optimization_threshold: self.optimization_threshold,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the decision loop until interrupted
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        /// JSON-RPC endpoint to sample; simulated network when absent
        #[arg(long, env = "CHAINOPT_RPC_URL")]
        rpc_url: Option<String>,

        /// Address for the HTTP adapter, e.g. 127.0.0.1:8080
        #[arg(long)]
        http: Option<SocketAddr>,
    },
    /// Run a burst of cycles against the simulated network and print results
    Simulate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Number of decision cycles to run
        #[arg(long, default_value = "25")]
        cycles: usize,
    },
    /// Ask a running agent a question over its HTTP adapter
    Ask {
        /// Question text
        text: String,

        /// Base URL of the agent's HTTP adapter
        #[arg(long, default_value = "http://127.0.0.1:8080", env = "CHAINOPT_ENDPOINT")]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            rpc_url,
            http,
        } => run(config.build(), rpc_url, http).await?,
        Commands::Simulate { config, cycles } => simulate(config.build(), cycles).await,
        Commands::Ask { text, endpoint } => ask(&text, &endpoint).await?,
    }

    Ok(())
}

async fn run(config: AgentConfig, rpc_url: Option<String>, http: Option<SocketAddr>) -> Result<()> {
    let collector: Box<dyn MetricsCollector> = match rpc_url {
        Some(url) => {
            info!(endpoint = %url, "sampling via JSON-RPC");
            Box::new(RpcCollector::new(url))
        }
        None => {
            info!("no RPC endpoint configured; sampling the simulated network");
            Box::new(SimulatedCollector::new())
        }
    };

    let mut agent = DecisionLoop::new(collector, config);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let server = http.map(|addr| {
        let handle = agent.handle();
        let rx = shutdown_rx.clone();
        tokio::spawn(async move { chainopt_server::serve(addr, handle, rx).await })
    });

    let loop_task = tokio::spawn(async move { agent.run(shutdown_rx).await });

    tokio::signal::ctrl_c().await?;
    info!("interrupt received; shutting down");
    let _ = shutdown_tx.send(true);

    loop_task.await??;
    if let Some(server) = server {
        server.await??;
    }

    Ok(())
}

async fn simulate(config: AgentConfig, cycles: usize) {
    let mut agent = DecisionLoop::new(Box::new(SimulatedCollector::new()), config);
    let handle = agent.handle();

    for cycle in 1..=cycles {
        let outcome = agent.run_cycle().await;
        match outcome {
            CycleOutcome::Recorded { .. } => {
                if let Some(proposal) = handle.latest_proposal().await {
                    println!("--- cycle {} ---", cycle);
                    println!("{}", render_report(&proposal));
                }
            }
            CycleOutcome::LowConfidence { confidence } => {
                println!("cycle {}: triggered, confidence {:.0}% too low", cycle, confidence * 100.0);
            }
            _ => {}
        }
    }

    let status = handle.status().await;
    println!(
        "simulated {} cycles: {} snapshots, {} proposals",
        cycles, status.snapshot_count, status.proposal_count
    );
}

async fn ask(text: &str, endpoint: &str) -> Result<()> {
    let reply: serde_json::Value = reqwest::Client::new()
        .post(format!("{}/chat", endpoint.trim_end_matches('/')))
        .json(&serde_json::json!({ "message": text }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    match reply.get("response").and_then(|r| r.as_str()) {
        Some(response) => println!("{}", response),
        None => println!("{}", reply),
    }
    Ok(())
}
