//! Command-line access to Disco address resolution.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use disco_client::{DataClient, Escalate};
use disco_core::{Address, DEFAULT_NODE, EnvSettings, PartitionId};
use disco_transport::HttpTransport;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "discoctl")]
#[command(about = "Resolve Disco addresses and fetch job data")]
#[command(version)]
struct Cli {
    /// Settings file, overridden by DISCO_* environment variables
    #[arg(long, global = true, env = "DISCO_SETTINGS")]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the scheme, authority and path of an address
    Parse { address: String },
    /// Print the scheme://authority base of an address
    Host { address: String },
    /// Print the job name encoded in an output address
    Jobname { address: String },
    /// Print the URL serving a storage path from a node
    ProxyUrl {
        path: String,
        /// Node holding the data
        #[arg(long, default_value = DEFAULT_NODE)]
        node: String,
    },
    /// Expand an address into its URLs, one per line
    Urllist { address: String },
    /// List the URLs of a directory index, one per line
    Dir {
        address: String,
        /// Only list URLs of this partition
        #[arg(long, allow_negative_numbers = true)]
        partition: Option<PartitionId>,
    },
    /// Fetch an out-of-band value
    Oob {
        /// Control-plane base URL (e.g., http://master:8989)
        host: String,
        /// Dataset (job) name
        name: String,
        key: String,
        /// Write the value to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output only.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = match &cli.config {
        Some(path) => EnvSettings::with_file(path),
        None => EnvSettings::new(),
    };
    let transport = HttpTransport::with_timeout(cli.timeout.map(Duration::from_secs))
        .context("failed to build HTTP client")?;
    let client = DataClient::new(settings, transport);

    run(&client, cli.command).await
}

async fn run(client: &DataClient, command: Commands) -> Result<()> {
    match command {
        Commands::Parse { address } => {
            let settings = client.settings().context("failed to load settings")?;
            let parsed = Address::parse(&address, &settings);
            println!("scheme: {}", parsed.scheme());
            println!("authority: {}", parsed.authority());
            println!("path: {}", parsed.path());
        }
        Commands::Host { address } => {
            let settings = client.settings().context("failed to load settings")?;
            println!("{}", Address::parse(&address, &settings).host());
        }
        Commands::Jobname { address } => {
            println!("{}", client.job_name(&address)?);
        }
        Commands::ProxyUrl { path, node } => {
            println!("{}", client.proxy_url(&path, &node)?);
        }
        Commands::Urllist { address } => {
            let urls = client
                .urllist(&address)
                .await
                .escalate_data("failed to expand address", &address)?;
            print_lines(&urls);
        }
        Commands::Dir { address, partition } => {
            let urls = client
                .resolve_directory(&address, partition)
                .await
                .escalate_data("failed to read directory index", &address)?;
            print_lines(&urls);
        }
        Commands::Oob {
            host,
            name,
            key,
            output,
        } => {
            let value = client
                .load_oob(&host, &name, &key)
                .await
                .escalate(&format!("failed to load out-of-band value {name}/{key}"))?;
            match output {
                Some(path) => tokio::fs::write(&path, &value)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => {
                    let mut stdout = tokio::io::stdout();
                    stdout.write_all(&value).await?;
                    stdout.flush().await?;
                }
            }
        }
    }
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
