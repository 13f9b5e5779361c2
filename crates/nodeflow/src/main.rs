mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nodeflow")]
#[command(about = "Verify provider credentials and plan cluster topologies", long_about = None)]
struct Cli {
    /// Show verification details and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that an API token has read and write access
    Verify {
        /// Provider (hetzner, digitalocean)
        provider: String,
        /// API token
        #[arg(short, long, env = "NODEFLOW_PROVIDER_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Generate the node list for a cluster without creating anything
    Topology {
        /// Cluster name
        #[arg(short, long)]
        name: String,
        /// Provider (hetzner, digitalocean)
        #[arg(short, long)]
        provider: String,
        /// Region slug
        #[arg(short, long)]
        region: String,
        /// Server type id
        #[arg(short = 't', long)]
        server_type: String,
        /// Number of worker nodes
        #[arg(short, long, default_value = "3")]
        workers: u32,
        /// Number of dedicated storage nodes
        #[arg(short, long, default_value = "3")]
        storage: u32,
        /// Run storage on the worker nodes
        #[arg(long)]
        shared: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Browse provider regions and server types
    #[command(subcommand)]
    Catalog(CatalogCommands),
    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub(crate) enum CatalogCommands {
    /// List regions grouped by continent
    Regions {
        /// Provider (hetzner, digitalocean)
        provider: String,
    },
    /// List server types with their specs
    ServerTypes {
        /// Provider (hetzner, digitalocean)
        provider: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Verify { provider, token } => {
            commands::verify::handle(&provider, token, cli.verbose).await?;
        }
        Commands::Topology {
            name,
            provider,
            region,
            server_type,
            workers,
            storage,
            shared,
            json,
        } => {
            let request = commands::topology::build_request(
                name,
                &provider,
                region,
                server_type,
                workers,
                storage,
                shared,
            )?;
            commands::topology::handle(request, json)?;
        }
        Commands::Catalog(catalog_cmd) => {
            commands::catalog::handle(catalog_cmd)?;
        }
        Commands::Version => {
            println!("nodeflow {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
