use crate::CatalogCommands;
use colored::Colorize;
use nodeflow_cloud::{ProviderType, catalog};

pub fn handle(cmd: CatalogCommands) -> anyhow::Result<()> {
    match cmd {
        CatalogCommands::Regions { provider } => {
            let provider = lookup(&provider)?;
            for continent in catalog::regions(provider) {
                println!("{}", continent.name.bold());
                for region in continent.regions {
                    println!("  {:<8} {}", region.slug.cyan(), region.name);
                }
            }
        }
        CatalogCommands::ServerTypes { provider } => {
            let provider = lookup(&provider)?;
            for server in catalog::server_types(provider) {
                println!(
                    "{:<16} {:<28} {:>2} vCPU {:>4}GB RAM {:>5}GB disk",
                    server.id.cyan(),
                    server.display_name,
                    server.specs.cpu,
                    server.specs.ram_gb,
                    server.specs.disk_gb
                );
            }
        }
    }
    Ok(())
}

fn lookup(provider: &str) -> anyhow::Result<ProviderType> {
    let provider: ProviderType = provider.parse()?;
    if catalog::catalog(provider).is_none() {
        anyhow::bail!("No catalog available for {}", provider.display_name());
    }
    Ok(provider)
}
