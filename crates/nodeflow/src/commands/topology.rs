use colored::Colorize;
use nodeflow_cloud::{CloudError, ClusterRequest, NodeRecord, ProviderType};
use nodeflow_provision::ProvisionError;

pub fn build_request(
    name: String,
    provider: &str,
    region: String,
    server_type_id: String,
    worker_count: u32,
    storage_count: u32,
    shared_storage_worker: bool,
) -> anyhow::Result<ClusterRequest> {
    let provider: ProviderType = provider.parse()?;
    Ok(ClusterRequest {
        name,
        provider,
        region,
        server_type_id,
        worker_count,
        storage_count,
        shared_storage_worker,
    })
}

pub fn handle(request: ClusterRequest, json: bool) -> anyhow::Result<()> {
    let nodes = match nodeflow_provision::cluster::plan(request) {
        Ok(nodes) => nodes,
        Err(ProvisionError::Cloud(CloudError::Validation(errors))) => {
            eprintln!("{}", "Invalid cluster request:".red().bold());
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field.yellow(), message);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else {
        print_table(&nodes);
    }
    Ok(())
}

fn print_table(nodes: &[NodeRecord]) {
    println!(
        "{:<28} {:<8} {:<14} {:>4} {:>6} {:>7}",
        "LABEL".bold(),
        "ROLE".bold(),
        "TYPE".bold(),
        "CPU".bold(),
        "RAM".bold(),
        "DISK".bold()
    );
    for node in nodes {
        println!(
            "{:<28} {:<8} {:<14} {:>4} {:>4}GB {:>5}GB",
            node.node_label.cyan(),
            node.role.to_string(),
            node.server_type_id,
            node.cpu_cores,
            node.ram_gb,
            node.disk_gb
        );
    }
    println!();
    println!("{} node(s), {}", nodes.len(), nodeflow_cloud::topology::NODE_OS.dimmed());
}
