//! Static region and server-type tables per provider
//!
//! Reference data shipped with NodeFlow. Tables are immutable statics, so there
//! is no mutation path and concurrent reads need no synchronization.

use crate::provider::ProviderType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// CPU, memory and disk of a server type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSpecs {
    pub cpu: u32,
    pub ram_gb: u32,
    pub disk_gb: u32,
}

impl ServerSpecs {
    pub const fn new(cpu: u32, ram_gb: u32, disk_gb: u32) -> Self {
        Self {
            cpu,
            ram_gb,
            disk_gb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerType {
    pub id: &'static str,
    pub display_name: &'static str,
    pub specs: ServerSpecs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: &'static str,
    pub slug: &'static str,
}

/// Regions grouped under a continent heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Continent {
    pub name: &'static str,
    pub regions: &'static [Region],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProviderCatalog {
    pub continents: &'static [Continent],
    pub server_types: &'static [ServerType],
}

const fn server(
    id: &'static str,
    display_name: &'static str,
    cpu: u32,
    ram_gb: u32,
    disk_gb: u32,
) -> ServerType {
    ServerType {
        id,
        display_name,
        specs: ServerSpecs::new(cpu, ram_gb, disk_gb),
    }
}

const fn region(name: &'static str, slug: &'static str) -> Region {
    Region { name, slug }
}

static HETZNER: ProviderCatalog = ProviderCatalog {
    continents: &[
        Continent {
            name: "Europe",
            regions: &[
                region("Falkenstein", "fsn1"),
                region("Nuremberg", "nbg1"),
                region("Helsinki", "hel1"),
            ],
        },
        Continent {
            name: "North America",
            regions: &[region("Ashburn, VA", "ash"), region("Hillsboro, OR", "hil")],
        },
        Continent {
            name: "Asia",
            regions: &[region("Singapore", "sin")],
        },
    ],
    server_types: &[
        server("cx22", "CX22 (shared vCPU)", 2, 4, 40),
        server("cx32", "CX32 (shared vCPU)", 4, 8, 80),
        server("cx42", "CX42 (shared vCPU)", 8, 16, 160),
        server("cx52", "CX52 (shared vCPU)", 16, 32, 320),
        server("cpx11", "CPX11 (shared AMD)", 2, 2, 40),
        server("cpx21", "CPX21 (shared AMD)", 3, 4, 80),
        server("cpx31", "CPX31 (shared AMD)", 4, 8, 160),
        server("cpx41", "CPX41 (shared AMD)", 8, 16, 240),
        server("cpx51", "CPX51 (shared AMD)", 16, 32, 360),
        server("ccx13", "CCX13 (dedicated)", 2, 8, 80),
        server("ccx23", "CCX23 (dedicated)", 4, 16, 160),
        server("ccx33", "CCX33 (dedicated)", 8, 32, 240),
    ],
};

static DIGITALOCEAN: ProviderCatalog = ProviderCatalog {
    continents: &[
        Continent {
            name: "North America",
            regions: &[
                region("New York 1", "nyc1"),
                region("New York 3", "nyc3"),
                region("San Francisco 3", "sfo3"),
                region("Toronto 1", "tor1"),
            ],
        },
        Continent {
            name: "Europe",
            regions: &[
                region("Amsterdam 3", "ams3"),
                region("Frankfurt 1", "fra1"),
                region("London 1", "lon1"),
            ],
        },
        Continent {
            name: "Asia",
            regions: &[region("Singapore 1", "sgp1"), region("Bangalore 1", "blr1")],
        },
        Continent {
            name: "Oceania",
            regions: &[region("Sydney 1", "syd1")],
        },
    ],
    server_types: &[
        server("s-1vcpu-2gb", "Basic 1 vCPU / 2 GB", 1, 2, 50),
        server("s-2vcpu-2gb", "Basic 2 vCPU / 2 GB", 2, 2, 60),
        server("s-2vcpu-4gb", "Basic 2 vCPU / 4 GB", 2, 4, 80),
        server("s-4vcpu-8gb", "Basic 4 vCPU / 8 GB", 4, 8, 160),
        server("s-8vcpu-16gb", "Basic 8 vCPU / 16 GB", 8, 16, 320),
        server("g-2vcpu-8gb", "General Purpose 2 vCPU / 8 GB", 2, 8, 25),
        server("g-4vcpu-16gb", "General Purpose 4 vCPU / 16 GB", 4, 16, 50),
        server("c-4", "CPU-Optimized 4 vCPU / 8 GB", 4, 8, 50),
        server("c-8", "CPU-Optimized 8 vCPU / 16 GB", 8, 16, 100),
    ],
};

/// Catalog of a provider, `None` for providers without shipped tables
pub fn catalog(provider: ProviderType) -> Option<&'static ProviderCatalog> {
    match provider {
        ProviderType::Hetzner => Some(&HETZNER),
        ProviderType::DigitalOcean => Some(&DIGITALOCEAN),
        ProviderType::Vultr | ProviderType::Aws => None,
    }
}

pub fn regions(provider: ProviderType) -> &'static [Continent] {
    catalog(provider).map(|c| c.continents).unwrap_or(&[])
}

pub fn server_types(provider: ProviderType) -> &'static [ServerType] {
    catalog(provider).map(|c| c.server_types).unwrap_or(&[])
}

pub fn valid_region_slugs(provider: ProviderType) -> Vec<&'static str> {
    regions(provider)
        .iter()
        .flat_map(|continent| continent.regions.iter().map(|r| r.slug))
        .collect()
}

pub fn valid_server_type_ids(provider: ProviderType) -> Vec<&'static str> {
    server_types(provider).iter().map(|t| t.id).collect()
}

pub fn specs_for(provider: ProviderType, server_type_id: &str) -> Option<ServerSpecs> {
    server_types(provider)
        .iter()
        .find(|t| t.id == server_type_id)
        .map(|t| t.specs)
}

/// Server type table keyed by id, as consumed by the topology generator
pub fn server_catalog(provider: ProviderType) -> HashMap<String, ServerSpecs> {
    server_types(provider)
        .iter()
        .map(|t| (t.id.to_string(), t.specs))
        .collect()
}
