//! Demonstration data loading from config.toml
//!
//! This module loads the materials and the sample transaction written on first run,
//! when the store holds neither materials nor transactions. Without a config file the
//! built-in set is used.

use crate::errors::{Error, Result};
use crate::models::{Availability, MaterialDraft, TransactionKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the seed section of config.toml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeedConfig {
    /// Materials written to an empty store
    #[serde(default)]
    pub materials: Vec<MaterialDraft>,
    /// Sample transaction written after the materials
    #[serde(default)]
    pub demo_transaction: Option<DemoTransaction>,
}

/// A sample transaction referring to one of the seeded materials by name
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DemoTransaction {
    /// "Compra" or "Venda"
    pub kind: TransactionKind,
    /// Supplier or customer name
    pub person_name: String,
    /// Name of a seeded material
    pub material: String,
    /// Weight in kg
    pub weight: f64,
}

impl SeedConfig {
    /// The seed set shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        let metal = |name: &str, buy_price: f64, sell_price: f64| MaterialDraft {
            name: name.to_string(),
            category: "Metais".to_string(),
            buy_price,
            sell_price,
            availability: Availability::Both,
        };

        Self {
            materials: vec![
                metal("Cobre Mel", 42.50, 48.00),
                metal("Alumínio Perfil", 12.00, 15.50),
                metal("Ferro Pesado", 0.80, 1.20),
                MaterialDraft {
                    name: "Pet Transparente".to_string(),
                    category: "Plásticos".to_string(),
                    buy_price: 2.10,
                    sell_price: 3.20,
                    availability: Availability::Both,
                },
            ],
            demo_transaction: Some(DemoTransaction {
                kind: TransactionKind::Buy,
                person_name: "Fornecedor de Exemplo".to_string(),
                material: "Cobre Mel".to_string(),
                weight: 10.0,
            }),
        }
    }
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path_ref = path.as_ref();
    debug!("Loading seed configuration from {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Path of the config file: `SCRAPYARD_CONFIG` or `./config.toml`.
#[must_use]
pub fn config_path() -> PathBuf {
    std::env::var("SCRAPYARD_CONFIG").map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Loads the seed configuration from [`config_path`], falling back to
/// [`SeedConfig::builtin`] when the file does not exist.
pub fn load_default_config() -> Result<SeedConfig> {
    let path = config_path();
    if !path.exists() {
        info!("No config file at {}, using built-in seed data", path.display());
        return Ok(SeedConfig::builtin());
    }
    load_config(path)
}
