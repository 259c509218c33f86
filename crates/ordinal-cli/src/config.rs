//! TOML configuration for the `ordinal` server.
//!
//! The host content store is played by an in-memory catalog seeded from
//! `[[collections]]`; sessions and capabilities come from `[[actors]]`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use ordinal_core::domain::{Actor, CollectionKey, ContentItem};
use ordinal_core::impls::{CapabilityTable, InMemoryCatalog};
use serde::Deserialize;

/// Grants every collection when listed in `actors.collections`.
pub const WILDCARD: &str = "*";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub server: ServerSection,
    pub log: LogSection,
    pub actors: Vec<ActorEntry>,
    pub collections: Vec<CollectionEntry>,
}

/// `[server]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub listen_addr: String,
    /// Capacity of the invalidation broadcast channel.
    pub invalidation_buffer: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8088".to_string(),
            invalidation_buffer: 64,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"ordinal_core=debug"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// `[[actors]]` entry: one bearer token and what it may reorder.
#[derive(Debug, Deserialize)]
pub struct ActorEntry {
    pub name: String,
    pub token: String,
    #[serde(default)]
    pub collections: Vec<String>,
}

/// `[[collections]]` entry: seed content for one collection, natural order.
#[derive(Debug, Deserialize)]
pub struct CollectionEntry {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ContentItem>,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.invalidation_buffer == 0 {
            return Err(ConfigError::Invalid(
                "server.invalidation_buffer must be at least 1".to_string(),
            ));
        }

        let mut tokens = HashSet::new();
        for actor in &self.actors {
            if actor.name.trim().is_empty() {
                return Err(ConfigError::Invalid("actor name must not be blank".to_string()));
            }
            if actor.token.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "actor {} has an empty token",
                    actor.name
                )));
            }
            if !tokens.insert(actor.token.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "actor {} reuses a token already assigned to another actor",
                    actor.name
                )));
            }
            for collection in &actor.collections {
                if collection != WILDCARD {
                    collection_key(collection)?;
                }
            }
        }

        let mut names = HashSet::new();
        for collection in &self.collections {
            let key = collection_key(&collection.name)?;
            if !names.insert(key.clone()) {
                return Err(ConfigError::Invalid(format!(
                    "collection {key} is declared twice"
                )));
            }
            let mut ids = HashSet::new();
            for item in &collection.items {
                if !ids.insert(&item.id) {
                    return Err(ConfigError::Invalid(format!(
                        "collection {key} lists item {} twice",
                        item.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Bearer token → actor.
    pub fn sessions(&self) -> HashMap<String, Actor> {
        self.actors
            .iter()
            .map(|actor| (actor.token.clone(), Actor::new(actor.name.trim())))
            .collect()
    }

    pub fn capabilities(&self) -> Result<CapabilityTable, ConfigError> {
        let mut table = CapabilityTable::new();
        for entry in &self.actors {
            let actor = Actor::new(entry.name.trim());
            for collection in &entry.collections {
                table = if collection == WILDCARD {
                    table.grant_all(actor.clone())
                } else {
                    table.grant(actor.clone(), collection_key(collection)?)
                };
            }
        }
        Ok(table)
    }

    pub fn catalog(&self) -> Result<InMemoryCatalog, ConfigError> {
        let mut collections = HashMap::new();
        for entry in &self.collections {
            collections.insert(collection_key(&entry.name)?, entry.items.clone());
        }
        Ok(InMemoryCatalog::with_collections(collections))
    }
}

fn collection_key(name: &str) -> Result<CollectionKey, ConfigError> {
    CollectionKey::new(name)
        .map_err(|_| ConfigError::Invalid(format!("collection name {name:?} is blank")))
}
