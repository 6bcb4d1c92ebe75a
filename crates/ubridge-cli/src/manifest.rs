//! Class manifests
//!
//! A TOML description of a class hierarchy, loaded into a [`TypeRegistry`].
//! Classes are registered in file order, so a parent must be listed before
//! its children.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use ubridge_core::{BridgeConfig, BridgeError, TypeRegistry};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] io::Error),
    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot register classes: {0}")]
    Registry(#[from] BridgeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub config: BridgeConfig,
    #[serde(default, rename = "class")]
    pub classes: Vec<ClassEntry>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Register every class, each with its const twin.
    pub fn build_registry(&self) -> Result<TypeRegistry, ManifestError> {
        let mut registry = TypeRegistry::with_config(&self.config);
        for class in &self.classes {
            registry.register_class(&class.name, class.parent.as_deref())?;
        }
        Ok(registry)
    }
}
