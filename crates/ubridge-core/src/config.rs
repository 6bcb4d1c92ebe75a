//! ubridge Configuration
//!
//! Limits and naming conventions shared by the stack and the registry.
//! Configuration specifies constraints only; enforcement is handled elsewhere.

use serde::Deserialize;

/// Default marker for const-qualified type names
pub const DEFAULT_CONST_PREFIX: &str = "const ";

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Maximum evaluation stack depth
    pub max_stack_size: usize,

    /// Prefix that marks the const twin of a type name
    pub const_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            max_stack_size: 1024,
            const_prefix: DEFAULT_CONST_PREFIX.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }
}
