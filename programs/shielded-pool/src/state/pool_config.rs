//! Pool genesis configuration.
//!
//! Loaded once when a pool is created. Only the verifying keys can change
//! afterwards, through the admin surface.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{PrivacyPoolError, Result},
    merkle_tree::{DEFAULT_TREE_DEPTH, MAX_TREE_DEPTH},
    state::{MAX_ROOT_HISTORY_SIZE, ROOT_HISTORY_SIZE},
    token::TokenId,
};

/// Genesis parameters for a pool.
///
/// # JSON Layout
///
/// ```json
/// { "token": [/* 32 bytes, little-endian */], "tree_depth": 16, "root_history_size": 100 }
/// ```
///
/// `tree_depth` and `root_history_size` may be omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Token held by the pool
    pub token: TokenId,
    /// Commitment tree depth (capacity `2^tree_depth`)
    #[serde(default = "default_tree_depth")]
    pub tree_depth: u8,
    /// Number of superseded roots proofs may still reference
    #[serde(default = "default_root_history_size")]
    pub root_history_size: usize,
}

fn default_tree_depth() -> u8 {
    DEFAULT_TREE_DEPTH
}

fn default_root_history_size() -> usize {
    ROOT_HISTORY_SIZE
}

impl PoolConfig {
    /// Config with default depth and history for `token`.
    pub const fn new(token: TokenId) -> Self {
        Self {
            token,
            tree_depth: DEFAULT_TREE_DEPTH,
            root_history_size: ROOT_HISTORY_SIZE,
        }
    }

    /// Config with defaults for the token named `symbol`.
    pub fn for_symbol(symbol: &str) -> Self {
        Self::new(TokenId::from_symbol(symbol))
    }

    /// Override the tree depth.
    pub const fn with_tree_depth(mut self, tree_depth: u8) -> Self {
        self.tree_depth = tree_depth;
        self
    }

    /// Override the root history size.
    pub const fn with_root_history_size(mut self, root_history_size: usize) -> Self {
        self.root_history_size = root_history_size;
        self
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::InvalidConfig`] if the JSON is malformed or
    /// a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PrivacyPoolError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::InvalidConfig`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PrivacyPoolError::InvalidConfig(e.to_string()))
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`PrivacyPoolError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.tree_depth == 0 || self.tree_depth > MAX_TREE_DEPTH {
            return Err(PrivacyPoolError::InvalidConfig(format!(
                "tree_depth must be in 1..={MAX_TREE_DEPTH}, got {}",
                self.tree_depth
            )));
        }
        if self.root_history_size == 0 || self.root_history_size > MAX_ROOT_HISTORY_SIZE {
            return Err(PrivacyPoolError::InvalidConfig(format!(
                "root_history_size must be in 1..={MAX_ROOT_HISTORY_SIZE}, got {}",
                self.root_history_size
            )));
        }
        if !self.token.is_canonical() {
            return Err(PrivacyPoolError::InvalidConfig(
                "token is not a canonical field element".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PoolConfig::for_symbol("USDC");
        assert_eq!(config.tree_depth, 16);
        assert_eq!(config.root_history_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let config = PoolConfig::for_symbol("USDC")
            .with_tree_depth(20)
            .with_root_history_size(32);
        let json = config.to_json().unwrap();
        assert_eq!(PoolConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_defaults_for_missing_fields() {
        let token = TokenId::from_bytes([1u8; 32]).unwrap();
        let json = format!(r#"{{"token": {}}}"#, serde_json::to_string(&token).unwrap());
        let config = PoolConfig::from_json(&json).unwrap();
        assert_eq!(config, PoolConfig::new(token));
    }

    #[test]
    fn test_rejects_bad_depth() {
        for depth in [0, MAX_TREE_DEPTH + 1] {
            let config = PoolConfig::for_symbol("USDC").with_tree_depth(depth);
            assert!(matches!(
                config.validate(),
                Err(PrivacyPoolError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_rejects_empty_history() {
        let config = PoolConfig::for_symbol("USDC").with_root_history_size(0);
        assert!(matches!(
            config.validate(),
            Err(PrivacyPoolError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_history() {
        let config = PoolConfig::for_symbol("USDC")
            .with_root_history_size(MAX_ROOT_HISTORY_SIZE);
        assert!(config.validate().is_ok());

        let json = PoolConfig::for_symbol("USDC")
            .with_root_history_size(usize::MAX)
            .to_json()
            .unwrap();
        assert!(matches!(
            PoolConfig::from_json(&json),
            Err(PrivacyPoolError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_non_canonical_token() {
        let json = format!(r#"{{"token": {:?}}}"#, [255u8; 32]);
        assert!(matches!(
            PoolConfig::from_json(&json),
            Err(PrivacyPoolError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            PoolConfig::from_json("{"),
            Err(PrivacyPoolError::InvalidConfig(_))
        ));
    }
}
