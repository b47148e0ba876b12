//! Pool state components.

pub mod nullifier;
pub mod pool_config;
pub mod root_history;
pub mod verifying_keys;

pub use nullifier::*;
pub use pool_config::*;
pub use root_history::*;
pub use verifying_keys::*;
