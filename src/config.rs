//! # Registry configuration.
//!
//! [`RegistryConfig`] holds the few tunables the registry has. Channels are
//! created lazily on first registration and persist until a full reset, so
//! the only knob that matters in practice is how much room each channel
//! pre-allocates for its registration list.
//!
//! # Example
//! ```
//! use eventvisor::{EventRegistry, RegistryConfig};
//!
//! let mut cfg = RegistryConfig::default();
//! cfg.channel_capacity = 32;
//!
//! let registry = EventRegistry::with_config(cfg);
//! assert_eq!(registry.type_count(), 0);
//! ```

/// Configuration for an [`EventRegistry`](crate::EventRegistry).
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    /// Pre-allocated capacity of each channel's registration list.
    ///
    /// Channels grow past this on demand; it only avoids early reallocation
    /// for types with many listeners.
    pub channel_capacity: usize,
}

impl Default for RegistryConfig {
    /// Provides a default configuration:
    /// - `channel_capacity = 8`
    fn default() -> Self {
        Self {
            channel_capacity: 8,
        }
    }
}
