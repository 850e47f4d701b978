//! # Seqkit Collections
//!
//! Special-purpose collections.
//!
//! ## Features
//!
//! - [`ConcurrentHashSet`]: hash set guarded by a read-write lock, with
//!   snapshot iteration
//! - [`ExpiringMap`]: concurrent map (`DashMap`) whose entries vanish once
//!   they outlive a fixed lifetime, swept lazily on every access
//! - [`TwoWayMap`]: strict one-to-one map, queryable by key or by value
//! - [`BiMap`]: one-to-one map that evicts conflicting pairs on insert
//! - [`EnumMap`]: one value per enum variant, stored in a flat array
//! - Optional `serde` support for [`TwoWayMap`]
//!
//! ## Example
//!
//! ```rust
//! use seqkit_collections::{ExpiringMap, ExpiringMapConfig, Stamped, TwoWayMap};
//! use std::time::Duration;
//!
//! // Tokens that stay valid for 5 minutes
//! let config = ExpiringMapConfig::default()
//!     .with_lifetime(Duration::from_secs(300));
//! let tokens = ExpiringMap::with_config(config).unwrap();
//! tokens.insert("abc123".to_string(), Stamped::new("user:1"));
//! assert!(tokens.contains_key("abc123"));
//!
//! // Look up in either direction
//! let mut ids = TwoWayMap::new();
//! ids.add("user:1", 1001).unwrap();
//! assert_eq!(ids.get_by_value(&1001), Some(&"user:1"));
//! ```

mod bimap;
mod concurrent_set;
mod config;
mod enum_map;
mod error;
mod expiring;
mod stamped;
mod two_way;

pub use bimap::{BiMap, Overwritten};
pub use concurrent_set::ConcurrentHashSet;
pub use config::ExpiringMapConfig;
pub use enum_map::{EnumKey, EnumMap};
pub use error::CollectionError;
pub use expiring::ExpiringMap;
pub use stamped::{Stamped, Timestamped};
pub use two_way::TwoWayMap;
