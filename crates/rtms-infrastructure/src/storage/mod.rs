//! Local storage primitives.
//!
//! - `atomic_toml`: whole-file TOML persistence with locking
//! - `key_value`: string key-value stores standing in for browser storage

pub mod atomic_toml;
pub mod key_value;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use key_value::{KeyValueStore, MemoryKeyValueStore, TomlKeyValueStore};
