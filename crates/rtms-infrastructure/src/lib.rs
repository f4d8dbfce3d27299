//! Infrastructure layer for RTMS: local storage, paths and configuration.

pub mod config_service;
pub mod paths;
pub mod preference_repository;
pub mod session_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::RtmsPaths;
pub use crate::preference_repository::KeyValuePreferenceRepository;
pub use crate::session_repository::KeyValueSessionRepository;
pub use crate::storage::{KeyValueStore, MemoryKeyValueStore, TomlKeyValueStore};
