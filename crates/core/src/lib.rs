//! # HookStudio Core
//!
//! Domain types, traits, and error definitions for the HookStudio content
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The two external boundaries (the generation provider and the key-value
//! persistence layer) are defined as traits here. Implementations live in
//! their respective crates:
//! - `hookstudio-providers` implements [`Provider`]
//! - `hookstudio-history` implements [`KvStore`]
//!
//! The workflow crate only ever talks to these traits, so tests can swap in
//! scripted providers and in-memory stores.

pub mod error;
pub mod history;
pub mod provider;
pub mod storage;
pub mod studio;

// Re-export key types at crate root for ergonomics
pub use error::{GenerationFailure, ProviderError, StorageError, ValidationError};
pub use history::HistoryEntry;
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use storage::KvStore;
pub use studio::{GenerationResult, InputSnapshot, Mode, ParsedItem, ResultStatus, TONES};
