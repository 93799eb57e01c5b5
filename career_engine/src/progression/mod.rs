//! Progression Module - Core of the Career Engine
//!
//! Architecture:
//! - Ledger: level/EXP/benefit state machine over an injectable store
//! - Scorer: archetype + interests + skills to ranked job offers
//! - Path: template career paths specialized by job title
//! - Progress: skill coverage and step completion for a chosen offer
//! - Catalog: fixed organizations and archetype tables

pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod path;
pub mod progress;
pub mod scorer;
pub mod store;
pub mod types;

pub use catalog::*;
pub use config::*;
pub use error::*;
pub use ledger::*;
pub use path::*;
pub use progress::*;
pub use scorer::*;
pub use store::*;
pub use types::*;
