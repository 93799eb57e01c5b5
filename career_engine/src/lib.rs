//! Career Engine
//!
//! Progression & Recommendation Engine for the career-guidance app:
//! - Experience ledger with level-ups and claimable benefits
//! - Archetype-driven job recommendations
//! - Synthesized career paths and progress tracking

pub mod engine;
pub mod progression;

pub use engine::*;
pub use progression::*;
