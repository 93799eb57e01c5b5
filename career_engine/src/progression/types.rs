//! Progression Types
//!
//! Core data structures shared by the ledger, the scorer, the path generator
//! and the progress calculator.

use super::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

// ============================================================
// ARCHETYPE
// ============================================================

/// RIASEC personality archetype driving role and organization lookup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Archetype {
    #[serde(rename = "R")]
    Realistic,
    #[serde(rename = "I")]
    Investigative,
    #[serde(rename = "A")]
    Artistic,
    #[serde(rename = "S")]
    Social,
    #[serde(rename = "E")]
    Enterprising,
    #[serde(rename = "C")]
    Conventional,
}

impl Archetype {
    pub const ALL: [Archetype; 6] = [
        Archetype::Realistic,
        Archetype::Investigative,
        Archetype::Artistic,
        Archetype::Social,
        Archetype::Enterprising,
        Archetype::Conventional,
    ];

    /// Archetype used when a code is not recognized
    pub const FALLBACK: Archetype = Archetype::Investigative;

    pub fn code(&self) -> &'static str {
        match self {
            Archetype::Realistic => "R",
            Archetype::Investigative => "I",
            Archetype::Artistic => "A",
            Archetype::Social => "S",
            Archetype::Enterprising => "E",
            Archetype::Conventional => "C",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Realistic => "Realistic",
            Archetype::Investigative => "Investigative",
            Archetype::Artistic => "Artistic",
            Archetype::Social => "Social",
            Archetype::Enterprising => "Enterprising",
            Archetype::Conventional => "Conventional",
        }
    }

    /// Parse a single-letter code or full name, case-insensitively
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|a| {
            a.code().eq_ignore_ascii_case(code) || a.name().eq_ignore_ascii_case(code)
        })
    }

    /// Like `from_code`, but unknown codes resolve to the fallback archetype
    pub fn resolve(code: &str) -> Self {
        match Self::from_code(code) {
            Some(archetype) => archetype,
            None => {
                log::debug!(
                    "[ARCHETYPE] Unknown code '{}', falling back to {}",
                    code,
                    Self::FALLBACK.code()
                );
                Self::FALLBACK
            }
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

// ============================================================
// PROFILE
// ============================================================

/// The caller's profile. The engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(deserialize_with = "deserialize_archetype")]
    pub archetype: Archetype,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Profiles come from the UI and accept the same loose codes as
/// `Archetype::resolve`. Catalog keys stay strict.
fn deserialize_archetype<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Archetype, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(Archetype::resolve(&raw))
}

impl Profile {
    /// Build a profile, rejecting blank entries and dropping duplicates
    pub fn new(archetype: Archetype, skills: &[String], interests: &[String]) -> EngineResult<Self> {
        Ok(Self {
            archetype,
            skills: normalize_entries("skill", skills)?,
            interests: normalize_entries("interest", interests)?,
        })
    }

    /// Parse a profile from a JSON blob supplied by the UI layer
    pub fn from_json(value: &serde_json::Value) -> EngineResult<Self> {
        let raw: Profile = serde_json::from_value(value.clone())
            .map_err(|e| EngineError::InvalidInput(format!("Malformed profile: {}", e)))?;
        Self::new(raw.archetype, &raw.skills, &raw.interests)
    }
}

/// Trim entries, reject blanks and drop case-insensitive duplicates
fn normalize_entries(kind: &str, entries: &[String]) -> EngineResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidInput(format!("Blank {} entry", kind)));
        }
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
        }
    }
    Ok(out)
}

// ============================================================
// REFERENCE DATA
// ============================================================

/// An organization from the fixed reference catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub location: String,
    pub industry: String,
    #[serde(default)]
    pub perks: Vec<String>,
}

// ============================================================
// CAREER PATH
// ============================================================

/// One ordinal stage of a synthesized career path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerPathStep {
    /// Step ordinal (1 = first)
    pub step: u32,
    pub title: String,
    pub description: String,
    /// Human-readable duration, e.g. "2-3 months"
    pub duration: String,
    pub skills: Vec<String>,
    pub resources: Vec<String>,
}

// ============================================================
// JOB OFFER
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Entry,
    Mid,
    Senior,
    Lead,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
    pub currency: String,
}

/// A recommended job. Immutable once returned by the scorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobOffer {
    pub id: String,
    pub title: String,
    pub organization: Organization,
    /// Ranking score 0-100, used only for ordering
    pub match_score: u8,
    pub match_reason: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub required_skills: Vec<String>,
    pub salary: SalaryRange,
    pub location: String,
    pub employment_type: EmploymentType,
    pub seniority: Seniority,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub career_path: Option<Vec<CareerPathStep>>,
}

// ============================================================
// GAMIFICATION STATE
// ============================================================

/// Level/EXP/benefit state for a single actor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GamificationState {
    pub level: u32,
    pub current_exp: u64,
    pub exp_needed: u64,
    /// Lifetime EXP, never reset
    pub total_exp: u64,
    pub benefits_available: bool,
    pub benefits_claimed: u32,
    pub character_evolution_stage: u8,
    pub last_benefit_claim: Option<DateTime<Utc>>,
}

// ============================================================
// PROGRESS SNAPSHOT
// ============================================================

/// Derived completion state for a job offer; never stored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub completed_steps: u32,
    pub total_steps: u32,
    pub progress_percentage: u32,
    pub relevant_skills_acquired: u32,
    pub total_required_skills: u32,
    pub skills_progress_percentage: u32,
}
