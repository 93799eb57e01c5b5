//! Experience Ledger Module
//!
//! Level/EXP/benefit state machine for a single actor. Every mutation is a
//! read-modify-write against the injected key-value store: the new state is
//! computed on a copy and written once, so a failed write leaves the stored
//! state untouched.
//!
//! Each mutation also appends to a per-actor event history so level-ups and
//! claims can be explained after the fact.

use super::error::{EngineError, EngineResult, StoreError};
use super::store::KeyValueStore;
use super::types::GamificationState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

const BASE_EXP: f64 = 100.0;
const EXP_GROWTH: f64 = 1.5;

// ============================================================
// LEVEL CURVE
// ============================================================

/// EXP required to leave `level`: `floor(100 * 1.5^(level-1))`
pub fn exp_needed(level: u32) -> u64 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    // `as` saturates, so absurd levels cap at u64::MAX instead of wrapping
    (BASE_EXP * EXP_GROWTH.powi(exponent)).floor() as u64
}

/// Visual evolution stage (1-5) for a level
pub fn evolution_stage(level: u32) -> u8 {
    match level {
        l if l >= 20 => 5,
        l if l >= 15 => 4,
        l if l >= 10 => 3,
        l if l >= 5 => 2,
        _ => 1,
    }
}

impl GamificationState {
    pub fn initial() -> Self {
        Self {
            level: 1,
            current_exp: 0,
            exp_needed: exp_needed(1),
            total_exp: 0,
            benefits_available: false,
            benefits_claimed: 0,
            character_evolution_stage: evolution_stage(1),
            last_benefit_claim: None,
        }
    }

    /// Add EXP and resolve level-ups eagerly. Returns the number of levels gained.
    pub fn apply_experience(&mut self, amount: u64) -> u32 {
        self.current_exp = self.current_exp.saturating_add(amount);
        self.total_exp = self.total_exp.saturating_add(amount);

        let mut gained = 0;
        while self.current_exp >= exp_needed(self.level) {
            self.current_exp -= exp_needed(self.level);
            self.level += 1;
            self.benefits_available = true;
            gained += 1;
        }
        self.exp_needed = exp_needed(self.level);
        self.character_evolution_stage = evolution_stage(self.level);
        gained
    }

    /// Consume the pending benefit. Overflow EXP is discarded with the reset.
    pub fn apply_claim(&mut self, now: DateTime<Utc>) -> EngineResult<()> {
        if !self.benefits_available {
            return Err(EngineError::PreconditionFailed(
                "No benefit is available to claim".to_string(),
            ));
        }
        self.current_exp = 0;
        self.exp_needed = exp_needed(self.level);
        self.benefits_available = false;
        self.benefits_claimed += 1;
        self.last_benefit_claim = Some(now);
        Ok(())
    }
}

// ============================================================
// ACTIVITIES
// ============================================================

/// User actions that grant EXP
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    PersonalityTestCompleted,
    ProfileCompleted,
    SkillAdded,
    JobSelected,
    CareerStepCompleted,
    InterviewCompleted,
}

impl Activity {
    pub fn reward(&self) -> u64 {
        match self {
            Activity::PersonalityTestCompleted => 50,
            Activity::ProfileCompleted => 30,
            Activity::SkillAdded => 20,
            Activity::JobSelected => 10,
            Activity::CareerStepCompleted => 40,
            Activity::InterviewCompleted => 100,
        }
    }
}

// ============================================================
// LEDGER EVENTS
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEventKind {
    ExperienceAdded,
    LevelUp,
    BenefitClaimed,
}

/// A single entry in an actor's ledger history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: LedgerEventKind,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
}

impl LedgerEvent {
    pub fn new(kind: LedgerEventKind, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            description: description.to_string(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

// ============================================================
// LEDGER
// ============================================================

/// Handle over one actor's gamification state in a key-value store
pub struct ExperienceLedger<S: KeyValueStore> {
    store: S,
    actor_id: String,
}

impl<S: KeyValueStore> ExperienceLedger<S> {
    pub fn new(store: S, actor_id: &str) -> Self {
        Self {
            store,
            actor_id: actor_id.to_string(),
        }
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn state_key(&self) -> String {
        format!("{}:gamification_state", self.actor_id)
    }

    fn history_key(&self) -> String {
        format!("{}:gamification_history", self.actor_id)
    }

    /// Current state, created and persisted with defaults on first read
    pub fn read(&self) -> EngineResult<GamificationState> {
        let key = self.state_key();
        match self.store.get(&key)? {
            Some(value) => {
                let state = serde_json::from_value(value)
                    .map_err(|source| StoreError::Corrupt { key, source })?;
                Ok(state)
            }
            None => {
                log::info!("[LEDGER] Initializing state for actor '{}'", self.actor_id);
                let state = GamificationState::initial();
                self.store.set(&key, &serde_json::to_value(&state)?)?;
                Ok(state)
            }
        }
    }

    /// Add EXP; negative amounts are rejected without touching the state
    pub fn add_experience(&self, amount: i64) -> EngineResult<GamificationState> {
        let amount = u64::try_from(amount).map_err(|_| {
            EngineError::InvalidInput(format!("EXP amount must be non-negative, got {}", amount))
        })?;

        let before = self.read()?;
        let mut state = before.clone();
        let gained = state.apply_experience(amount);
        self.save(&state)?;

        log::info!(
            "[LEDGER] +{} EXP for '{}': level {} -> {}, {}/{} EXP",
            amount,
            self.actor_id,
            before.level,
            state.level,
            state.current_exp,
            state.exp_needed
        );

        let mut events = vec![LedgerEvent::new(
            LedgerEventKind::ExperienceAdded,
            &format!("Gained {} EXP", amount),
        )
        .with_metadata(json!({ "amount": amount, "total_exp": state.total_exp }))];
        if gained > 0 {
            events.push(
                LedgerEvent::new(
                    LedgerEventKind::LevelUp,
                    &format!("Reached level {}", state.level),
                )
                .with_metadata(json!({ "from": before.level, "to": state.level })),
            );
        }
        self.append_history(events);

        Ok(state)
    }

    pub fn record_activity(&self, activity: Activity) -> EngineResult<GamificationState> {
        log::debug!("[LEDGER] Activity {:?} for '{}'", activity, self.actor_id);
        self.add_experience(activity.reward() as i64)
    }

    /// Claim the pending benefit identified by `selection_id`
    pub fn claim_benefit(&self, selection_id: &str) -> EngineResult<GamificationState> {
        let selection_id = selection_id.trim();
        if selection_id.is_empty() {
            return Err(EngineError::InvalidInput(
                "Benefit selection id must not be blank".to_string(),
            ));
        }

        let mut state = self.read()?;
        if let Err(e) = state.apply_claim(Utc::now()) {
            log::warn!("[LEDGER] Claim rejected for '{}': {}", self.actor_id, e);
            return Err(e);
        }
        self.save(&state)?;

        log::info!(
            "[LEDGER] '{}' claimed benefit '{}' ({} claimed so far)",
            self.actor_id,
            selection_id,
            state.benefits_claimed
        );
        self.append_history(vec![LedgerEvent::new(
            LedgerEventKind::BenefitClaimed,
            &format!("Claimed benefit {}", selection_id),
        )
        .with_metadata(json!({ "selection_id": selection_id, "level": state.level }))]);

        Ok(state)
    }

    /// Ledger events for this actor, oldest first
    pub fn history(&self) -> EngineResult<Vec<LedgerEvent>> {
        let key = self.history_key();
        match self.store.get(&key)? {
            Some(value) => Ok(serde_json::from_value(value)
                .map_err(|source| StoreError::Corrupt { key, source })?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, state: &GamificationState) -> EngineResult<()> {
        self.store.set(&self.state_key(), &serde_json::to_value(state)?)?;
        Ok(())
    }

    /// History is secondary to the state; failures are logged, not surfaced
    fn append_history(&self, events: Vec<LedgerEvent>) {
        let result = self.history().and_then(|mut history| {
            history.extend(events);
            self.store
                .set(&self.history_key(), &serde_json::to_value(&history)?)
                .map_err(EngineError::from)
        });
        if let Err(e) = result {
            log::warn!("[LEDGER] Failed to append history for '{}': {}", self.actor_id, e);
        }
    }
}
