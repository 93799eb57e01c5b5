//! Engine Facade
//!
//! The synchronous surface the UI layer calls. One engine serves one actor;
//! the ledger and the selected offer live in the injected key-value store.

use crate::progression::{
    catalog::Catalog,
    config::EngineConfig,
    error::{EngineResult, StoreError},
    ledger::{Activity, ExperienceLedger, LedgerEvent},
    progress,
    scorer::JobScorer,
    store::KeyValueStore,
    types::{Archetype, GamificationState, JobOffer, Profile, ProgressSnapshot},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct ProgressionEngine<S: KeyValueStore> {
    ledger: ExperienceLedger<S>,
    catalog: Catalog,
    config: EngineConfig,
    rng: StdRng,
}

impl<S: KeyValueStore> ProgressionEngine<S> {
    /// Engine with an entropy-seeded generator. Interest-derived offers are
    /// not reproducible across calls.
    pub fn new(store: S, catalog: Catalog, config: EngineConfig) -> Self {
        Self::with_rng(store, catalog, config, StdRng::from_entropy())
    }

    /// Engine with a fixed seed, for reproducible recommendations
    pub fn with_seed(store: S, catalog: Catalog, config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(store, catalog, config, StdRng::seed_from_u64(seed))
    }

    /// Built-in catalog and default configuration
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, Catalog::builtin(), EngineConfig::default())
    }

    /// Built-in catalog and default configuration for a named actor
    pub fn with_defaults_for(store: S, actor_id: &str) -> Self {
        Self::new(store, Catalog::builtin(), EngineConfig::default().with_actor(actor_id))
    }

    fn with_rng(store: S, catalog: Catalog, config: EngineConfig, rng: StdRng) -> Self {
        log::info!(
            "[ENGINE] Initializing for actor '{}' ({} organizations)",
            config.actor_id,
            catalog.organizations.len()
        );
        if config.completion_percent != progress::DEFAULT_COMPLETION_PERCENT {
            log::warn!(
                "[ENGINE] Completion pinned at {}% instead of the standard {}%",
                config.completion_percent,
                progress::DEFAULT_COMPLETION_PERCENT
            );
        }
        Self {
            ledger: ExperienceLedger::new(store, &config.actor_id),
            catalog,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ============================================================
    // EXPERIENCE
    // ============================================================

    pub fn get_experience_state(&self) -> EngineResult<GamificationState> {
        self.ledger.read()
    }

    pub fn add_experience(&self, amount: i64) -> EngineResult<GamificationState> {
        self.ledger.add_experience(amount)
    }

    pub fn record_activity(&self, activity: Activity) -> EngineResult<GamificationState> {
        self.ledger.record_activity(activity)
    }

    pub fn claim_benefit(&self, selection_id: &str) -> EngineResult<GamificationState> {
        self.ledger.claim_benefit(selection_id)
    }

    pub fn experience_history(&self) -> EngineResult<Vec<LedgerEvent>> {
        self.ledger.history()
    }

    // ============================================================
    // RECOMMENDATIONS
    // ============================================================

    /// Recommend up to `max_offers` jobs. Unknown archetype codes fall back
    /// to the Investigative table.
    pub fn generate_recommendations(
        &mut self,
        archetype: &str,
        interests: &[String],
        skills: &[String],
    ) -> EngineResult<Vec<JobOffer>> {
        let profile = Profile::new(Archetype::resolve(archetype), skills, interests)?;
        self.recommend_for(&profile)
    }

    pub fn recommend_for(&mut self, profile: &Profile) -> EngineResult<Vec<JobOffer>> {
        JobScorer::new(&self.catalog, &self.config).recommend(profile, &mut self.rng)
    }

    // ============================================================
    // PROGRESS
    // ============================================================

    pub fn compute_progress(&self, offer: &JobOffer, profile: &Profile) -> ProgressSnapshot {
        progress::compute_progress_with(offer, profile, self.config.completion_percent)
    }

    fn selected_key(&self) -> String {
        format!("{}:selected_job", self.config.actor_id)
    }

    /// Persist `offer` as the actor's chosen job
    pub fn select_offer(&self, offer: &JobOffer) -> EngineResult<()> {
        self.ledger
            .store()
            .set(&self.selected_key(), &serde_json::to_value(offer)?)?;
        log::info!(
            "[ENGINE] '{}' selected offer '{}'",
            self.config.actor_id,
            offer.id
        );
        Ok(())
    }

    pub fn selected_offer(&self) -> EngineResult<Option<JobOffer>> {
        let key = self.selected_key();
        match self.ledger.store().get(&key)? {
            Some(value) => Ok(Some(
                serde_json::from_value(value).map_err(|source| StoreError::Corrupt { key, source })?,
            )),
            None => Ok(None),
        }
    }

    /// Progress toward the selected offer, if one was selected
    pub fn selected_progress(&self, profile: &Profile) -> EngineResult<Option<ProgressSnapshot>> {
        Ok(self
            .selected_offer()?
            .map(|offer| self.compute_progress(&offer, profile)))
    }
}
