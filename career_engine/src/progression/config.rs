//! Engine configuration

use super::progress::DEFAULT_COMPLETION_PERCENT;
use std::env;

/// Hard ceiling on returned offers; at least one is always returned
pub const MAX_OFFERS_LIMIT: usize = 5;

/// Tunables for the recommendation surface and the ledger key space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Actor whose ledger and selection this engine reads and writes
    pub actor_id: String,
    /// Upper bound on returned offers, clamped to `1..=MAX_OFFERS_LIMIT`
    pub max_offers: usize,
    /// Candidate roles taken from the archetype table
    pub archetype_offer_count: usize,
    /// Declared interests turned into extra offers
    pub interest_offer_count: usize,
    /// Share of career path steps reported as completed. Programmatic only,
    /// never read from the environment.
    pub completion_percent: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            actor_id: "default".to_string(),
            max_offers: MAX_OFFERS_LIMIT,
            archetype_offer_count: 3,
            interest_offer_count: 2,
            completion_percent: DEFAULT_COMPLETION_PERCENT,
        }
    }
}

impl EngineConfig {
    /// Build from `CAREER_ENGINE_*` environment variables, keeping defaults
    /// for anything unset or unparsable
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            actor_id: env::var("CAREER_ENGINE_ACTOR").unwrap_or(defaults.actor_id),
            max_offers: parse_var("CAREER_ENGINE_MAX_OFFERS")
                .map(clamp_max_offers)
                .unwrap_or(defaults.max_offers),
            archetype_offer_count: defaults.archetype_offer_count,
            interest_offer_count: defaults.interest_offer_count,
            completion_percent: defaults.completion_percent,
        };
        log::info!("[CONFIG] Loaded engine config: {:?}", config);
        config
    }

    pub fn with_actor(mut self, actor_id: &str) -> Self {
        self.actor_id = actor_id.to_string();
        self
    }

    /// Effective offer cap, whatever was written into `max_offers`
    pub fn offer_limit(&self) -> usize {
        self.max_offers.clamp(1, MAX_OFFERS_LIMIT)
    }
}

fn clamp_max_offers(requested: usize) -> usize {
    let clamped = requested.clamp(1, MAX_OFFERS_LIMIT);
    if clamped != requested {
        log::warn!(
            "[CONFIG] CAREER_ENGINE_MAX_OFFERS={} out of range, using {}",
            requested,
            clamped
        );
    }
    clamped
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("[CONFIG] Ignoring unparsable {}={}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_offers, 5);
        assert_eq!(config.archetype_offer_count, 3);
        assert_eq!(config.interest_offer_count, 2);
        assert_eq!(config.completion_percent, 60);
        assert_eq!(config.with_actor("alice").actor_id, "alice");
    }

    #[test]
    fn test_offer_limit_is_clamped() {
        let mut config = EngineConfig::default();
        config.max_offers = 0;
        assert_eq!(config.offer_limit(), 1);
        config.max_offers = 20;
        assert_eq!(config.offer_limit(), MAX_OFFERS_LIMIT);
        config.max_offers = 4;
        assert_eq!(config.offer_limit(), 4);
    }

    // The only test touching CAREER_ENGINE_* variables, so no cross-test races
    #[test]
    fn test_from_env_clamps_and_ignores_completion_override() {
        env::set_var("CAREER_ENGINE_COMPLETION_PERCENT", "100");

        env::set_var("CAREER_ENGINE_MAX_OFFERS", "0");
        let low = EngineConfig::from_env();
        assert_eq!(low.max_offers, 1);
        assert_eq!(low.completion_percent, DEFAULT_COMPLETION_PERCENT);

        env::set_var("CAREER_ENGINE_MAX_OFFERS", "9");
        assert_eq!(EngineConfig::from_env().max_offers, MAX_OFFERS_LIMIT);

        env::set_var("CAREER_ENGINE_MAX_OFFERS", "three");
        assert_eq!(EngineConfig::from_env().max_offers, MAX_OFFERS_LIMIT);

        env::remove_var("CAREER_ENGINE_MAX_OFFERS");
        env::remove_var("CAREER_ENGINE_COMPLETION_PERCENT");
    }
}
