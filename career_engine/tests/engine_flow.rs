use career_engine::{
    exp_needed, Activity, Archetype, Catalog, EngineConfig, EngineError, InMemoryStore,
    KeyValueStore, Profile, ProgressionEngine, SqliteStore, StoreError,
};
use serde_json::Value;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn seeded_engine(seed: u64) -> ProgressionEngine<InMemoryStore> {
    ProgressionEngine::with_seed(
        InMemoryStore::new(),
        Catalog::builtin(),
        EngineConfig::default(),
        seed,
    )
}

#[test]
fn test_level_up_from_exactly_one_threshold() {
    init_logging();
    let engine = seeded_engine(0);
    let state = engine.add_experience(100).unwrap();
    assert_eq!(state.level, 2);
    assert_eq!(state.current_exp, 0);
    assert!(state.benefits_available);
}

#[test]
fn test_level_up_across_two_thresholds() {
    init_logging();
    let engine = seeded_engine(0);
    let state = engine.add_experience(250).unwrap();
    assert_eq!(state.level, 3);
    assert_eq!(state.current_exp, 0);
    assert!(state.benefits_available);
    assert_eq!(state.exp_needed, exp_needed(3));
}

#[test]
fn test_investigative_python_recommendations() {
    init_logging();
    let mut engine = seeded_engine(5);
    let offers = engine
        .generate_recommendations("I", &[], &strings(&["Python"]))
        .unwrap();

    assert_eq!(offers.len(), 3);
    let scores: Vec<u8> = offers.iter().map(|o| o.match_score).collect();
    assert_eq!(scores, vec![95, 93, 91]);
    for offer in &offers {
        assert_eq!(offer.required_skills, vec!["Python"]);
    }
}

#[test]
fn test_progress_is_pinned_regardless_of_skill_coverage() {
    init_logging();
    let mut engine = seeded_engine(5);
    let offers = engine
        .generate_recommendations("I", &[], &strings(&["SQL", "Python", "Excel"]))
        .unwrap();
    let profile = Profile::new(
        Archetype::Investigative,
        &strings(&["python", "excel", "leadership"]),
        &[],
    )
    .unwrap();

    let snapshot = engine.compute_progress(&offers[0], &profile);
    assert_eq!(snapshot.relevant_skills_acquired, 2);
    assert_eq!(snapshot.skills_progress_percentage, 67);
    assert_eq!(snapshot.completed_steps, 3);
    assert_eq!(snapshot.total_steps, 5);
}

#[test]
fn test_recommendations_always_bounded_and_sorted() {
    init_logging();
    let mut engine = seeded_engine(123);
    let interest_sets = [
        strings(&[]),
        strings(&["Music"]),
        strings(&["Music", "Gardening", "Chess", "Travel"]),
    ];
    for code in ["R", "I", "A", "S", "E", "C", "?", ""] {
        for interests in &interest_sets {
            let offers = engine
                .generate_recommendations(code, interests, &[])
                .unwrap();
            assert!((1..=5).contains(&offers.len()));
            assert!(offers.windows(2).all(|w| w[0].match_score >= w[1].match_score));
            assert!(offers.iter().all(|o| !o.required_skills.is_empty()));

            let archetype_titles: Vec<_> = offers
                .iter()
                .filter(|o| o.match_score > 90)
                .map(|o| o.title.to_lowercase())
                .collect();
            let mut unique = archetype_titles.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), archetype_titles.len());
        }
    }
}

#[test]
fn test_claim_cycle_through_engine() {
    init_logging();
    let engine = seeded_engine(0);
    assert!(matches!(
        engine.claim_benefit("career-coach"),
        Err(EngineError::PreconditionFailed(_))
    ));

    engine.record_activity(Activity::PersonalityTestCompleted).unwrap();
    engine.record_activity(Activity::ProfileCompleted).unwrap();
    let before = engine.record_activity(Activity::SkillAdded).unwrap();
    assert!(before.benefits_available);
    assert_eq!(before.total_exp, 100);

    let after = engine.claim_benefit("career-coach").unwrap();
    assert_eq!(after.current_exp, 0);
    assert!(!after.benefits_available);
    assert_eq!(after.benefits_claimed, before.benefits_claimed + 1);
    assert_eq!(after.total_exp, before.total_exp);
    assert_eq!(engine.get_experience_state().unwrap(), after);

    assert!(!engine.experience_history().unwrap().is_empty());
}

#[test]
fn test_state_survives_engine_restart_on_sqlite() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("career.db");

    {
        let engine = ProgressionEngine::with_defaults(SqliteStore::new(Some(path.clone())).unwrap());
        engine.add_experience(400).unwrap();
    }

    let engine = ProgressionEngine::with_defaults(SqliteStore::new(Some(path)).unwrap());
    let state = engine.get_experience_state().unwrap();
    assert_eq!(state.total_exp, 400);
    assert_eq!(state.level, 3);
    assert_eq!(state.current_exp, 150);
}

#[test]
fn test_actors_share_a_store_without_interference() {
    init_logging();
    let store = Arc::new(InMemoryStore::new());
    let alice = ProgressionEngine::with_defaults_for(store.clone(), "alice");
    let bob = ProgressionEngine::with_defaults_for(store.clone(), "bob");

    alice.add_experience(150).unwrap();
    assert_eq!(alice.get_experience_state().unwrap().level, 2);
    assert_eq!(bob.get_experience_state().unwrap().level, 1);
    assert!(store.get("alice:gamification_state").unwrap().is_some());
}

/// Store whose writes always fail, for checking that mutations are all-or-nothing
struct ReadOnlyStore {
    inner: InMemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &Value) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }
}

#[test]
fn test_failed_write_leaves_state_untouched() {
    init_logging();
    let inner = InMemoryStore::new();
    {
        let seeded = ProgressionEngine::with_defaults(&inner);
        seeded.add_experience(60).unwrap();
    }
    let stored = inner.get("default:gamification_state").unwrap();

    let engine = ProgressionEngine::with_defaults(ReadOnlyStore { inner });
    assert!(matches!(engine.add_experience(500), Err(EngineError::Store(_))));
    assert_eq!(engine.get_experience_state().unwrap().current_exp, 60);
    assert_eq!(
        serde_json::to_value(engine.get_experience_state().unwrap()).unwrap(),
        stored.unwrap()
    );
}
