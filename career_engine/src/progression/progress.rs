//! Career Path Progress Calculator
//!
//! Derives a `ProgressSnapshot` from a job offer and a profile. Skill
//! coverage is real; step completion is pinned to a fixed share of the path
//! (see `completed_steps`).

use super::types::{JobOffer, Profile, ProgressSnapshot};

/// Default share of steps reported as completed
pub const DEFAULT_COMPLETION_PERCENT: u32 = 60;

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0
fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part);
    let whole = u64::from(whole);
    ((100 * part + whole / 2) / whole) as u32
}

/// Whether a profile skill covers a required skill, case-insensitively and
/// in either direction
fn skill_matches(profile_skill: &str, required_skill: &str) -> bool {
    let have = profile_skill.trim().to_lowercase();
    let need = required_skill.trim().to_lowercase();
    if have.is_empty() || need.is_empty() {
        return false;
    }
    need.contains(&have) || have.contains(&need)
}

/// Number of profile skills relevant to at least one required skill
pub fn relevant_skill_count(profile_skills: &[String], required_skills: &[String]) -> u32 {
    profile_skills
        .iter()
        .filter(|skill| required_skills.iter().any(|req| skill_matches(skill, req)))
        .count() as u32
}

/// Progress toward `offer` using the default completion share
pub fn compute_progress(offer: &JobOffer, profile: &Profile) -> ProgressSnapshot {
    compute_progress_with(offer, profile, DEFAULT_COMPLETION_PERCENT)
}

pub fn compute_progress_with(
    offer: &JobOffer,
    profile: &Profile,
    completion_percent: u32,
) -> ProgressSnapshot {
    let total_steps = match offer.career_path.as_ref() {
        Some(path) if !path.is_empty() => path.len() as u32,
        _ => {
            log::debug!("[PROGRESS] Offer '{}' has no career path", offer.id);
            return ProgressSnapshot::default();
        }
    };

    let total_required = offer.required_skills.len() as u32;
    let relevant = relevant_skill_count(&profile.skills, &offer.required_skills);
    let skills_progress = percentage(relevant, total_required).min(100);

    let completed_steps = completed_steps(total_steps, skills_progress, completion_percent);

    let snapshot = ProgressSnapshot {
        completed_steps,
        total_steps,
        progress_percentage: percentage(completed_steps, total_steps),
        relevant_skills_acquired: relevant,
        total_required_skills: total_required,
        skills_progress_percentage: skills_progress,
    };
    log::debug!("[PROGRESS] Offer '{}': {:?}", offer.id, snapshot);
    snapshot
}

/// Completed steps are pinned to `floor(total * completion_percent / 100)`.
/// The skill-based estimate is still computed and logged, but does not
/// affect the result.
// TODO: confirm with product whether completion should follow skill coverage
// instead of the fixed share before exposing this outside the demo flow.
fn completed_steps(total_steps: u32, skills_progress: u32, completion_percent: u32) -> u32 {
    let skill_based = (total_steps * skills_progress + 50) / 100;
    let fixed = total_steps * completion_percent.min(100) / 100;
    log::debug!(
        "[PROGRESS] Skill-based estimate {} of {} steps, reporting fixed {}",
        skill_based,
        total_steps,
        fixed
    );
    fixed
}
