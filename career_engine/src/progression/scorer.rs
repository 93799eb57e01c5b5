//! Job Recommendation Scorer
//!
//! Turns a profile into at most `max_offers` ranked job offers:
//! - archetype-derived offers from the catalog table (deterministic)
//! - interest-derived offers at a randomly picked organization
//!
//! Randomness is injected so callers that need reproducible output can pass
//! a seeded generator. Empty skills or interests never produce an empty
//! offer; generic content is used instead.

use super::catalog::Catalog;
use super::config::EngineConfig;
use super::error::{CatalogError, EngineResult};
use super::path::generate_career_path;
use super::types::{
    EmploymentType, JobOffer, Organization, Profile, SalaryRange, Seniority,
};
use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;

const TOP_MATCH_SCORE: u32 = 95;
const MATCH_SCORE_STEP: u32 = 2;
const INTEREST_MATCH_SCORE: u8 = 90;

const BASE_SALARY_MIN: u32 = 60_000;
const BASE_SALARY_MAX: u32 = 90_000;
const SALARY_MIN_STEP: u32 = 10_000;
const SALARY_MAX_STEP: u32 = 15_000;
const INTEREST_SALARY: (u32, u32) = (50_000, 80_000);
const CURRENCY: &str = "USD";

/// Used whenever the caller declared no skills
pub const FALLBACK_SKILLS: [&str; 3] = ["Communication", "Problem Solving", "Teamwork"];

fn fallback_skills() -> Vec<String> {
    FALLBACK_SKILLS.iter().map(|s| s.to_string()).collect()
}

/// Deterministic offer id from organization id and title
pub fn offer_id(organization_id: &str, title: &str) -> String {
    let raw = format!("{}-{}", organization_id, title).to_lowercase();
    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

pub struct JobScorer<'a> {
    catalog: &'a Catalog,
    config: &'a EngineConfig,
}

impl<'a> JobScorer<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Generate ranked recommendations for a profile
    pub fn recommend<R: Rng>(
        &self,
        profile: &Profile,
        rng: &mut R,
    ) -> EngineResult<Vec<JobOffer>> {
        log::info!(
            "[SCORER] Generating recommendations for {} ({} skills, {} interests)",
            profile.archetype,
            profile.skills.len(),
            profile.interests.len()
        );

        let mut offers = self.archetype_offers(profile)?;
        log::debug!("[SCORER] {} archetype-derived offers", offers.len());

        let interest_offers = self.interest_offers(profile, &offers, rng)?;
        log::debug!("[SCORER] {} interest-derived offers", interest_offers.len());
        offers.extend(interest_offers);

        offers.truncate(self.config.offer_limit());
        // stable, so ties keep archetype offers ahead of interest offers
        offers.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        log::info!("[SCORER] Returning {} offers", offers.len());
        Ok(offers)
    }

    fn archetype_offers(&self, profile: &Profile) -> EngineResult<Vec<JobOffer>> {
        let table = self.catalog.table_for(profile.archetype).ok_or_else(|| {
            CatalogError::Invalid(format!("no table usable for {}", profile.archetype.code()))
        })?;
        let organizations = self.catalog.organizations_for(table);
        if organizations.is_empty() {
            return Err(CatalogError::Invalid(format!(
                "table for {} has no known organizations",
                profile.archetype.code()
            ))
            .into());
        }

        let skills = if profile.skills.is_empty() {
            fallback_skills()
        } else {
            profile.skills.clone()
        };

        let mut seen = HashSet::new();
        let roles = table
            .roles
            .iter()
            .filter(|role| seen.insert(role.to_lowercase()))
            .take(self.config.archetype_offer_count.max(1));

        let offers = roles
            .enumerate()
            .map(|(index, title)| {
                let organization = organizations[index % organizations.len()];
                let rank = index as u32;
                let match_score = TOP_MATCH_SCORE.saturating_sub(MATCH_SCORE_STEP * rank) as u8;

                JobOffer {
                    id: offer_id(&organization.id, title),
                    title: title.clone(),
                    organization: organization.clone(),
                    match_score,
                    match_reason: format!(
                        "Your {} personality aligns well with the day-to-day work of a {}.",
                        profile.archetype, title
                    ),
                    description: describe(title, organization),
                    requirements: vec![
                        "Bachelor's degree or equivalent experience".to_string(),
                        format!("Working knowledge of {}", skills.join(", ")),
                        "Strong communication skills".to_string(),
                    ],
                    required_skills: skills.clone(),
                    salary: SalaryRange {
                        min: BASE_SALARY_MIN + SALARY_MIN_STEP * rank,
                        max: BASE_SALARY_MAX + SALARY_MAX_STEP * rank,
                        currency: CURRENCY.to_string(),
                    },
                    location: organization.location.clone(),
                    employment_type: EmploymentType::FullTime,
                    seniority: Seniority::Mid,
                    posted_at: Utc::now(),
                    career_path: Some(generate_career_path(title, organization)),
                }
            })
            .collect();

        Ok(offers)
    }

    fn interest_offers<R: Rng>(
        &self,
        profile: &Profile,
        existing: &[JobOffer],
        rng: &mut R,
    ) -> EngineResult<Vec<JobOffer>> {
        if self.catalog.organizations.is_empty() {
            return Err(CatalogError::Invalid("no organizations".to_string()).into());
        }

        let taken: HashSet<String> = existing.iter().map(|o| o.title.to_lowercase()).collect();
        let offers = profile
            .interests
            .iter()
            .take(self.config.interest_offer_count)
            .filter(|interest| !taken.contains(&interest.to_lowercase()))
            .map(|interest| {
                let pick = rng.gen_range(0..self.catalog.organizations.len());
                let organization = &self.catalog.organizations[pick];

                JobOffer {
                    id: offer_id(&organization.id, interest),
                    title: interest.clone(),
                    organization: organization.clone(),
                    match_score: INTEREST_MATCH_SCORE,
                    match_reason: format!("Based on your interest in {}.", interest),
                    description: describe(interest, organization),
                    requirements: vec![
                        format!("Demonstrated interest in {}", interest),
                        "Willingness to learn".to_string(),
                        "Strong communication skills".to_string(),
                    ],
                    required_skills: fallback_skills(),
                    salary: SalaryRange {
                        min: INTEREST_SALARY.0,
                        max: INTEREST_SALARY.1,
                        currency: CURRENCY.to_string(),
                    },
                    location: organization.location.clone(),
                    employment_type: EmploymentType::FullTime,
                    seniority: Seniority::Entry,
                    posted_at: Utc::now(),
                    career_path: Some(generate_career_path(interest, organization)),
                }
            })
            .collect();

        Ok(offers)
    }
}

fn describe(title: &str, organization: &Organization) -> String {
    format!(
        "{} is hiring a {} in {}. Join a {} team offering {}.",
        organization.name,
        title,
        organization.location,
        organization.industry,
        if organization.perks.is_empty() {
            "competitive benefits".to_string()
        } else {
            organization.perks.join(", ")
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::types::Archetype;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile(archetype: Archetype, skills: &[&str], interests: &[&str]) -> Profile {
        let skills: Vec<String> = skills.iter().map(|s| s.to_string()).collect();
        let interests: Vec<String> = interests.iter().map(|s| s.to_string()).collect();
        Profile::new(archetype, &skills, &interests).unwrap()
    }

    fn recommend(profile: &Profile, seed: u64) -> Vec<JobOffer> {
        let catalog = Catalog::builtin();
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        JobScorer::new(&catalog, &config).recommend(profile, &mut rng).unwrap()
    }

    #[test]
    fn test_offer_id_slug() {
        assert_eq!(offer_id("helix-labs", "Data Scientist"), "helix-labs-data-scientist");
        assert_eq!(offer_id("acme", "  UX / UI Designer "), "acme-ux-ui-designer");
    }

    #[test]
    fn test_investigative_with_one_skill() {
        let offers = recommend(&profile(Archetype::Investigative, &["Python"], &[]), 7);
        assert_eq!(offers.len(), 3);
        let scores: Vec<u8> = offers.iter().map(|o| o.match_score).collect();
        assert_eq!(scores, vec![95, 93, 91]);
        for offer in &offers {
            assert_eq!(offer.required_skills, vec!["Python"]);
            assert_eq!(offer.career_path.as_ref().map(|p| p.len()), Some(5));
        }
    }

    #[test]
    fn test_salary_band_widens_by_rank() {
        let offers = recommend(&profile(Archetype::Conventional, &[], &[]), 1);
        let bands: Vec<(u32, u32)> = offers.iter().map(|o| (o.salary.min, o.salary.max)).collect();
        assert_eq!(bands, vec![(60_000, 90_000), (70_000, 105_000), (80_000, 120_000)]);
        assert!(offers.iter().all(|o| o.salary.min <= o.salary.max));
    }

    #[test]
    fn test_roles_pair_with_organizations_in_order() {
        let offers = recommend(&profile(Archetype::Artistic, &["Figma"], &[]), 1);
        let orgs: Vec<&str> = offers.iter().map(|o| o.organization.id.as_str()).collect();
        assert_eq!(orgs, vec!["canvas-studio", "pixelforge", "open-learning"]);
        assert_eq!(offers[0].id, "canvas-studio-ux-designer");
        assert_eq!(offers[0].location, "New York, NY");
    }

    #[test]
    fn test_empty_skills_use_fallback() {
        let offers = recommend(&profile(Archetype::Social, &[], &[]), 1);
        for offer in &offers {
            assert_eq!(offer.required_skills, FALLBACK_SKILLS.to_vec());
        }
    }

    #[test]
    fn test_interest_offers_are_capped_and_ranked() {
        let offers = recommend(
            &profile(Archetype::Enterprising, &["Sales"], &["Photography", "Cooking", "Music"]),
            42,
        );
        assert_eq!(offers.len(), 5);
        let scores: Vec<u8> = offers.iter().map(|o| o.match_score).collect();
        assert_eq!(scores, vec![95, 93, 91, 90, 90]);
        assert_eq!(offers[3].title, "Photography");
        assert_eq!(offers[4].title, "Cooking");
        assert_eq!(offers[3].required_skills, FALLBACK_SKILLS.to_vec());
        assert_eq!(offers[3].seniority, Seniority::Entry);
    }

    #[test]
    fn test_interest_matching_existing_title_is_skipped() {
        let offers = recommend(
            &profile(Archetype::Investigative, &[], &["data scientist", "Astronomy"]),
            3,
        );
        let titles: Vec<&str> = offers.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Data Scientist", "Research Analyst", "Software Engineer", "Astronomy"]
        );
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let p = profile(Archetype::Realistic, &[], &["Woodworking", "Sailing"]);
        let ids = |offers: Vec<JobOffer>| offers.into_iter().map(|o| o.id).collect::<Vec<_>>();
        assert_eq!(ids(recommend(&p, 99)), ids(recommend(&p, 99)));
    }

    #[test]
    fn test_duplicate_roles_are_not_repeated() {
        let mut catalog = Catalog::builtin();
        catalog.archetypes.get_mut(&Archetype::Social).unwrap().roles = vec![
            "Career Counselor".to_string(),
            "career counselor".to_string(),
            "HR Manager".to_string(),
        ];
        let config = EngineConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let offers = JobScorer::new(&catalog, &config)
            .recommend(&profile(Archetype::Social, &[], &[]), &mut rng)
            .unwrap();
        let titles: Vec<&str> = offers.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Career Counselor", "HR Manager"]);
    }

    #[test]
    fn test_out_of_range_config_still_returns_one_to_five() {
        let catalog = Catalog::builtin();
        let p = profile(Archetype::Investigative, &[], &["Chess", "Travel", "Music"]);

        let mut oversized = EngineConfig::default();
        oversized.max_offers = 20;
        oversized.archetype_offer_count = 4;
        oversized.interest_offer_count = 5;
        let mut rng = StdRng::seed_from_u64(0);
        let offers = JobScorer::new(&catalog, &oversized).recommend(&p, &mut rng).unwrap();
        assert_eq!(offers.len(), 5);

        let mut zeroed = EngineConfig::default();
        zeroed.max_offers = 0;
        zeroed.archetype_offer_count = 0;
        zeroed.interest_offer_count = 0;
        let offers = JobScorer::new(&catalog, &zeroed).recommend(&p, &mut rng).unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].match_score, 95);
    }
}
