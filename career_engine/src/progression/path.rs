//! Career Path Generator
//!
//! Builds the 5-step path attached to every job offer. The path is a fixed
//! template; an ordered list of keyword rules specializes the first two
//! steps for the role, first match wins. Generation is deterministic and has
//! no side effects.

use super::types::{CareerPathStep, Organization};

// ============================================================
// SPECIALIZATION RULES
// ============================================================

/// Replacement content for steps 1 and 2 when a title matches `keywords`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecializationRule {
    pub name: &'static str,
    /// Lower-case substrings matched against the lower-cased title
    pub keywords: &'static [&'static str],
    pub foundation_skills: &'static [&'static str],
    pub foundation_resources: &'static [&'static str],
    pub practice_skills: &'static [&'static str],
    pub practice_resources: &'static [&'static str],
}

impl SpecializationRule {
    pub fn matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.keywords.iter().any(|k| title.contains(k))
    }
}

/// Evaluated in order; the first matching rule applies
pub const SPECIALIZATION_RULES: &[SpecializationRule] = &[
    SpecializationRule {
        name: "software",
        keywords: &["engineer", "developer", "programmer"],
        foundation_skills: &["Data Structures & Algorithms", "Version Control (Git)", "Programming Fundamentals"],
        foundation_resources: &["CS50 (Harvard)", "The Pragmatic Programmer", "LeetCode"],
        practice_skills: &["System Design", "Code Review", "Testing & Debugging"],
        practice_resources: &["Open-source contributions", "GitHub portfolio projects", "Hackathons"],
    },
    SpecializationRule {
        name: "design",
        keywords: &["designer"],
        foundation_skills: &["Design Principles", "Typography & Color Theory", "Figma"],
        foundation_resources: &["Google UX Design Certificate", "Refactoring UI", "Dribbble"],
        practice_skills: &["User Research", "Prototyping", "Design Systems"],
        practice_resources: &["Behance portfolio", "Daily UI challenge", "Design critique groups"],
    },
    SpecializationRule {
        name: "analytics",
        keywords: &["analyst", "manager", "scientist"],
        foundation_skills: &["Statistics", "SQL", "Excel"],
        foundation_resources: &["Khan Academy Statistics", "Mode SQL Tutorial", "Storytelling with Data"],
        practice_skills: &["Data Visualization", "Stakeholder Communication", "Python for Data Analysis"],
        practice_resources: &["Kaggle competitions", "Tableau Public", "Case study projects"],
    },
];

/// First rule matching the title, if any
pub fn matching_rule(title: &str) -> Option<&'static SpecializationRule> {
    SPECIALIZATION_RULES.iter().find(|rule| rule.matches(title))
}

// ============================================================
// GENERATION
// ============================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Generate the career path for `title` at `organization`
pub fn generate_career_path(title: &str, organization: &Organization) -> Vec<CareerPathStep> {
    let mut steps = vec![
        CareerPathStep {
            step: 1,
            title: "Foundation Building".to_string(),
            description: format!("Build the core knowledge expected of a {}.", title),
            duration: "2-3 months".to_string(),
            skills: strings(&["Industry Fundamentals", "Professional Communication", "Core Tools"]),
            resources: strings(&["Online courses (Coursera, edX)", "Industry reading list"]),
        },
        CareerPathStep {
            step: 2,
            title: "Practical Experience".to_string(),
            description: format!("Apply your skills on real {} work through projects.", title),
            duration: "3-6 months".to_string(),
            skills: strings(&["Hands-on Projects", "Collaboration", "Problem Solving"]),
            resources: strings(&["Volunteer projects", "Internship programs"]),
        },
        CareerPathStep {
            step: 3,
            title: "Professional Certification".to_string(),
            description: format!("Earn a credential recognized in the {} industry.", organization.industry),
            duration: "1-2 months".to_string(),
            skills: strings(&["Industry Certification", "Exam Preparation"]),
            resources: strings(&["Certification bodies", "Practice exams"]),
        },
        CareerPathStep {
            step: 4,
            title: "Networking & Visibility".to_string(),
            description: format!("Connect with people working at {} and in similar roles.", organization.name),
            duration: "Ongoing".to_string(),
            skills: strings(&["Networking", "Personal Branding"]),
            resources: strings(&["LinkedIn", "Industry meetups", "Alumni networks"]),
        },
        CareerPathStep {
            step: 5,
            title: "Interview & Onboarding".to_string(),
            description: format!("Prepare for the {} interview process at {}.", title, organization.name),
            duration: "1 month".to_string(),
            skills: strings(&["Interview Preparation", "Salary Negotiation"]),
            resources: vec![
                "Mock interviews".to_string(),
                format!("{} careers page", organization.name),
            ],
        },
    ];

    match matching_rule(title) {
        Some(rule) => {
            log::debug!("[PATH] '{}' specialized with '{}' rule", title, rule.name);
            steps[0].skills = strings(rule.foundation_skills);
            steps[0].resources = strings(rule.foundation_resources);
            steps[1].skills = strings(rule.practice_skills);
            steps[1].resources = strings(rule.practice_resources);
        }
        None => log::debug!("[PATH] '{}' uses the generic template", title),
    }

    steps
}

/// Ordinals must run 1..=N without gaps
pub fn validate_path(steps: &[CareerPathStep]) -> Result<(), String> {
    for (i, step) in steps.iter().enumerate() {
        let expected = (i + 1) as u32;
        if step.step != expected {
            return Err(format!(
                "Step '{}' has ordinal {}, expected {}",
                step.title, step.step, expected
            ));
        }
    }
    Ok(())
}
