//! Reference Catalog Module
//!
//! Fixed organizations and archetype→role tables the scorer consumes. The
//! engine never mutates catalog entries. A built-in catalog ships with the
//! crate; deployments may load their own from JSON.

use super::error::CatalogError;
use super::types::{Archetype, Organization};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Candidate roles and organizations for one archetype, in preference order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchetypeTable {
    pub roles: Vec<String>,
    pub organization_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub organizations: Vec<Organization>,
    pub archetypes: HashMap<Archetype, ArchetypeTable>,
}

impl Catalog {
    /// Load and validate a catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        let catalog: Catalog = serde_json::from_reader(BufReader::new(file))?;
        catalog.validate()?;
        log::info!(
            "[CATALOG] Loaded {} organizations, {} archetype tables from {}",
            catalog.organizations.len(),
            catalog.archetypes.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every table needs roles and organizations that exist, and the
    /// fallback archetype must be covered
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.organizations.is_empty() {
            return Err(CatalogError::Invalid("no organizations".to_string()));
        }
        if !self.archetypes.contains_key(&Archetype::FALLBACK) {
            return Err(CatalogError::Invalid(format!(
                "missing table for fallback archetype {}",
                Archetype::FALLBACK.code()
            )));
        }

        let known: HashSet<&str> = self.organizations.iter().map(|o| o.id.as_str()).collect();
        for (archetype, table) in &self.archetypes {
            if table.roles.is_empty() || table.organization_ids.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "table for {} needs at least one role and one organization",
                    archetype.code()
                )));
            }
            if let Some(unknown) = table
                .organization_ids
                .iter()
                .find(|id| !known.contains(id.as_str()))
            {
                return Err(CatalogError::Invalid(format!(
                    "table for {} references unknown organization '{}'",
                    archetype.code(),
                    unknown
                )));
            }
        }
        Ok(())
    }

    /// Table for an archetype, or the fallback table when it has none.
    /// `None` only for catalogs that fail `validate`.
    pub fn table_for(&self, archetype: Archetype) -> Option<&ArchetypeTable> {
        self.archetypes
            .get(&archetype)
            .or_else(|| {
                log::debug!(
                    "[CATALOG] No table for {}, using {}",
                    archetype.code(),
                    Archetype::FALLBACK.code()
                );
                self.archetypes.get(&Archetype::FALLBACK)
            })
    }

    pub fn organization(&self, id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == id)
    }

    /// Organizations of a table, in table order
    pub fn organizations_for(&self, table: &ArchetypeTable) -> Vec<&Organization> {
        table
            .organization_ids
            .iter()
            .filter_map(|id| self.organization(id))
            .collect()
    }

    /// The catalog shipped with the engine
    pub fn builtin() -> Self {
        let organizations = vec![
            org("northwind-robotics", "Northwind Robotics", "Detroit, MI", "Manufacturing",
                &["Tool allowance", "On-site gym", "Apprenticeship program"]),
            org("terra-build", "TerraBuild Construction", "Denver, CO", "Construction",
                &["Company vehicle", "Overtime pay", "Safety certifications"]),
            org("helix-labs", "Helix Labs", "Boston, MA", "Biotechnology",
                &["Research budget", "Conference travel", "Stock options"]),
            org("quantum-analytics", "Quantum Analytics", "San Francisco, CA", "Technology",
                &["Remote-friendly", "Learning stipend", "Stock options"]),
            org("canvas-studio", "Canvas Studio", "New York, NY", "Media & Design",
                &["Flexible hours", "Creative sabbatical", "Equipment budget"]),
            org("pixelforge", "PixelForge Games", "Austin, TX", "Entertainment",
                &["Game library", "Remote-friendly", "Profit sharing"]),
            org("brightpath-health", "BrightPath Health", "Chicago, IL", "Healthcare",
                &["Health coverage", "Tuition reimbursement", "Wellness days"]),
            org("open-learning", "Open Learning Foundation", "Seattle, WA", "Education",
                &["Summer hours", "Mission-driven work", "Mentorship"]),
            org("summit-ventures", "Summit Ventures", "New York, NY", "Finance",
                &["Performance bonus", "Leadership track", "Commuter benefits"]),
            org("atlas-consulting", "Atlas Consulting", "London, UK", "Consulting",
                &["Global mobility", "Performance bonus", "MBA sponsorship"]),
            org("ledgerline", "LedgerLine Financial", "Charlotte, NC", "Finance",
                &["Pension plan", "Predictable hours", "CPA support"]),
            org("civic-records", "Civic Records Office", "Washington, DC", "Public Sector",
                &["Job security", "Pension plan", "Hybrid work"]),
        ];

        let archetypes = HashMap::from([
            (Archetype::Realistic, table(
                &["Mechanical Engineer", "Robotics Technician", "Civil Engineer", "Field Service Engineer"],
                &["northwind-robotics", "terra-build", "quantum-analytics"],
            )),
            (Archetype::Investigative, table(
                &["Data Scientist", "Research Analyst", "Software Engineer", "Biomedical Researcher"],
                &["quantum-analytics", "helix-labs", "brightpath-health"],
            )),
            (Archetype::Artistic, table(
                &["UX Designer", "Graphic Designer", "Content Strategist", "Game Artist"],
                &["canvas-studio", "pixelforge", "open-learning"],
            )),
            (Archetype::Social, table(
                &["Career Counselor", "Instructional Designer", "HR Manager", "Community Coordinator"],
                &["open-learning", "brightpath-health", "atlas-consulting"],
            )),
            (Archetype::Enterprising, table(
                &["Product Manager", "Business Development Manager", "Marketing Manager", "Startup Founder"],
                &["summit-ventures", "atlas-consulting", "quantum-analytics"],
            )),
            (Archetype::Conventional, table(
                &["Financial Analyst", "Accountant", "Operations Manager", "Records Administrator"],
                &["ledgerline", "civic-records", "summit-ventures"],
            )),
        ]);

        Self {
            organizations,
            archetypes,
        }
    }
}

fn org(id: &str, name: &str, location: &str, industry: &str, perks: &[&str]) -> Organization {
    Organization {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        industry: industry.to_string(),
        perks: perks.iter().map(|p| p.to_string()).collect(),
    }
}

fn table(roles: &[&str], organization_ids: &[&str]) -> ArchetypeTable {
    ArchetypeTable {
        roles: roles.iter().map(|r| r.to_string()).collect(),
        organization_ids: organization_ids.iter().map(|o| o.to_string()).collect(),
    }
}
