//! Template registry: day templates per traveller profile.

use std::collections::BTreeMap;

use crate::model::{ProfileId, TemplateTable};

use super::{PlanError, Result};

/// High-energy itinerary.
const USER1_TEMPLATES: &str = include_str!("templates/user1.json");

/// Relaxed itinerary.
const USER2_TEMPLATES: &str = include_str!("templates/user2.json");

/// Read-only day templates, one table per profile.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    tables: BTreeMap<ProfileId, TemplateTable>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with the bundled `user1` and `user2` profiles.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for (profile, json) in [("user1", USER1_TEMPLATES), ("user2", USER2_TEMPLATES)] {
            let profile = ProfileId::new(profile);
            let table = serde_json::from_str(json).map_err(|source| PlanError::InvalidTemplate {
                profile: profile.clone(),
                source,
            })?;
            registry.register(profile, table);
        }
        Ok(registry)
    }

    /// Adds a profile, replacing any table already registered under it.
    pub fn register(&mut self, profile: ProfileId, table: TemplateTable) {
        self.tables.insert(profile, table);
    }

    pub fn table(&self, profile: &ProfileId) -> Result<&TemplateTable> {
        self.tables
            .get(profile)
            .ok_or_else(|| PlanError::UnknownProfile(profile.clone()))
    }

    pub fn contains(&self, profile: &ProfileId) -> bool {
        self.tables.contains_key(profile)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &ProfileId> {
        self.tables.keys()
    }
}
