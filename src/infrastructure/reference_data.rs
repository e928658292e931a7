use crate::domain::catalog::{Catalog, CatalogEntry};
use crate::domain::profile::{CompensationBenefit, UserProfile};
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const CATALOG_FILE: &str = "benefits_catalog.json";
pub const PROFILES_FILE: &str = "user_profiles.json";
pub const COMPENSATION_FILE: &str = "compensation_benefits.json";

/// User every request acts on when no user id is given.
pub const DEMO_USER_ID: &str = "orbit-demo-user";

const EMBEDDED_CATALOG: &str = include_str!("../../data/benefits_catalog.json");
const EMBEDDED_PROFILES: &str = include_str!("../../data/user_profiles.json");
const EMBEDDED_COMPENSATION: &str = include_str!("../../data/compensation_benefits.json");

/// Static mock data the service runs on: the marketplace catalog, user
/// profiles and the benefits counted in each user's total rewards.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub catalog: Catalog,
    pub profiles: Vec<UserProfile>,
    pub compensation: Vec<CompensationBenefit>,
}

impl ReferenceData {
    /// Data compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG, EMBEDDED_PROFILES, EMBEDDED_COMPENSATION)
    }

    /// Reads the three JSON files from `dir`. Missing files fall back to the
    /// embedded copy.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let read = |name: &str, fallback: &'static str| -> Result<String> {
            let path = dir.join(name);
            if path.exists() {
                debug!(path = %path.display(), "loading reference data");
                Ok(fs::read_to_string(path)?)
            } else {
                Ok(fallback.to_string())
            }
        };

        Self::from_json(
            &read(CATALOG_FILE, EMBEDDED_CATALOG)?,
            &read(PROFILES_FILE, EMBEDDED_PROFILES)?,
            &read(COMPENSATION_FILE, EMBEDDED_COMPENSATION)?,
        )
    }

    pub fn load(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    pub fn from_json(catalog: &str, profiles: &str, compensation: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = parse(catalog)?;
        Ok(Self {
            catalog: Catalog::new(entries)?,
            profiles: parse(profiles)?,
            compensation: parse(compensation)?,
        })
    }

    pub fn profile(&self, user_id: &str) -> Option<&UserProfile> {
        self.profiles.iter().find(|p| p.user_id == user_id)
    }

    /// Active compensation benefits of `user_id`.
    pub fn active_compensation(&self, user_id: &str) -> Vec<CompensationBenefit> {
        self.compensation
            .iter()
            .filter(|b| b.user_id == user_id && b.is_active)
            .cloned()
            .collect()
    }
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CatalogStatus;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_data_loads() {
        let data = ReferenceData::embedded().unwrap();
        assert!(!data.catalog.is_empty());
        assert!(data.profile(DEMO_USER_ID).is_some());

        // Every calculator formula shipped with the binary must parse.
        for entry in data.catalog.entries() {
            if let Some(formula) = entry.formula() {
                assert!(formula.is_ok(), "bad formula on {}", entry.id);
            }
        }
    }

    #[test]
    fn test_active_compensation_filters_inactive() {
        let data = ReferenceData::embedded().unwrap();
        let active = data.active_compensation(DEMO_USER_ID);
        assert!(active.iter().all(|b| b.is_active && b.user_id == DEMO_USER_ID));
        assert!(active.len() < data.compensation.iter().filter(|b| b.user_id == DEMO_USER_ID).count());
    }

    #[test]
    fn test_from_dir_overrides_and_falls_back() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CATALOG_FILE),
            r#"[{"id":"only","category":"Lifestyle","name":"Only","status":"ACTIVE","fixedValue":10}]"#,
        )
        .unwrap();

        let data = ReferenceData::from_dir(dir.path()).unwrap();
        assert_eq!(data.catalog.len(), 1);
        assert_eq!(data.catalog.entries()[0].status, CatalogStatus::Active);
        // Profiles were not overridden
        assert!(data.profile(DEMO_USER_ID).is_some());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(PROFILES_FILE), "not json").unwrap();
        assert!(ReferenceData::from_dir(dir.path()).is_err());
    }
}
