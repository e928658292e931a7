use super::formula::SimulationFormula;
use super::money::Money;
use crate::error::{BenefitsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenefitCategory {
    Mobility,
    Health,
    Family,
    Finance,
    Community,
    Lifestyle,
}

impl fmt::Display for BenefitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mobility => "Mobility",
            Self::Health => "Health",
            Self::Family => "Family",
            Self::Finance => "Finance",
            Self::Community => "Community",
            Self::Lifestyle => "Lifestyle",
        };
        f.write_str(name)
    }
}

/// Default status a benefit has in the catalog before any user acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogStatus {
    Available,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    pub has_calculator: bool,
    pub formula: String,
}

/// A benefit offered in the marketplace. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub category: BenefitCategory,
    pub name: String,
    pub status: CatalogStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub has_calculator: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_config: Option<SimulationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_value: Option<Money>,
}

impl CatalogEntry {
    /// Reconciles the flat (`hasCalculator` + `simulationFormula`) and nested
    /// (`simulationConfig`) calculator fields so both are populated.
    pub fn normalized(mut self) -> Self {
        match (&self.simulation_config, &self.simulation_formula) {
            (Some(config), None) => {
                self.has_calculator = config.has_calculator;
                self.simulation_formula = Some(config.formula.clone());
            }
            (None, Some(formula)) if self.has_calculator => {
                self.simulation_config = Some(SimulationConfig {
                    has_calculator: true,
                    formula: formula.clone(),
                });
            }
            _ => {}
        }
        self
    }

    /// The parsed leasing formula, if this benefit offers a cost calculator.
    pub fn formula(&self) -> Option<Result<SimulationFormula>> {
        let config = self.simulation_config.as_ref()?;
        if !config.has_calculator || config.formula.is_empty() {
            return None;
        }
        Some(config.formula.parse())
    }

    pub fn supports_simulation(&self) -> bool {
        self.formula().is_some()
    }
}

/// The full set of marketplace benefits, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut normalized: Vec<CatalogEntry> = Vec::with_capacity(entries.len());
        for entry in entries.into_iter().map(CatalogEntry::normalized) {
            if normalized.iter().any(|e| e.id == entry.id) {
                return Err(BenefitsError::ValidationError(format!(
                    "Duplicate catalog id: {}",
                    entry.id
                )));
            }
            normalized.push(entry);
        }
        Ok(Self {
            entries: normalized,
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, benefit_id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == benefit_id)
    }

    pub fn require(&self, benefit_id: &str) -> Result<&CatalogEntry> {
        self.get(benefit_id)
            .ok_or_else(|| BenefitsError::BenefitNotFound(benefit_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
