use super::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    /// Gross monthly salary.
    pub base_salary: Money,
    /// Fixed monthly cash bonus.
    pub fixed_bonus: Money,
    pub currency: String,
    #[serde(default)]
    pub is_private: bool,
}

/// Compensation-relevant benefit kinds. Anything unrecognised is kept verbatim
/// and earns no tax saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BenefitType {
    BikeLeasing,
    Pension,
    Other(String),
}

impl From<String> for BenefitType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "bike_leasing" => Self::BikeLeasing,
            "pension" => Self::Pension,
            _ => Self::Other(value),
        }
    }
}

impl From<BenefitType> for String {
    fn from(value: BenefitType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for BenefitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BikeLeasing => f.write_str("bike_leasing"),
            Self::Pension => f.write_str("pension"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxAdvantage {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub tax_rate: Option<Decimal>,
}

/// A benefit counted towards a user's total compensation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationBenefit {
    pub user_id: String,
    pub benefit_type: BenefitType,
    pub name: String,
    /// Monthly value.
    pub value: Money,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_advantage: Option<TaxAdvantage>,
}
