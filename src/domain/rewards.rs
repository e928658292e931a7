//! Total-rewards arithmetic: what a user's package is worth per month once
//! bonus, benefits and the tax they save are added to the base salary.

use super::money::Money;
use super::profile::{BenefitType, CompensationBenefit, UserProfile};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Monthly salary above which bike leasing is taxed at the top bracket.
const HIGH_EARNER_THRESHOLD: Decimal = dec!(4000);
const HIGH_EARNER_TAX_RATE: Decimal = dec!(0.42);
const STANDARD_TAX_RATE: Decimal = dec!(0.20);
/// Gross salary reduction assumed for a bike lease with no recorded value.
const DEFAULT_BIKE_LEASE_REDUCTION: Decimal = dec!(80);
const PENSION_TAX_RELIEF: Decimal = dec!(0.25);
const MONTHS_PER_YEAR: Decimal = dec!(12);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxSaving {
    pub monthly: Money,
    pub annual: Money,
}

impl TaxSaving {
    const NONE: Self = Self {
        monthly: Money::ZERO,
        annual: Money::ZERO,
    };

    fn monthly(monthly: Money) -> Self {
        Self {
            monthly,
            annual: monthly * MONTHS_PER_YEAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualBreakdown {
    pub base_salary: Option<Money>,
    pub cash_bonus: Option<Money>,
    pub employer_pension: Option<Money>,
    pub benefits_value: Option<Money>,
    pub tax_savings: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalRewardsSummary {
    pub user_id: String,
    pub currency: String,
    pub visual_breakdown: VisualBreakdown,
    pub total_monthly_comp: Option<Money>,
    pub ytd_total: Option<Money>,
    pub transparency_message: String,
}

/// Tax saved by a single benefit, depending on its kind.
pub fn tax_saving(benefit: &CompensationBenefit, base_salary: Money) -> TaxSaving {
    match benefit.benefit_type {
        BenefitType::BikeLeasing => {
            let rate = if base_salary.value() > HIGH_EARNER_THRESHOLD {
                HIGH_EARNER_TAX_RATE
            } else {
                STANDARD_TAX_RATE
            };
            let reduction = if benefit.value.is_zero() {
                Money::new(DEFAULT_BIKE_LEASE_REDUCTION)
            } else {
                benefit.value
            };
            let net_cost = reduction * (Decimal::ONE - rate);
            TaxSaving::monthly(reduction - net_cost)
        }
        BenefitType::Pension => TaxSaving::monthly(benefit.value * PENSION_TAX_RELIEF),
        BenefitType::Other(_) => TaxSaving::NONE,
    }
}

pub fn transparency_message(total_comp: Money, base_salary: Money) -> String {
    let base = base_salary.value();
    if base <= Decimal::ZERO {
        return "Unable to calculate compensation difference.".to_string();
    }

    let percentage = (total_comp.value() - base) / base * dec!(100);
    let rounded = percentage
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .normalize();

    if percentage > Decimal::ZERO {
        format!("Your actual compensation is {rounded}% higher than your gross salary.")
    } else if percentage < Decimal::ZERO {
        format!("Your actual compensation is {rounded}% lower than your gross salary.")
    } else {
        "Your actual compensation equals your gross salary.".to_string()
    }
}

/// Aggregates a user's monthly compensation from their profile and benefits.
///
/// Inactive benefits and benefits of other users are ignored. When the profile
/// is private every monetary field is `None`; the transparency message is
/// still produced.
pub fn calculate_total_rewards(
    profile: &UserProfile,
    benefits: &[CompensationBenefit],
) -> TotalRewardsSummary {
    let mut benefits_value = Money::ZERO;
    let mut tax_savings = Money::ZERO;
    let mut employer_pension = Money::ZERO;

    for benefit in benefits
        .iter()
        .filter(|b| b.is_active && b.user_id == profile.user_id)
    {
        benefits_value += benefit.value;
        tax_savings += tax_saving(benefit, profile.base_salary).monthly;

        if benefit.benefit_type == BenefitType::Pension {
            employer_pension += benefit.value;
        }
    }

    let total_monthly_comp =
        profile.base_salary + profile.fixed_bonus + benefits_value + tax_savings;
    let ytd_total = total_monthly_comp * MONTHS_PER_YEAR;
    let transparency_message = transparency_message(total_monthly_comp, profile.base_salary);

    let mask = |value: Money| (!profile.is_private).then_some(value);

    TotalRewardsSummary {
        user_id: profile.user_id.clone(),
        currency: profile.currency.clone(),
        visual_breakdown: VisualBreakdown {
            base_salary: mask(profile.base_salary),
            cash_bonus: mask(profile.fixed_bonus),
            employer_pension: mask(employer_pension),
            benefits_value: mask(benefits_value),
            tax_savings: mask(tax_savings),
        },
        total_monthly_comp: mask(total_monthly_comp),
        ytd_total: mask(ytd_total),
        transparency_message,
    }
}
