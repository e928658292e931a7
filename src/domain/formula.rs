use super::money::{Money, Price};
use crate::error::BenefitsError;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

static FORMULA_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\(\s*price\s*\*\s*(\d+(?:\.\d+)?)\s*\)\s*\*\s*(\d+(?:\.\d+)?)\s*$")
        .expect("formula pattern is valid")
});

/// Leasing cost model of the shape `(price * A) * B`.
///
/// `A` turns the vehicle list price into a monthly gross salary conversion,
/// `B` is the share of that gross amount the employee still pays after tax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationFormula {
    pub price_multiplier: Decimal,
    pub tax_multiplier: Decimal,
}

impl FromStr for SimulationFormula {
    type Err = BenefitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = FORMULA_SHAPE
            .captures(s)
            .ok_or_else(|| BenefitsError::InvalidFormula(s.to_string()))?;

        let parse = |idx: usize| {
            Decimal::from_str(&caps[idx]).map_err(|_| BenefitsError::InvalidFormula(s.to_string()))
        };
        let price_multiplier = parse(1)?;
        let tax_multiplier = parse(2)?;

        if tax_multiplier > Decimal::ONE {
            return Err(BenefitsError::InvalidFormula(format!(
                "{s} (tax multiplier above 1)"
            )));
        }

        Ok(Self {
            price_multiplier,
            tax_multiplier,
        })
    }
}

impl SimulationFormula {
    pub fn apply(&self, price: Price) -> Result<CostBreakdown, BenefitsError> {
        let out_of_range = || {
            BenefitsError::ValidationError(format!(
                "Vehicle price {} is too large for this formula",
                price.value().normalize()
            ))
        };
        let gross = Money::from(price)
            .checked_mul(self.price_multiplier)
            .ok_or_else(out_of_range)?;
        let net = gross
            .checked_mul(self.tax_multiplier)
            .ok_or_else(out_of_range)?;
        Ok(CostBreakdown::from_gross_and_net(gross, net))
    }
}

/// Monthly cost split of a benefit, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub gross_cost: Money,
    pub net_cost: Money,
    pub savings: Money,
}

impl CostBreakdown {
    /// Share of a health benefit's value the employee pays once the 40% tax
    /// advantage is applied.
    pub const HEALTH_NET_SHARE: Decimal = rust_decimal_macros::dec!(0.6);

    /// Savings are taken from the rounded amounts so that
    /// `savings == gross_cost - net_cost` always holds.
    pub fn from_gross_and_net(gross: Money, net: Money) -> Self {
        let gross_cost = gross.round_cents();
        let net_cost = net.round_cents();
        Self {
            gross_cost,
            net_cost,
            savings: gross_cost - net_cost,
        }
    }

    pub fn from_fixed_value(value: Money) -> Self {
        Self::from_gross_and_net(value, value * Self::HEALTH_NET_SHARE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_formula() {
        let formula: SimulationFormula = "(price * 0.036) * 0.6".parse().unwrap();
        assert_eq!(formula.price_multiplier, dec!(0.036));
        assert_eq!(formula.tax_multiplier, dec!(0.6));
    }

    #[test]
    fn test_parse_formula_tolerates_spacing() {
        let formula: SimulationFormula = " ( price*0.01 )*0.58 ".parse().unwrap();
        assert_eq!(formula.price_multiplier, dec!(0.01));
        assert_eq!(formula.tax_multiplier, dec!(0.58));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for bad in [
            "price * 0.036 * 0.6",
            "(price + 0.036) * 0.6",
            "(price * -0.036) * 0.6",
            "(cost * 0.036) * 0.6",
            "(price * 0.036) * 0.6 + 1",
            "",
        ] {
            assert!(
                matches!(
                    bad.parse::<SimulationFormula>(),
                    Err(BenefitsError::InvalidFormula(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_tax_multiplier_above_one() {
        assert!(matches!(
            "(price * 0.036) * 1.2".parse::<SimulationFormula>(),
            Err(BenefitsError::InvalidFormula(_))
        ));
    }

    #[test]
    fn test_apply_mobility_formula() {
        let formula: SimulationFormula = "(price * 0.036) * 0.6".parse().unwrap();
        let costs = formula.apply(Price::new(dec!(3000)).unwrap()).unwrap();
        assert_eq!(costs.gross_cost, Money::new(dec!(108.00)));
        assert_eq!(costs.net_cost, Money::new(dec!(64.80)));
        assert_eq!(costs.savings, Money::new(dec!(43.20)));
    }

    #[test]
    fn test_apply_rounds_to_cents() {
        let formula: SimulationFormula = "(price * 0.0333) * 0.55".parse().unwrap();
        let costs = formula.apply(Price::new(dec!(1234.56)).unwrap()).unwrap();
        // 1234.56 * 0.0333 = 41.110848 ; * 0.55 = 22.6109664
        assert_eq!(costs.gross_cost, Money::new(dec!(41.11)));
        assert_eq!(costs.net_cost, Money::new(dec!(22.61)));
        assert_eq!(costs.savings, Money::new(dec!(18.50)));
    }

    #[test]
    fn test_apply_overflow_is_validation_error() {
        let formula: SimulationFormula = "(price * 100) * 0.5".parse().unwrap();
        let price = Price::new(Decimal::from_str("1000000000000000000000000000").unwrap()).unwrap();
        assert!(matches!(
            formula.apply(price),
            Err(BenefitsError::ValidationError(_))
        ));
    }

    #[test]
    fn test_fixed_value_costs() {
        let costs = CostBreakdown::from_fixed_value(Money::new(dec!(49)));
        assert_eq!(costs.gross_cost, Money::new(dec!(49)));
        assert_eq!(costs.net_cost, Money::new(dec!(29.40)));
        assert_eq!(costs.savings, Money::new(dec!(19.60)));
    }
}
