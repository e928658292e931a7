use rand::Rng;
use rust_decimal::Decimal;
use total_rewards::domain::formula::SimulationFormula;
use total_rewards::domain::money::{Money, Price};

fn random_formula(rng: &mut impl Rng) -> (String, SimulationFormula) {
    let price_multiplier = Decimal::new(rng.gen_range(1..=5_000), 4);
    let tax_multiplier = Decimal::new(rng.gen_range(0..=100), 2);
    let text = format!("(price * {price_multiplier}) * {tax_multiplier}");
    let formula = text.parse().unwrap();
    (text, formula)
}

#[test]
fn test_net_never_exceeds_gross() {
    let mut rng = rand::thread_rng();

    for _ in 0..1_000 {
        let (text, formula) = random_formula(&mut rng);
        let price = Price::new(Decimal::new(rng.gen_range(1..=20_000_000), 2)).unwrap();
        let costs = formula.apply(price).unwrap();

        assert!(costs.net_cost <= costs.gross_cost, "{text} at {price:?}");
        assert_eq!(costs.savings, costs.gross_cost - costs.net_cost, "{text} at {price:?}");
        assert!(costs.savings >= Money::ZERO);
    }
}

#[test]
fn test_costs_scale_with_price() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let (text, formula) = random_formula(&mut rng);
        let low = rng.gen_range(100..=1_000_000);
        let high = low + rng.gen_range(1..=1_000_000);

        let cheap = formula.apply(Price::new(Decimal::from(low)).unwrap()).unwrap();
        let pricey = formula.apply(Price::new(Decimal::from(high)).unwrap()).unwrap();

        assert!(cheap.gross_cost <= pricey.gross_cost, "{text}");
        assert!(cheap.net_cost <= pricey.net_cost, "{text}");
    }
}
