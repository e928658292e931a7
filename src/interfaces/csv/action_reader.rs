use crate::domain::money::Price;
use crate::error::{BenefitsError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Request,
    Activate,
    Cancel,
}

/// One row of a batch file: `action, user, benefit, vehicle_price`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct BenefitAction {
    pub action: ActionType,
    pub user: String,
    pub benefit: String,
    pub vehicle_price: Option<Decimal>,
}

impl BenefitAction {
    pub fn price(&self) -> Result<Option<Price>> {
        self.vehicle_price.map(Price::try_from).transpose()
    }
}

/// Reads marketplace actions from a CSV source.
///
/// Wraps `csv::Reader`, trimming whitespace and tolerating a missing trailing
/// `vehicle_price` column.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    /// Creates a new `ActionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes actions, one `Result` per row.
    pub fn actions(self) -> impl Iterator<Item = Result<BenefitAction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BenefitsError::from))
    }
}
