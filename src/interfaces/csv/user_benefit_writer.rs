use crate::domain::money::Money;
use crate::domain::user_benefit::{BenefitStatus, UserBenefit};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct Row<'a> {
    user: &'a str,
    benefit: &'a str,
    status: BenefitStatus,
    vehicle_price: Option<Decimal>,
    gross_cost: Option<Decimal>,
    net_cost: Option<Decimal>,
    savings: Option<Decimal>,
}

fn plain(money: Option<Money>) -> Option<Decimal> {
    money.map(|m| m.value().normalize())
}

impl<'a> From<&'a UserBenefit> for Row<'a> {
    fn from(record: &'a UserBenefit) -> Self {
        Self {
            user: &record.user_id,
            benefit: &record.benefit_id,
            status: record.status,
            vehicle_price: record.vehicle_price.map(|p| p.value().normalize()),
            gross_cost: plain(record.gross_cost),
            net_cost: plain(record.net_cost),
            savings: plain(record.savings),
        }
    }
}

/// Writes user-benefit records as CSV, one row per record.
pub struct UserBenefitWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> UserBenefitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_records(&mut self, records: &[UserBenefit]) -> Result<()> {
        for record in records {
            self.writer.serialize(Row::from(record))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
