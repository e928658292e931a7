use crate::domain::catalog::{CatalogEntry, CatalogStatus};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct Row<'a> {
    id: &'a str,
    category: String,
    status: CatalogStatus,
    calculator: &'static str,
    fixed_value: Option<Decimal>,
}

/// Writes the catalog overview table: `id,category,status,calculator,fixed_value`.
pub struct CatalogWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CatalogWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_catalog(&mut self, entries: &[CatalogEntry]) -> Result<()> {
        for entry in entries {
            self.writer.serialize(Row {
                id: &entry.id,
                category: entry.category.to_string(),
                status: entry.status,
                calculator: if entry.supports_simulation() { "yes" } else { "no" },
                fixed_value: entry.fixed_value.map(|v| v.value().normalize()),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
