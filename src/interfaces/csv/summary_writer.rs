use crate::domain::cart::CartTotals;
use crate::domain::money::MoneyFormatter;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One checkout outcome as written to the output CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub subtotal: String,
    pub processing_fee: String,
    pub shipping_fee: String,
    pub total: String,
    pub status: String,
    pub detail: String,
}

impl SummaryRecord {
    /// Formats `totals` with `formatter`. The totals are the ones charged,
    /// captured before a successful charge empties the cart.
    pub fn new(
        totals: &CartTotals,
        formatter: &MoneyFormatter,
        status: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            subtotal: formatter.format(totals.subtotal),
            processing_fee: formatter.format(totals.processing_fee),
            shipping_fee: formatter.format(totals.shipping_fee),
            total: formatter.format(totals.total),
            status: status.into(),
            detail: detail.into(),
        }
    }
}

/// Writes checkout summaries as CSV with a header row.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write(&mut self, record: &SummaryRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}
