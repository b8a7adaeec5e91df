use crate::domain::earnings::{EarningsResult, EarningsSummary};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 6] = [
    "affiliate",
    "commission_rate",
    "capped",
    "sales_credits",
    "cashout_credits",
    "total_credits",
];

#[derive(Serialize)]
struct EarningsRow {
    affiliate: u32,
    commission_rate: String,
    capped: bool,
    sales_credits: String,
    cashout_credits: String,
    total_credits: String,
}

/// Writes evaluated earnings as CSV, one row per affiliate, using the rounded
/// display figures.
pub struct EarningsWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> EarningsWriter<W> {
    /// Creates the writer and emits the header row.
    pub fn new(sink: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        writer.write_record(HEADER)?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, affiliate: u32, result: &EarningsResult) -> Result<()> {
        let EarningsSummary {
            commission_rate_percent,
            capped,
            credits_from_sales,
            credits_from_cashout,
            total_credits,
        } = result.summary();

        self.writer.serialize(EarningsRow {
            affiliate,
            commission_rate: commission_rate_percent,
            capped,
            sales_credits: credits_from_sales,
            cashout_credits: credits_from_cashout,
            total_credits,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::{Credits, Rate};
    use rust_decimal_macros::dec;

    #[test]
    fn test_writes_header_and_rounded_rows() {
        let result = EarningsResult {
            credits_from_sales: Credits::new(dec!(180)),
            credits_from_cashout: Credits::new(dec!(1.234)),
            final_commission_rate: Rate::new(dec!(0.9)),
            is_capped: true,
            total_credits: Credits::new(dec!(181.234)),
            ..Default::default()
        };

        let mut buffer = Vec::new();
        {
            let mut writer = EarningsWriter::new(&mut buffer).unwrap();
            writer.write(3, &result).unwrap();
            writer.flush().unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("affiliate,commission_rate,capped,sales_credits,cashout_credits,total_credits")
        );
        assert_eq!(lines.next(), Some("3,90.0,true,180.00,1.23,181.23"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_header_written_without_rows() {
        let mut buffer = Vec::new();
        {
            let mut writer = EarningsWriter::new(&mut buffer).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(
            String::from_utf8(buffer).unwrap().trim_end(),
            HEADER.join(",")
        );
    }
}
