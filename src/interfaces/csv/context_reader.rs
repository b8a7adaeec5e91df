use crate::domain::context::{GuildRank, UserContext, WeeklyBooster};
use crate::domain::money::Credits;
use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of the batch input: an affiliate id and its standing.
///
/// Empty `booster`/`guild` cells mean none; empty or missing flags mean false.
/// Amounts are parsed from the cell text so no digits are lost.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ContextRecord {
    pub affiliate: u32,
    pub level: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub affiliate_sales: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub referral_cashout: Decimal,
    pub is_vip: Option<bool>,
    pub vip_months: Option<u32>,
    pub loyalty: Option<bool>,
    pub booster: Option<WeeklyBooster>,
    pub guild: Option<GuildRank>,
}

impl ContextRecord {
    pub fn into_context(self) -> (u32, UserContext) {
        let context = UserContext {
            level: self.level,
            affiliate_sales: Credits::new(self.affiliate_sales),
            referral_cashout: Credits::new(self.referral_cashout),
            is_vip: self.is_vip.unwrap_or(false),
            vip_consecutive_months: self.vip_months.unwrap_or(0),
            has_loyalty_bonus: self.loyalty.unwrap_or(false),
            weekly_booster: self.booster.unwrap_or_default(),
            guild_rank: self.guild.unwrap_or_default(),
        };
        (self.affiliate, context)
    }
}

/// Reads affiliate contexts from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths, so
/// trailing optional columns may be left off.
pub struct ContextReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ContextReader<R> {
    /// Creates a new `ContextReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records.
    pub fn records(self) -> impl Iterator<Item = Result<ContextRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(EngineError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str =
        "affiliate, level, affiliate_sales, referral_cashout, is_vip, vip_months, loyalty, booster, guild";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{HEADER}\n1, 10, 200, 50, true, 6, false, top1, top2\n2, 3, 12.5, 0, , , , , "
        );
        let reader = ContextReader::new(data.as_bytes());
        let results: Vec<Result<ContextRecord>> = reader.records().collect();

        assert_eq!(results.len(), 2);
        let (affiliate, context) = results[0].as_ref().unwrap().clone().into_context();
        assert_eq!(affiliate, 1);
        assert_eq!(context.level, 10);
        assert_eq!(context.affiliate_sales, Credits::new(dec!(200)));
        assert!(context.is_vip);
        assert_eq!(context.vip_consecutive_months, 6);
        assert_eq!(context.weekly_booster, WeeklyBooster::Top1);
        assert_eq!(context.guild_rank, GuildRank::Top2);

        let (_, plain) = results[1].as_ref().unwrap().clone().into_context();
        assert_eq!(plain.affiliate_sales, Credits::new(dec!(12.5)));
        assert!(!plain.is_vip);
        assert!(!plain.has_loyalty_bonus);
        assert_eq!(plain.weekly_booster, WeeklyBooster::None);
        assert_eq!(plain.guild_rank, GuildRank::None);
    }

    #[test]
    fn test_reader_short_rows_default_optional_columns() {
        let data = format!("{HEADER}\n7, 1, 10, 10");
        let reader = ContextReader::new(data.as_bytes());
        let record = reader.records().next().unwrap().unwrap();

        assert_eq!(record.affiliate, 7);
        assert_eq!(record.is_vip, None);
        assert_eq!(record.guild, None);
    }

    #[test]
    fn test_reader_keeps_every_digit_of_amounts() {
        let data = format!(
            "{HEADER}\n1, 10, 12345678901234567.89, 0.000000000000000001\n2, 0, 79228162514264337593543950335, 0"
        );
        let reader = ContextReader::new(data.as_bytes());
        let results: Vec<Result<ContextRecord>> = reader.records().collect();

        let precise = results[0].as_ref().unwrap();
        assert_eq!(precise.affiliate_sales, dec!(12345678901234567.89));
        assert_eq!(precise.referral_cashout, dec!(0.000000000000000001));

        let largest = results[1].as_ref().unwrap();
        assert_eq!(largest.affiliate_sales, Decimal::MAX);
    }

    #[test]
    fn test_reader_rejects_non_numeric_amount() {
        let data = format!("{HEADER}\n1, 10, lots, 0");
        let reader = ContextReader::new(data.as_bytes());
        let results: Vec<Result<ContextRecord>> = reader.records().collect();

        assert!(matches!(results[0], Err(EngineError::Csv(_))));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = format!("{HEADER}\n1, 10, 200, 50, true, 6, false, top1, top9");
        let reader = ContextReader::new(data.as_bytes());
        let results: Vec<Result<ContextRecord>> = reader.records().collect();

        assert!(matches!(results[0], Err(EngineError::Csv(_))));
    }
}
