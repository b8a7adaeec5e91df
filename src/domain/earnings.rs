use super::money::{Credits, Rate};
use serde::{Deserialize, Serialize};

/// How the final commission rate and the cashout rate were reached.
///
/// On the `top1` guild override every additive component is zero, `ceiling`
/// is `None` and `overridden` is set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RateBreakdown {
    pub base_rate: Rate,
    pub vip_bonus: Rate,
    pub loyalty_bonus: Rate,
    pub weekly_booster: Rate,
    pub guild_boost: Rate,
    pub ceiling: Option<Rate>,
    pub cashout_rate: Rate,
    pub overridden: bool,
}

impl RateBreakdown {
    /// Sum of the additive bonuses, before the cap.
    pub fn total_bonus(&self) -> Rate {
        [
            self.vip_bonus,
            self.loyalty_bonus,
            self.weekly_booster,
            self.guild_boost,
        ]
        .into_iter()
        .sum()
    }
}

/// Outcome of one evaluation. All amounts are exact; see [`EarningsSummary`]
/// for the rounded form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EarningsResult {
    pub credits_from_sales: Credits,
    pub credits_from_cashout: Credits,
    pub final_commission_rate: Rate,
    pub is_capped: bool,
    pub total_credits: Credits,
    pub breakdown: RateBreakdown,
}

impl EarningsResult {
    /// The result reported when no configuration is available at all.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> EarningsSummary {
        EarningsSummary::from(self)
    }
}

/// Display-ready figures: the rate as a percentage with one decimal place and
/// credits with two.
///
/// The total is rounded from the exact total, not summed from the rounded parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsSummary {
    pub commission_rate_percent: String,
    pub capped: bool,
    pub credits_from_sales: String,
    pub credits_from_cashout: String,
    pub total_credits: String,
}

impl From<&EarningsResult> for EarningsSummary {
    fn from(result: &EarningsResult) -> Self {
        Self {
            commission_rate_percent: format!("{:.1}", result.final_commission_rate.as_percent()),
            capped: result.is_capped,
            credits_from_sales: format!("{:.2}", result.credits_from_sales.rounded()),
            credits_from_cashout: format!("{:.2}", result.credits_from_cashout.rounded()),
            total_credits: format!("{:.2}", result.total_credits.rounded()),
        }
    }
}
