use super::money::Credits;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Weekly guild ranking of the affiliate's guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuildRank {
    #[default]
    None,
    Top1,
    Top2,
    Top3,
}

impl GuildRank {
    /// True for any of the three rewarded ranks.
    pub fn is_ranked(&self) -> bool {
        !matches!(self, GuildRank::None)
    }
}

/// Which weekly leaderboard booster the affiliate holds, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeeklyBooster {
    #[default]
    None,
    Top1,
    Top2,
    Top3,
}

/// An affiliate's standing at the moment of evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserContext {
    pub level: u32,
    /// Sales volume the commission rate applies to.
    pub affiliate_sales: Credits,
    /// Cashout volume of referred users.
    pub referral_cashout: Credits,
    pub is_vip: bool,
    pub vip_consecutive_months: u32,
    pub has_loyalty_bonus: bool,
    pub weekly_booster: WeeklyBooster,
    pub guild_rank: GuildRank,
}

impl UserContext {
    /// The earnings simulator's starting state.
    pub fn simulator_defaults() -> Self {
        Self {
            level: 10,
            affiliate_sales: Credits::new(dec!(200)),
            referral_cashout: Credits::new(dec!(50)),
            is_vip: false,
            vip_consecutive_months: 1,
            has_loyalty_bonus: false,
            weekly_booster: WeeklyBooster::None,
            guild_rank: GuildRank::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_serialization() {
        assert_eq!(serde_json::to_string(&GuildRank::Top2).unwrap(), "\"top2\"");
        let rank: GuildRank = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(rank, GuildRank::None);
        assert!(serde_json::from_str::<GuildRank>("\"top4\"").is_err());
    }

    #[test]
    fn test_is_ranked() {
        assert!(!GuildRank::None.is_ranked());
        assert!(GuildRank::Top1.is_ranked());
        assert!(GuildRank::Top3.is_ranked());
    }

    #[test]
    fn test_simulator_defaults() {
        let context = UserContext::simulator_defaults();
        assert_eq!(context.level, 10);
        assert_eq!(context.affiliate_sales, Credits::new(dec!(200)));
        assert_eq!(context.referral_cashout, Credits::new(dec!(50)));
        assert_eq!(context.vip_consecutive_months, 1);
        assert_eq!(context.guild_rank, GuildRank::None);
        assert_eq!(context.weekly_booster, WeeklyBooster::None);
    }
}
