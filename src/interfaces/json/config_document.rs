use crate::domain::config::{
    CashoutCommission, CommissionConfig, CommissionTier, GuildReward, GuildRewards, VipBonusTier,
    WeeklyBoosterValues,
};
use crate::domain::money::Rate;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The gamification document as published to the dashboard.
///
/// Only the sections the commission engine reads are modelled; other top-level
/// keys are ignored. Every field is optional so partial documents still load.
/// The sections may sit at the top level or under `GAMIFICATION_CONFIG`, the
/// key the full application configuration nests them in.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ConfigDocument {
    pub affiliate_system: Option<AffiliateSystem>,
    pub vip_system: Option<VipSystem>,
    pub guild_system: Option<GuildSystem>,
    pub gamification_config: Option<Box<ConfigDocument>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AffiliateSystem {
    pub commission_tiers: Option<Vec<LevelTier>>,
    pub permanent_loyalty_bonus: Option<LoyaltyBonus>,
    pub weekly_boosters: Option<WeeklyBoosters>,
    pub cashout_commission: Option<CashoutRates>,
}

#[derive(Debug, Deserialize)]
pub struct LevelTier {
    pub level: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub rate: Decimal,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LoyaltyBonus {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub rate: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WeeklyBoosters {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub top_1_boost: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub top_2_boost: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub top_3_boost: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CashoutRates {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub base_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub vip_rate: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct VipSystem {
    pub premium: Option<VipPlan>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct VipPlan {
    pub commission_bonus_tiers: Option<Vec<MonthsTier>>,
}

#[derive(Debug, Deserialize)]
pub struct MonthsTier {
    pub consecutive_months: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub bonus: Decimal,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GuildSystem {
    pub weekly_rewards: Option<WeeklyRewards>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WeeklyRewards {
    pub top_1: Option<RankReward>,
    pub top_2: Option<RankReward>,
    pub top_3: Option<RankReward>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RankReward {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub commission_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub commission_boost: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub max_commission_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub cashout_commission_rate: Option<Decimal>,
}

impl ConfigDocument {
    /// Parses a document, unwrapping `GAMIFICATION_CONFIG` when present.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut document: Self = serde_json::from_str(json)?;
        Ok(match document.gamification_config.take() {
            Some(nested) => *nested,
            None => document,
        })
    }
}

fn rate(value: Option<Decimal>) -> Option<Rate> {
    value.map(Rate::new)
}

impl From<RankReward> for GuildReward {
    fn from(reward: RankReward) -> Self {
        Self {
            commission_rate: rate(reward.commission_rate),
            commission_boost: rate(reward.commission_boost),
            max_commission_rate: rate(reward.max_commission_rate),
            cashout_commission_rate: rate(reward.cashout_commission_rate),
        }
    }
}

impl From<ConfigDocument> for CommissionConfig {
    fn from(document: ConfigDocument) -> Self {
        let affiliate = document.affiliate_system.unwrap_or_default();

        let commission_tiers = affiliate.commission_tiers.map(|tiers| {
            tiers
                .into_iter()
                .map(|tier| CommissionTier {
                    min_level: tier.level,
                    rate: Rate::new(tier.rate),
                })
                .collect()
        });

        let vip_bonus_tiers = document
            .vip_system
            .and_then(|vip| vip.premium)
            .and_then(|plan| plan.commission_bonus_tiers)
            .map(|tiers| {
                tiers
                    .into_iter()
                    .map(|tier| VipBonusTier {
                        min_consecutive_months: tier.consecutive_months,
                        bonus: Rate::new(tier.bonus),
                    })
                    .collect()
            });

        let guild_rewards = document
            .guild_system
            .and_then(|guild| guild.weekly_rewards)
            .map(|rewards| GuildRewards {
                top1: rewards.top_1.map(GuildReward::from),
                top2: rewards.top_2.map(GuildReward::from),
                top3: rewards.top_3.map(GuildReward::from),
            });

        Self {
            commission_tiers,
            vip_bonus_tiers,
            loyalty_bonus_rate: affiliate
                .permanent_loyalty_bonus
                .and_then(|bonus| rate(bonus.rate)),
            weekly_booster_values: affiliate.weekly_boosters.map(|boosters| WeeklyBoosterValues {
                top1: rate(boosters.top_1_boost),
                top2: rate(boosters.top_2_boost),
                top3: rate(boosters.top_3_boost),
            }),
            guild_rewards,
            cashout_commission: affiliate.cashout_commission.map(|cashout| CashoutCommission {
                base_rate: rate(cashout.base_rate),
                vip_rate: rate(cashout.vip_rate),
            }),
        }
    }
}
