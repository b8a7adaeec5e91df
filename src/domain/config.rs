use super::context::{GuildRank, WeeklyBooster};
use super::money::Rate;
use super::tier::Tiered;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

/// Rate granted by the `top1` guild override when the document leaves it out.
pub const DEFAULT_TOP1_COMMISSION_RATE: Rate = Rate(dec!(0.90));
/// Ceiling applied to `top2`/`top3` when the document leaves it out.
pub const DEFAULT_GUILD_CEILING: Rate = Rate(dec!(0.90));
/// Cashout rate for guild members when the document leaves it out.
pub const DEFAULT_GUILD_CASHOUT_RATE: Rate = Rate(dec!(0.10));

/// Base commission rate unlocked at `min_level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionTier {
    pub min_level: u32,
    pub rate: Rate,
}

impl Tiered for CommissionTier {
    fn threshold(&self) -> u32 {
        self.min_level
    }
}

/// VIP bonus unlocked after `min_consecutive_months` of membership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VipBonusTier {
    pub min_consecutive_months: u32,
    pub bonus: Rate,
}

impl Tiered for VipBonusTier {
    fn threshold(&self) -> u32 {
        self.min_consecutive_months
    }
}

/// Boost values offered to the weekly affiliate leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyBoosterValues {
    pub top1: Option<Rate>,
    pub top2: Option<Rate>,
    pub top3: Option<Rate>,
}

impl WeeklyBoosterValues {
    pub fn value_for(&self, booster: WeeklyBooster) -> Option<Rate> {
        match booster {
            WeeklyBooster::None => None,
            WeeklyBooster::Top1 => self.top1,
            WeeklyBooster::Top2 => self.top2,
            WeeklyBooster::Top3 => self.top3,
        }
    }
}

/// Weekly reward attached to one guild rank.
///
/// `top1` uses `commission_rate` as an absolute override and carries the
/// `cashout_commission_rate` shared by every ranked guild. `top2`/`top3` use
/// `commission_boost` and `max_commission_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GuildReward {
    pub commission_rate: Option<Rate>,
    pub commission_boost: Option<Rate>,
    pub max_commission_rate: Option<Rate>,
    pub cashout_commission_rate: Option<Rate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GuildRewards {
    pub top1: Option<GuildReward>,
    pub top2: Option<GuildReward>,
    pub top3: Option<GuildReward>,
}

impl GuildRewards {
    pub fn for_rank(&self, rank: GuildRank) -> Option<&GuildReward> {
        match rank {
            GuildRank::None => None,
            GuildRank::Top1 => self.top1.as_ref(),
            GuildRank::Top2 => self.top2.as_ref(),
            GuildRank::Top3 => self.top3.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CashoutCommission {
    pub base_rate: Option<Rate>,
    pub vip_rate: Option<Rate>,
}

/// Everything the commission engine reads.
///
/// Every section is optional. An absent section contributes zero to the
/// calculation (or its documented default for guild rewards); it is never an
/// error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommissionConfig {
    pub commission_tiers: Option<Vec<CommissionTier>>,
    pub vip_bonus_tiers: Option<Vec<VipBonusTier>>,
    pub loyalty_bonus_rate: Option<Rate>,
    pub weekly_booster_values: Option<WeeklyBoosterValues>,
    pub guild_rewards: Option<GuildRewards>,
    pub cashout_commission: Option<CashoutCommission>,
}

/// A shape anomaly found in a configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    #[error("section `{0}` is missing and contributes zero")]
    MissingSection(&'static str),
    #[error("invalid value {value} at `{path}`: {reason}")]
    InvalidValue {
        path: String,
        value: Decimal,
        reason: &'static str,
    },
    #[error("duplicate threshold {threshold} in `{section}`")]
    DuplicateThreshold { section: &'static str, threshold: u32 },
}

impl ConfigIssue {
    /// Missing sections are informational; everything else fails a strict load.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConfigIssue::MissingSection(_))
    }
}

impl CommissionConfig {
    pub fn guild_reward(&self, rank: GuildRank) -> Option<&GuildReward> {
        self.guild_rewards.as_ref().and_then(|g| g.for_rank(rank))
    }

    pub fn weekly_booster(&self, booster: WeeklyBooster) -> Option<Rate> {
        self.weekly_booster_values
            .as_ref()
            .and_then(|values| values.value_for(booster))
    }

    /// Lists every anomaly in the configuration without changing it.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let sections: [(&'static str, bool); 6] = [
            ("commission_tiers", self.commission_tiers.is_none()),
            ("vip_bonus_tiers", self.vip_bonus_tiers.is_none()),
            ("loyalty_bonus_rate", self.loyalty_bonus_rate.is_none()),
            ("weekly_booster_values", self.weekly_booster_values.is_none()),
            ("guild_rewards", self.guild_rewards.is_none()),
            ("cashout_commission", self.cashout_commission.is_none()),
        ];
        issues.extend(
            sections
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| ConfigIssue::MissingSection(name)),
        );

        for (path, rate) in self.rate_fields() {
            if rate.is_negative() {
                issues.push(ConfigIssue::InvalidValue {
                    path,
                    value: rate.value(),
                    reason: "rates must not be negative",
                });
            }
        }

        if let Some(tiers) = &self.commission_tiers {
            let mut seen = HashSet::new();
            for (i, tier) in tiers.iter().enumerate() {
                if tier.rate > Rate::FULL {
                    issues.push(ConfigIssue::InvalidValue {
                        path: format!("commission_tiers[{i}].rate"),
                        value: tier.rate.value(),
                        reason: "tier rates must not exceed 1.0",
                    });
                }
                if !seen.insert(tier.min_level) {
                    issues.push(ConfigIssue::DuplicateThreshold {
                        section: "commission_tiers",
                        threshold: tier.min_level,
                    });
                }
            }
        }

        if let Some(tiers) = &self.vip_bonus_tiers {
            for (i, tier) in tiers.iter().enumerate() {
                if tier.min_consecutive_months == 0 {
                    issues.push(ConfigIssue::InvalidValue {
                        path: format!("vip_bonus_tiers[{i}].min_consecutive_months"),
                        value: Decimal::ZERO,
                        reason: "VIP tiers start at one month",
                    });
                }
            }
        }

        issues
    }

    /// Clamps negative rates to zero and commission tier rates to 1.0.
    pub fn sanitize(mut self) -> Self {
        for (path, rate) in self.rate_fields_mut() {
            if rate.is_negative() {
                warn!(%path, value = %rate.value(), "Clamping negative rate to zero");
                *rate = Rate::ZERO;
            }
        }
        if let Some(tiers) = &mut self.commission_tiers {
            for (i, tier) in tiers.iter_mut().enumerate() {
                if tier.rate > Rate::FULL {
                    warn!(tier = i, value = %tier.rate.value(), "Clamping commission tier rate to 1.0");
                    tier.rate = Rate::FULL;
                }
            }
        }
        self
    }

    /// Every configured rate with its path, in the same order as `rate_fields_mut`.
    fn rate_fields(&self) -> impl Iterator<Item = (String, Rate)> + '_ {
        let commission = self
            .commission_tiers
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, tier)| (format!("commission_tiers[{i}].rate"), tier.rate));
        let vip = self
            .vip_bonus_tiers
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, tier)| (format!("vip_bonus_tiers[{i}].bonus"), tier.bonus));
        let loyalty = self
            .loyalty_bonus_rate
            .map(|rate| ("loyalty_bonus_rate".to_string(), rate));
        let boosters = self.weekly_booster_values.iter().flat_map(|values| {
            named("weekly_booster_values", [
                ("top1", values.top1),
                ("top2", values.top2),
                ("top3", values.top3),
            ])
        });
        let guild = self.guild_rewards.iter().flat_map(|rewards| {
            [("top1", rewards.top1), ("top2", rewards.top2), ("top3", rewards.top3)]
                .into_iter()
                .filter_map(|(rank, reward)| reward.map(|reward| (rank, reward)))
                .flat_map(|(rank, reward)| {
                    named(&format!("guild_rewards.{rank}"), [
                        ("commission_rate", reward.commission_rate),
                        ("commission_boost", reward.commission_boost),
                        ("max_commission_rate", reward.max_commission_rate),
                        ("cashout_commission_rate", reward.cashout_commission_rate),
                    ])
                })
        });
        let cashout = self.cashout_commission.iter().flat_map(|cashout| {
            named("cashout_commission", [
                ("base_rate", cashout.base_rate),
                ("vip_rate", cashout.vip_rate),
            ])
        });

        commission
            .chain(vip)
            .chain(loyalty)
            .chain(boosters)
            .chain(guild)
            .chain(cashout)
    }

    fn rate_fields_mut(&mut self) -> Vec<(String, &mut Rate)> {
        let Self {
            commission_tiers,
            vip_bonus_tiers,
            loyalty_bonus_rate,
            weekly_booster_values,
            guild_rewards,
            cashout_commission,
        } = self;

        let mut fields: Vec<(String, &mut Rate)> = Vec::new();

        for (i, tier) in commission_tiers.iter_mut().flatten().enumerate() {
            fields.push((format!("commission_tiers[{i}].rate"), &mut tier.rate));
        }
        for (i, tier) in vip_bonus_tiers.iter_mut().flatten().enumerate() {
            fields.push((format!("vip_bonus_tiers[{i}].bonus"), &mut tier.bonus));
        }
        if let Some(rate) = loyalty_bonus_rate {
            fields.push(("loyalty_bonus_rate".to_string(), rate));
        }
        if let Some(WeeklyBoosterValues { top1, top2, top3 }) = weekly_booster_values {
            for (name, value) in [("top1", top1), ("top2", top2), ("top3", top3)] {
                if let Some(rate) = value {
                    fields.push((format!("weekly_booster_values.{name}"), rate));
                }
            }
        }
        if let Some(GuildRewards { top1, top2, top3 }) = guild_rewards {
            for (rank, reward) in [("top1", top1), ("top2", top2), ("top3", top3)] {
                let Some(GuildReward {
                    commission_rate,
                    commission_boost,
                    max_commission_rate,
                    cashout_commission_rate,
                }) = reward
                else {
                    continue;
                };
                for (name, value) in [
                    ("commission_rate", commission_rate),
                    ("commission_boost", commission_boost),
                    ("max_commission_rate", max_commission_rate),
                    ("cashout_commission_rate", cashout_commission_rate),
                ] {
                    if let Some(rate) = value {
                        fields.push((format!("guild_rewards.{rank}.{name}"), rate));
                    }
                }
            }
        }
        if let Some(CashoutCommission {
            base_rate,
            vip_rate,
        }) = cashout_commission
        {
            for (name, value) in [("base_rate", base_rate), ("vip_rate", vip_rate)] {
                if let Some(rate) = value {
                    fields.push((format!("cashout_commission.{name}"), rate));
                }
            }
        }

        fields
    }
}

/// Prefixes the present values of a section with its path.
fn named<const N: usize>(
    section: &str,
    values: [(&'static str, Option<Rate>); N],
) -> impl Iterator<Item = (String, Rate)> + use<N> {
    let section = section.to_string();
    values
        .into_iter()
        .filter_map(move |(name, value)| value.map(|rate| (format!("{section}.{name}"), rate)))
}
