use crate::domain::config::{
    CommissionConfig, DEFAULT_GUILD_CASHOUT_RATE, DEFAULT_GUILD_CEILING,
    DEFAULT_TOP1_COMMISSION_RATE,
};
use crate::domain::context::{GuildRank, UserContext};
use crate::domain::earnings::{EarningsResult, RateBreakdown};
use crate::domain::money::Rate;
use crate::domain::tier::highest_qualifying;
use tracing::debug;

/// Turns an affiliate's standing into credited earnings.
///
/// The engine borrows a configuration and holds no other state, so one
/// configuration can back any number of engines across threads. Evaluation
/// never fails: absent configuration contributes zero, or the documented
/// default for guild rewards, and amounts saturate at the `Decimal` bounds.
#[derive(Debug, Clone, Copy)]
pub struct CommissionEngine<'a> {
    config: &'a CommissionConfig,
}

impl<'a> CommissionEngine<'a> {
    pub fn new(config: &'a CommissionConfig) -> Self {
        Self { config }
    }

    /// Computes the earnings for `context`.
    ///
    /// A `top1` guild rank replaces the whole rate calculation with the
    /// configured override. Any other context sums the base tier and the
    /// bonuses, then caps the sum at the rank's ceiling. The cashout rate is
    /// chosen separately.
    pub fn evaluate(&self, context: &UserContext) -> EarningsResult {
        let mut breakdown = RateBreakdown::default();
        let (rate, is_capped) = self.commission_rate(context, &mut breakdown);
        breakdown.cashout_rate = self.cashout_rate(context);

        let credits_from_sales = context.affiliate_sales * rate;
        let credits_from_cashout = context.referral_cashout * breakdown.cashout_rate;

        debug!(
            level = context.level,
            guild = ?context.guild_rank,
            rate = %rate.value(),
            capped = is_capped,
            "Evaluated commission"
        );

        EarningsResult {
            credits_from_sales,
            credits_from_cashout,
            final_commission_rate: rate,
            is_capped,
            total_credits: credits_from_sales + credits_from_cashout,
            breakdown,
        }
    }

    fn commission_rate(&self, context: &UserContext, breakdown: &mut RateBreakdown) -> (Rate, bool) {
        let config = self.config;

        if context.guild_rank == GuildRank::Top1 {
            breakdown.overridden = true;
            let rate = config
                .guild_reward(GuildRank::Top1)
                .and_then(|reward| reward.commission_rate)
                .unwrap_or(DEFAULT_TOP1_COMMISSION_RATE);
            return (rate, false);
        }

        breakdown.base_rate = highest_qualifying(
            config.commission_tiers.as_deref().unwrap_or_default(),
            context.level,
        )
        .map(|tier| tier.rate)
        .unwrap_or_default();

        if context.is_vip {
            breakdown.vip_bonus = highest_qualifying(
                config.vip_bonus_tiers.as_deref().unwrap_or_default(),
                context.vip_consecutive_months,
            )
            .map(|tier| tier.bonus)
            .unwrap_or_default();
        }

        if context.has_loyalty_bonus {
            breakdown.loyalty_bonus = config.loyalty_bonus_rate.unwrap_or_default();
        }

        breakdown.weekly_booster = config
            .weekly_booster(context.weekly_booster)
            .unwrap_or_default();

        let ceiling = match context.guild_rank {
            GuildRank::Top2 | GuildRank::Top3 => {
                let reward = config.guild_reward(context.guild_rank);
                breakdown.guild_boost = reward
                    .and_then(|reward| reward.commission_boost)
                    .unwrap_or_default();
                reward
                    .and_then(|reward| reward.max_commission_rate)
                    .unwrap_or(DEFAULT_GUILD_CEILING)
            }
            GuildRank::None | GuildRank::Top1 => Rate::FULL,
        };
        breakdown.ceiling = Some(ceiling);

        let rate = breakdown.base_rate + breakdown.total_bonus();
        if rate > ceiling {
            (ceiling, true)
        } else {
            (rate, false)
        }
    }

    fn cashout_rate(&self, context: &UserContext) -> Rate {
        let config = self.config;

        // Every ranked guild is paid the top1 cashout rate.
        if context.guild_rank.is_ranked() {
            return config
                .guild_reward(GuildRank::Top1)
                .and_then(|reward| reward.cashout_commission_rate)
                .unwrap_or(DEFAULT_GUILD_CASHOUT_RATE);
        }

        let cashout = config.cashout_commission.unwrap_or_default();
        if context.is_vip {
            cashout.vip_rate.unwrap_or_default()
        } else {
            cashout.base_rate.unwrap_or_default()
        }
    }

    /// Like [`evaluate`](Self::evaluate), but yields the all-zero result when
    /// no configuration has been loaded yet.
    pub fn evaluate_or_zero(config: Option<&CommissionConfig>, context: &UserContext) -> EarningsResult {
        match config {
            Some(config) => CommissionEngine::new(config).evaluate(context),
            None => EarningsResult::zero(),
        }
    }
}

/// Evaluates `context` against `config`.
pub fn evaluate(config: &CommissionConfig, context: &UserContext) -> EarningsResult {
    CommissionEngine::new(config).evaluate(context)
}
