use anchor_lang::prelude::*;
use crate::constants::{LIQUIDITY_FEE_PERCENT, REWARDS_FEE_PERCENT};

/// Transfer tax, in whole percent of the transferred amount
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Share funding holder rewards
    pub rewards_fee_percent: u8,
    /// Share funding liquidity
    pub liquidity_fee_percent: u8,
}

/// Fee taken from one transfer
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub total_fee: u64,
    pub amount_after_fee: u64,
}

/// Collected fees divided between liquidity and rewards at liquidation
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Liquidation {
    pub tokens_for_liquidity: u64,
    pub tokens_for_rewards: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            rewards_fee_percent: REWARDS_FEE_PERCENT,
            liquidity_fee_percent: LIQUIDITY_FEE_PERCENT,
        }
    }
}

impl FeeSchedule {
    pub fn total_fee_percent(&self) -> u16 {
        self.rewards_fee_percent as u16 + self.liquidity_fee_percent as u16
    }

    pub fn split(&self, amount: u64) -> FeeSplit {
        let total_fee = (amount as u128 * self.total_fee_percent() as u128 / 100) as u64;
        FeeSplit {
            total_fee,
            amount_after_fee: amount - total_fee,
        }
    }

    /// Divides collected fee tokens in proportion to the two fee shares.
    pub fn liquidation_split(&self, collected: u64) -> Liquidation {
        let total = self.total_fee_percent();
        if total == 0 {
            return Liquidation { tokens_for_liquidity: 0, tokens_for_rewards: collected };
        }
        let tokens_for_liquidity =
            (collected as u128 * self.liquidity_fee_percent as u128 / total as u128) as u64;
        Liquidation {
            tokens_for_liquidity,
            tokens_for_rewards: collected - tokens_for_liquidity,
        }
    }
}
