use anchor_lang::prelude::*;
use crate::math::WideUint;
use super::DividendLedger;

/// Per-holder PDA (`[HOLDER_SEED, owner]`).
///
/// Token balance, dividend bookkeeping and the holder's slot in the
/// payout registry live here, so the global state never grows with the
/// number of holders.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct HolderAccount {
    /// Wallet this record belongs to
    pub owner: Pubkey,
    /// Token balance in minor units
    pub balance: u64,
    /// Balance counted for dividends (zero while not eligible)
    pub tracked_balance: u64,
    /// Signed (two's-complement) offset cancelling accumulator growth
    /// that happened before the current tracked balance was held
    pub magnified_correction: WideUint,
    /// Rewards already paid out
    pub withdrawn: u64,
    /// Unix timestamp of the last payout
    pub last_claim_time: i64,
    /// Position in the payout registry
    pub registry_index: Option<u32>,
    pub fee_exempt: bool,
    /// Permanently removed from dividends
    pub excluded: bool,
    pub pre_trading_allowed: bool,
    pub amm_pair: bool,
    pub bump: u8,
}

impl HolderAccount {
    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            balance: 0,
            tracked_balance: 0,
            magnified_correction: WideUint::default(),
            withdrawn: 0,
            last_claim_time: 0,
            registry_index: None,
            fee_exempt: false,
            excluded: false,
            pre_trading_allowed: false,
            amm_pair: false,
            bump,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registry_index.is_some()
    }

    /// A record can be closed once it holds no tokens, owes no rewards,
    /// sits outside the registry and carries no admin flags.
    pub fn is_closable(&self, ledger: &DividendLedger) -> Result<bool> {
        if self.balance != 0
            || self.tracked_balance != 0
            || self.is_registered()
            || self.fee_exempt
            || self.excluded
            || self.pre_trading_allowed
            || self.amm_pair
        {
            return Ok(false);
        }
        Ok(ledger.withdrawable_of(self)? == 0)
    }
}
