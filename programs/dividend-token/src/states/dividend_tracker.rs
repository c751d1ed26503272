use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use super::dividend_ledger::{DividendLedger, RewardSink};
use super::holder_registry::HolderRegistry;
use super::{HolderAccount, HolderSet};

/// Outcome of one `process_batch` call
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Holders visited
    pub processed: u32,
    /// Holders paid
    pub paid: u32,
    /// Cursor after the call
    pub cursor: u32,
    /// The cursor passed the last registry index during this call
    pub wrapped: bool,
}

/// Dividend view of a single holder
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct HolderInfo {
    pub account: Pubkey,
    /// Registry position, -1 when not tracked
    pub index: i64,
    /// Visits before the cursor reaches this holder, -1 when not tracked
    pub iterations_until_processed: i64,
    pub withdrawable: u64,
    pub total_earned: u64,
    pub withdrawn: u64,
    pub last_claim_time: i64,
    /// Earliest time of the next payout, 0 if never claimed
    pub next_claim_time: i64,
    pub seconds_until_auto_claim: i64,
}

/// Registry, ledger and cursor bundled into one owned aggregate.
/// Holder records are passed in per call.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Debug, PartialEq, Eq)]
pub struct DividendTracker {
    pub registry: HolderRegistry,
    pub ledger: DividendLedger,
    /// Next registry index to visit
    pub cursor: u32,
    /// Seconds between payouts to the same holder
    pub claim_wait: i64,
    /// Smallest balance that is tracked for dividends
    pub minimum_balance: u64,
}

impl Default for DividendTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CLAIM_WAIT_SECONDS, DEFAULT_MINIMUM_TRACKED_BALANCE, DEFAULT_SCALE_DECIMALS)
    }
}

impl DividendTracker {
    pub fn new(claim_wait: i64, minimum_balance: u64, scale_decimals: u8) -> Self {
        Self {
            registry: HolderRegistry::default(),
            ledger: DividendLedger::new(scale_decimals),
            cursor: 0,
            claim_wait,
            minimum_balance,
        }
    }

    /// Like `new`, rejecting settings outside their bounds.
    pub fn with_settings(claim_wait: i64, minimum_balance: u64, scale_decimals: u8) -> Result<Self> {
        require!(
            (MIN_CLAIM_WAIT_SECONDS..=MAX_CLAIM_WAIT_SECONDS).contains(&claim_wait),
            ErrorCode::ClaimWaitOutOfBounds
        );
        require!(
            minimum_balance > 0 && minimum_balance <= MAX_MINIMUM_TRACKED_BALANCE,
            ErrorCode::MinimumBalanceOutOfBounds
        );
        require!(
            (MIN_SCALE_DECIMALS..=MAX_SCALE_DECIMALS).contains(&scale_decimals),
            ErrorCode::ScaleOutOfBounds
        );
        Ok(Self::new(claim_wait, minimum_balance, scale_decimals))
    }

    /// Re-evaluates `account` after its token balance or flags changed.
    ///
    /// The tracked balance is the full balance for eligible holders and
    /// zero otherwise; registry membership follows the same rule.
    pub fn set_balance(&mut self, holders: &mut HolderSet, account: &Pubkey) -> Result<()> {
        let minimum_balance = self.minimum_balance;
        let holder = holders.get_mut(account)?;
        if holder.excluded {
            return Ok(());
        }
        let balance = holder.balance;
        let exempt = holder.fee_exempt;
        let eligible = !exempt && balance > 0 && balance >= minimum_balance;
        let tracked = if eligible { balance } else { 0 };

        let old = holder.tracked_balance;
        self.ledger.on_balance_change(holder, old, tracked)?;
        self.registry.upsert(holders, account, tracked, minimum_balance, exempt)?;
        self.clamp_cursor();
        Ok(())
    }

    /// Permanently removes `account` from dividends. Rewards accrued so far
    /// stay withdrawable.
    pub fn exclude(&mut self, holders: &mut HolderSet, account: &Pubkey) -> Result<()> {
        let holder = holders.get_mut(account)?;
        require!(!holder.excluded, ErrorCode::AlreadyExcluded);
        let old = holder.tracked_balance;
        self.ledger.on_balance_change(holder, old, 0)?;
        holder.excluded = true;
        self.registry.remove(holders, account)?;
        self.clamp_cursor();
        msg!("Excluded {} from dividends", account);
        Ok(())
    }

    pub fn distribute(&mut self, amount: u64) -> Result<()> {
        self.ledger.inject(amount)
    }

    pub fn withdrawable_of(&self, holder: &HolderAccount) -> Result<u64> {
        self.ledger.withdrawable_of(holder)
    }

    pub fn claim(
        &mut self,
        holder: &mut HolderAccount,
        now: i64,
        sink: &mut dyn RewardSink,
    ) -> Result<u64> {
        self.ledger.withdraw(holder, now, self.claim_wait, sink)
    }

    /// Visits at most `unit_budget` holders starting at the cursor, paying
    /// each one whose cooldown elapsed. Never visits a holder twice per call.
    ///
    /// Stops early at the first registry slot whose record was not loaded;
    /// the cursor then points at that slot for the next call.
    pub fn process_batch(
        &mut self,
        holders: &mut HolderSet,
        unit_budget: u32,
        now: i64,
        sink: &mut dyn RewardSink,
    ) -> Result<BatchReport> {
        let len = self.registry.len();
        if len == 0 {
            self.cursor = 0;
            return Ok(BatchReport::default());
        }
        self.registry.verify(holders)?;
        self.clamp_cursor();

        let visits = unit_budget.min(len);
        let mut report = BatchReport::default();
        let mut cursor = self.cursor;

        for _ in 0..visits {
            let Some(account) = holders.owner_at(cursor)? else {
                msg!("Holder at index {} not supplied, stopping", cursor);
                break;
            };
            let holder = holders.get_mut(&account)?;
            if self.ledger.try_auto_payout(holder, now, self.claim_wait, sink)? {
                report.paid += 1;
            }
            report.processed += 1;

            cursor += 1;
            if cursor >= len {
                cursor = 0;
                report.wrapped = true;
            }
        }

        self.cursor = cursor;
        report.cursor = cursor;
        msg!(
            "Processed {} holders, paid {}, cursor {} (wrapped: {})",
            report.processed,
            report.paid,
            report.cursor,
            report.wrapped
        );
        Ok(report)
    }

    pub fn reset_cursor(&mut self) -> u32 {
        std::mem::replace(&mut self.cursor, 0)
    }

    pub fn holder_info(&self, holder: &HolderAccount, now: i64) -> Result<HolderInfo> {
        let (index, iterations_until_processed) = match holder.registry_index {
            Some(index) => {
                let len = self.registry.len() as i64;
                require!((index as i64) < len, ErrorCode::RegistryCorrupted);
                let index = index as i64;
                let distance = (index - self.cursor as i64).rem_euclid(len);
                (index, distance)
            }
            None => (-1, -1),
        };

        let last_claim_time = holder.last_claim_time;
        let next_claim_time = if last_claim_time > 0 {
            last_claim_time
                .checked_add(self.claim_wait)
                .ok_or(ErrorCode::MathOverflow)?
        } else {
            0
        };
        let seconds_until_auto_claim = if next_claim_time > now {
            next_claim_time - now
        } else {
            0
        };

        Ok(HolderInfo {
            account: holder.owner,
            index,
            iterations_until_processed,
            withdrawable: self.ledger.withdrawable_of(holder)?,
            total_earned: self.ledger.accumulative_of(holder)?,
            withdrawn: holder.withdrawn,
            last_claim_time,
            next_claim_time,
            seconds_until_auto_claim,
        })
    }

    pub fn holder_info_at(&self, holders: &HolderSet, index: u32, now: i64) -> Result<Option<HolderInfo>> {
        match self.registry.at(holders, index)? {
            Some(account) => self.holder_info(holders.get(&account)?, now).map(Some),
            None => Ok(None),
        }
    }

    pub fn update_claim_wait(&mut self, claim_wait: i64) -> Result<i64> {
        require!(
            (MIN_CLAIM_WAIT_SECONDS..=MAX_CLAIM_WAIT_SECONDS).contains(&claim_wait),
            ErrorCode::ClaimWaitOutOfBounds
        );
        require!(claim_wait != self.claim_wait, ErrorCode::ValueUnchanged);
        Ok(std::mem::replace(&mut self.claim_wait, claim_wait))
    }

    /// Takes effect for each holder at its next balance change.
    pub fn update_minimum_balance(&mut self, minimum_balance: u64) -> Result<u64> {
        require!(
            minimum_balance > 0 && minimum_balance <= MAX_MINIMUM_TRACKED_BALANCE,
            ErrorCode::MinimumBalanceOutOfBounds
        );
        require!(minimum_balance != self.minimum_balance, ErrorCode::ValueUnchanged);
        Ok(std::mem::replace(&mut self.minimum_balance, minimum_balance))
    }

    pub fn update_scale_decimals(&mut self, scale_decimals: u8) -> Result<u8> {
        require!(
            (MIN_SCALE_DECIMALS..=MAX_SCALE_DECIMALS).contains(&scale_decimals),
            ErrorCode::ScaleOutOfBounds
        );
        require!(self.ledger.is_pristine(), ErrorCode::ScaleLocked);
        require!(scale_decimals != self.ledger.scale_decimals, ErrorCode::ValueUnchanged);
        Ok(std::mem::replace(&mut self.ledger.scale_decimals, scale_decimals))
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.registry.len() {
            self.cursor = 0;
        }
    }
}
