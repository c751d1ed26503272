use anchor_lang::prelude::*;
use ruint::aliases::U256;
use crate::errors::ErrorCode;
use crate::math::{self, WideUint};
use super::HolderAccount;

/// Destination for reward payouts.
///
/// The ledger books a payout before calling the sink, and rolls the
/// booking back if the sink reports an error.
pub trait RewardSink {
    fn transfer_reward(&mut self, holder: &Pubkey, amount: u64) -> Result<()>;
}

/// Magnified dividend-per-share accounting.
///
/// `accumulative(holder) = (per_share * balance + correction) / 10^scale_decimals`.
/// Every balance change subtracts `per_share * delta` from the correction,
/// so a holder only earns from injections made while the balance was held.
/// Per-holder terms live in each `HolderAccount`; only totals live here.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Debug, PartialEq, Eq)]
pub struct DividendLedger {
    /// Accumulator magnitude as a power of ten
    pub scale_decimals: u8,
    magnified_dividend_per_share: WideUint,
    /// Sum of all tracked balances
    pub total_supply: u64,
    /// Sum of all injected rewards
    pub total_injected: u64,
    /// Sum of all rewards paid to holders
    pub total_distributed: u64,
    /// Reward asset held on behalf of holders
    pub reward_reserve: u64,
}

impl DividendLedger {
    pub fn new(scale_decimals: u8) -> Self {
        Self {
            scale_decimals,
            magnified_dividend_per_share: WideUint::default(),
            total_supply: 0,
            total_injected: 0,
            total_distributed: 0,
            reward_reserve: 0,
        }
    }

    pub fn magnified_dividend_per_share(&self) -> U256 {
        self.magnified_dividend_per_share.get()
    }

    /// True while nothing has been injected; the scale may only change then.
    pub fn is_pristine(&self) -> bool {
        self.magnified_dividend_per_share.is_zero() && self.total_injected == 0
    }

    /// Distributes `amount` over the current tracked supply.
    pub fn inject(&mut self, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        require!(self.total_supply > 0, ErrorCode::NoTrackedSupply);

        let share = math::magnified_share(amount, self.total_supply, self.scale_decimals)?;
        let per_share = self
            .magnified_dividend_per_share
            .get()
            .checked_add(share)
            .ok_or(ErrorCode::MathOverflow)?;
        self.magnified_dividend_per_share.set(per_share);

        self.total_injected = self.total_injected
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        self.reward_reserve = self.reward_reserve
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        msg!("Injected {} reward units over tracked supply {}", amount, self.total_supply);
        Ok(())
    }

    /// Records a tracked balance change for `holder`.
    pub fn on_balance_change(
        &mut self,
        holder: &mut HolderAccount,
        old_balance: u64,
        new_balance: u64,
    ) -> Result<()> {
        require!(
            holder.tracked_balance == old_balance,
            ErrorCode::BalanceMismatch
        );
        if old_balance == new_balance {
            return Ok(());
        }

        let per_share = self.magnified_dividend_per_share.get();
        let correction = holder.magnified_correction.get();

        if new_balance > old_balance {
            let delta = new_balance - old_balance;
            let offset = math::magnify(per_share, delta)?;
            self.total_supply = self.total_supply
                .checked_add(delta)
                .ok_or(ErrorCode::MathOverflow)?;
            holder.magnified_correction.set(correction.wrapping_sub(offset));
        } else {
            let delta = old_balance - new_balance;
            let offset = math::magnify(per_share, delta)?;
            self.total_supply = self.total_supply
                .checked_sub(delta)
                .ok_or(ErrorCode::BalanceMismatch)?;
            holder.magnified_correction.set(correction.wrapping_add(offset));
        }
        holder.tracked_balance = new_balance;
        Ok(())
    }

    /// Everything `holder` has earned, withdrawn or not.
    pub fn accumulative_of(&self, holder: &HolderAccount) -> Result<u64> {
        let gross = math::magnify(self.magnified_dividend_per_share.get(), holder.tracked_balance)?;
        let net = gross.wrapping_add(holder.magnified_correction.get());
        math::demagnify(net, self.scale_decimals)
    }

    pub fn withdrawable_of(&self, holder: &HolderAccount) -> Result<u64> {
        let accumulative = self.accumulative_of(holder)?;
        Ok(accumulative.saturating_sub(holder.withdrawn))
    }

    pub fn can_claim(&self, holder: &HolderAccount, now: i64, claim_wait: i64) -> bool {
        let last = holder.last_claim_time;
        if last > now {
            return false;
        }
        now - last >= claim_wait
    }

    /// User-initiated claim.
    pub fn withdraw(
        &mut self,
        holder: &mut HolderAccount,
        now: i64,
        claim_wait: i64,
        sink: &mut dyn RewardSink,
    ) -> Result<u64> {
        require!(
            self.can_claim(holder, now, claim_wait),
            ErrorCode::ClaimCooldownActive
        );
        let amount = self.withdrawable_of(holder)?;
        require!(amount > 0, ErrorCode::NothingToWithdraw);

        if !self.settle(holder, amount, now, sink)? {
            return err!(ErrorCode::RewardTransferFailed);
        }
        Ok(amount)
    }

    /// Batch payout: returns `Ok(false)` when the holder is not due or the
    /// transfer failed. Invariant violations still propagate.
    pub fn try_auto_payout(
        &mut self,
        holder: &mut HolderAccount,
        now: i64,
        claim_wait: i64,
        sink: &mut dyn RewardSink,
    ) -> Result<bool> {
        if !self.can_claim(holder, now, claim_wait) {
            return Ok(false);
        }
        let amount = self.withdrawable_of(holder)?;
        if amount == 0 {
            return Ok(false);
        }
        self.settle(holder, amount, now, sink)
    }

    fn settle(
        &mut self,
        holder: &mut HolderAccount,
        amount: u64,
        now: i64,
        sink: &mut dyn RewardSink,
    ) -> Result<bool> {
        require!(
            self.reward_reserve >= amount,
            ErrorCode::InsufficientRewardReserve
        );
        let previous_claim_time = holder.last_claim_time;
        holder.withdrawn = holder.withdrawn
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        holder.last_claim_time = now;
        self.reward_reserve -= amount;

        if let Err(error) = sink.transfer_reward(&holder.owner, amount) {
            msg!("Reward transfer of {} to {} failed: {}", amount, holder.owner, error);
            holder.withdrawn -= amount;
            holder.last_claim_time = previous_claim_time;
            self.reward_reserve += amount;
            // an underfunded vault is a broken reserve, not a bad recipient
            if error == error!(ErrorCode::InsufficientRewardReserve) {
                return Err(error);
            }
            return Ok(false);
        }

        self.total_distributed = self.total_distributed
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        msg!("Paid {} reward units to {}", amount, holder.owner);
        Ok(true)
    }
}
