use std::ops::{Deref, DerefMut};

use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use super::dividend_tracker::DividendTracker;
use super::fee_schedule::{FeeSchedule, FeeSplit, Liquidation};
use super::{HolderAccount, HolderSet};

/// Result of a taxed transfer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Amount credited to the recipient
    pub amount_received: u64,
    /// Fee moved to the fee collector
    pub fee: u64,
    /// Collected fees released before this transfer, if any
    pub liquidation: Option<Liquidation>,
}

/// Fee policy and the fee collector's balance of the taxed token.
///
/// Holder balances and flags live in `HolderAccount`s. Every balance
/// mutation is reported to the dividend tracker before the transfer
/// returns, so reward accounting never observes a stale balance.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Debug, PartialEq, Eq)]
pub struct TokenLedger {
    pub total_supply: u64,
    /// Fee tokens held by the fee collector until they are liquidated
    pub collected_fees: u64,
    pub fees: FeeSchedule,
    /// Holds collected fees until they are liquidated
    pub fee_collector: Pubkey,
    /// Receives liquidated fees and supplies liquidity
    pub liquidity_wallet: Pubkey,
    /// Collected-fee balance that triggers liquidation
    pub liquidation_threshold: u64,
    /// Largest amount sent to an AMM pair in one transfer
    pub max_sell_amount: u64,
    pub trading_enabled: bool,
    swapping: bool,
}

impl TokenLedger {
    /// The whole supply is minted to `owner`, who also starts as the
    /// liquidity wallet.
    pub fn new(owner: Pubkey, fee_collector: Pubkey, total_supply: u64) -> Self {
        Self {
            total_supply,
            collected_fees: 0,
            fees: FeeSchedule::default(),
            fee_collector,
            liquidity_wallet: owner,
            liquidation_threshold: DEFAULT_LIQUIDATION_THRESHOLD,
            max_sell_amount: MAX_SELL_AMOUNT,
            trading_enabled: false,
            swapping: false,
        }
    }

    /// Record of the owner at launch: the whole supply, fee-exempt, allowed
    /// to move tokens before trading opens and never earning dividends.
    pub fn genesis_holder(&self, owner: Pubkey, bump: u8) -> HolderAccount {
        HolderAccount {
            balance: self.total_supply,
            fee_exempt: true,
            excluded: true,
            pre_trading_allowed: true,
            ..HolderAccount::new(owner, bump)
        }
    }

    pub fn balance_of(&self, holders: &HolderSet, account: &Pubkey) -> Result<u64> {
        if *account == self.fee_collector {
            return Ok(self.collected_fees);
        }
        Ok(holders.get(account)?.balance)
    }

    pub fn is_swapping(&self) -> bool {
        self.swapping
    }

    /// Moves `amount` from `from` to `to`, taxing it unless either side is
    /// exempt or fees are being liquidated. Both records must be loaded;
    /// liquidation also needs the liquidity wallet's record and is
    /// deferred when it is absent.
    pub fn transfer(
        &mut self,
        tracker: &mut DividendTracker,
        holders: &mut HolderSet,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<TransferReceipt> {
        require!(
            *from != Pubkey::default() && *to != Pubkey::default(),
            ErrorCode::InvalidAccount
        );
        require!(
            *from != self.fee_collector && *to != self.fee_collector,
            ErrorCode::InvalidAccount
        );
        if amount == 0 {
            return Ok(TransferReceipt::default());
        }

        let sender = holders.get(from)?;
        let recipient = holders.get(to)?;
        if !self.trading_enabled {
            require!(sender.pre_trading_allowed, ErrorCode::TradingNotEnabled);
        }
        require!(sender.balance >= amount, ErrorCode::InsufficientBalance);
        let (from_exempt, from_pair) = (sender.fee_exempt, sender.amm_pair);
        let (to_exempt, to_pair) = (recipient.fee_exempt, recipient.amm_pair);

        if self.trading_enabled && !self.swapping && to_pair && !from_exempt && !to_exempt {
            require!(amount <= self.max_sell_amount, ErrorCode::SellAmountExceeded);
        }

        let liquidation = if !self.should_liquidate(from, to, from_pair) {
            None
        } else if holders.contains(&self.liquidity_wallet) {
            Some(self.liquidate(tracker, holders)?)
        } else {
            msg!("Liquidity wallet not supplied, liquidation deferred");
            None
        };

        let take_fee = self.trading_enabled && !self.swapping && !from_exempt && !to_exempt;
        let split = if take_fee {
            self.fees.split(amount)
        } else {
            FeeSplit { total_fee: 0, amount_after_fee: amount }
        };

        let sender = holders.get_mut(from)?;
        sender.balance = sender.balance
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientBalance)?;
        let recipient = holders.get_mut(to)?;
        recipient.balance = recipient.balance
            .checked_add(split.amount_after_fee)
            .ok_or(ErrorCode::MathOverflow)?;
        self.collected_fees = self.collected_fees
            .checked_add(split.total_fee)
            .ok_or(ErrorCode::MathOverflow)?;

        tracker.set_balance(holders, from)?;
        tracker.set_balance(holders, to)?;

        Ok(TransferReceipt {
            amount_received: split.amount_after_fee,
            fee: split.total_fee,
            liquidation,
        })
    }

    fn should_liquidate(&self, from: &Pubkey, to: &Pubkey, from_pair: bool) -> bool {
        self.trading_enabled
            && !self.swapping
            && self.collected_fees >= self.liquidation_threshold
            && !from_pair
            && *from != self.liquidity_wallet
            && *to != self.liquidity_wallet
    }

    /// Releases every collected fee token to the liquidity wallet, which
    /// pairs the liquidity share and sells the rewards share for the
    /// reward asset.
    pub fn liquidate(
        &mut self,
        tracker: &mut DividendTracker,
        holders: &mut HolderSet,
    ) -> Result<Liquidation> {
        let wallet = self.liquidity_wallet;
        let collected = self.collected_fees;
        let liquidation = self.fees.liquidation_split(collected);

        let record = holders.get_mut(&wallet)?;
        let credited = record.balance
            .checked_add(collected)
            .ok_or(ErrorCode::MathOverflow)?;

        let mut guard = SwapGuard::acquire(self)?;
        record.balance = credited;
        guard.collected_fees = 0;
        tracker.set_balance(holders, &wallet)?;
        drop(guard);

        msg!(
            "Liquidated {} collected fee tokens ({} liquidity, {} rewards)",
            collected,
            liquidation.tokens_for_liquidity,
            liquidation.tokens_for_rewards
        );
        Ok(liquidation)
    }

    /// Returns the previous exemption flag.
    pub fn set_fee_exempt(
        &mut self,
        tracker: &mut DividendTracker,
        holders: &mut HolderSet,
        account: &Pubkey,
        exempt: bool,
    ) -> Result<bool> {
        let record = holders.get_mut(account)?;
        let was_exempt = record.fee_exempt;
        require!(was_exempt != exempt, ErrorCode::ValueUnchanged);
        record.fee_exempt = exempt;
        tracker.set_balance(holders, account)?;
        Ok(was_exempt)
    }

    /// Returns the previous liquidity wallet. The new wallet is fee-exempt.
    pub fn update_liquidity_wallet(
        &mut self,
        tracker: &mut DividendTracker,
        holders: &mut HolderSet,
        wallet: Pubkey,
    ) -> Result<Pubkey> {
        require!(
            wallet != Pubkey::default() && wallet != self.fee_collector,
            ErrorCode::InvalidAccount
        );
        require!(wallet != self.liquidity_wallet, ErrorCode::ValueUnchanged);
        let record = holders.get_mut(&wallet)?;
        if !record.fee_exempt {
            record.fee_exempt = true;
            tracker.set_balance(holders, &wallet)?;
        }
        Ok(std::mem::replace(&mut self.liquidity_wallet, wallet))
    }

    pub fn update_liquidation_threshold(&mut self, threshold: u64) -> Result<u64> {
        require!(
            threshold > 0 && threshold <= MAX_LIQUIDATION_THRESHOLD,
            ErrorCode::LiquidationThresholdOutOfBounds
        );
        Ok(std::mem::replace(&mut self.liquidation_threshold, threshold))
    }

    /// AMM pairs never earn dividends.
    pub fn set_amm_pair(
        &mut self,
        tracker: &mut DividendTracker,
        holders: &mut HolderSet,
        pair: &Pubkey,
        is_pair: bool,
    ) -> Result<()> {
        let record = holders.get_mut(pair)?;
        require!(record.amm_pair != is_pair, ErrorCode::ValueUnchanged);
        record.amm_pair = is_pair;
        if is_pair && !record.excluded {
            tracker.exclude(holders, pair)?;
        }
        Ok(())
    }

    pub fn allow_pre_trading_transfer(&mut self, holders: &mut HolderSet, account: &Pubkey) -> Result<()> {
        let record = holders.get_mut(account)?;
        require!(!record.pre_trading_allowed, ErrorCode::ValueUnchanged);
        record.pre_trading_allowed = true;
        Ok(())
    }

    pub fn enable_trading(&mut self) -> Result<()> {
        require!(!self.trading_enabled, ErrorCode::TradingAlreadyEnabled);
        self.trading_enabled = true;
        Ok(())
    }
}

/// Scoped ownership of the liquidation path.
///
/// Acquiring sets the ledger's `swapping` flag and fails if it is already
/// set; dropping the guard clears it on every exit path.
pub struct SwapGuard<'a> {
    ledger: &'a mut TokenLedger,
}

impl<'a> SwapGuard<'a> {
    pub fn acquire(ledger: &'a mut TokenLedger) -> Result<Self> {
        require!(!ledger.swapping, ErrorCode::SwapInProgress);
        ledger.swapping = true;
        Ok(Self { ledger })
    }
}

impl Deref for SwapGuard<'_> {
    type Target = TokenLedger;

    fn deref(&self) -> &TokenLedger {
        self.ledger
    }
}

impl DerefMut for SwapGuard<'_> {
    fn deref_mut(&mut self) -> &mut TokenLedger {
        self.ledger
    }
}

impl Drop for SwapGuard<'_> {
    fn drop(&mut self) {
        self.ledger.swapping = false;
    }
}
