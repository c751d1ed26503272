use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::constants::TOKEN_STATE_SEED;
use crate::events::*;
use crate::states::TokenState;
use super::holder_accounts::LoadedHolders;

/// Authority-only settings. Every setter logs and emits the old and new value.
///
/// Setters that touch a holder take its `HolderAccount` (and, when the
/// holder may leave the registry, the last registered holder's record)
/// as remaining accounts.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(constraint = authority.key() == token_state.authority @ ErrorCode::Unauthorized)]
    pub authority: Signer<'info>,

    /// Program state PDA
    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,
}

impl<'info> UpdateConfig<'info> {
    pub fn update_claim_wait(&mut self, claim_wait: i64) -> Result<()> {
        let old_claim_wait = self.token_state.tracker.update_claim_wait(claim_wait)?;
        msg!("Claim wait: {} -> {} seconds", old_claim_wait, claim_wait);
        emit!(ClaimWaitUpdated {
            old_claim_wait,
            new_claim_wait: claim_wait,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn update_minimum_balance(&mut self, minimum_balance: u64) -> Result<()> {
        let old_minimum_balance = self.token_state.tracker.update_minimum_balance(minimum_balance)?;
        msg!("Minimum tracked balance: {} -> {} units", old_minimum_balance, minimum_balance);
        emit!(MinimumBalanceUpdated {
            old_minimum_balance,
            new_minimum_balance: minimum_balance,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn update_scale_decimals(&mut self, scale_decimals: u8) -> Result<()> {
        let old_scale_decimals = self.token_state.tracker.update_scale_decimals(scale_decimals)?;
        msg!("Scale decimals: {} -> {}", old_scale_decimals, scale_decimals);
        emit!(ScaleUpdated {
            old_scale_decimals,
            new_scale_decimals: scale_decimals,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn update_processing_budget(&mut self, budget: u32) -> Result<()> {
        let old_budget = self.token_state.update_processing_budget(budget)?;
        msg!("Processing budget: {} -> {}", old_budget, budget);
        emit!(ProcessingBudgetUpdated {
            old_budget,
            new_budget: budget,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn update_liquidation_threshold(&mut self, threshold: u64) -> Result<()> {
        let old_threshold = self.token_state.token.update_liquidation_threshold(threshold)?;
        msg!("Liquidation threshold: {} -> {} units", old_threshold, threshold);
        emit!(LiquidationThresholdUpdated {
            old_threshold,
            new_threshold: threshold,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn update_liquidity_wallet(
        &mut self,
        program_id: &Pubkey,
        remaining: &[AccountInfo<'info>],
        wallet: Pubkey,
    ) -> Result<()> {
        let mut holders = LoadedHolders::load(program_id, remaining)?;
        let state: &mut TokenState = &mut self.token_state;
        let old_wallet = state.token.update_liquidity_wallet(&mut state.tracker, &mut holders.set, wallet)?;
        msg!("Liquidity wallet: {} -> {}", old_wallet, wallet);
        emit!(LiquidityWalletUpdated {
            old_wallet,
            new_wallet: wallet,
            timestamp: Clock::get()?.unix_timestamp,
        });
        holders.store()
    }

    pub fn set_fee_exempt(
        &mut self,
        program_id: &Pubkey,
        remaining: &[AccountInfo<'info>],
        account: Pubkey,
        exempt: bool,
    ) -> Result<()> {
        let mut holders = LoadedHolders::load(program_id, remaining)?;
        let state: &mut TokenState = &mut self.token_state;
        let was_exempt = state.token.set_fee_exempt(&mut state.tracker, &mut holders.set, &account, exempt)?;
        msg!("Fee exemption for {}: {}", account, exempt);
        emit!(FeeExemptionUpdated {
            account,
            was_exempt,
            is_exempt: exempt,
            timestamp: Clock::get()?.unix_timestamp,
        });
        holders.store()
    }

    pub fn exclude_from_dividends(
        &mut self,
        program_id: &Pubkey,
        remaining: &[AccountInfo<'info>],
        account: Pubkey,
    ) -> Result<()> {
        let mut holders = LoadedHolders::load(program_id, remaining)?;
        self.token_state.tracker.exclude(&mut holders.set, &account)?;
        emit!(ExcludedFromDividends {
            account,
            timestamp: Clock::get()?.unix_timestamp,
        });
        holders.store()
    }

    pub fn set_amm_pair(
        &mut self,
        program_id: &Pubkey,
        remaining: &[AccountInfo<'info>],
        pair: Pubkey,
        is_pair: bool,
    ) -> Result<()> {
        let mut holders = LoadedHolders::load(program_id, remaining)?;
        let state: &mut TokenState = &mut self.token_state;
        state.token.set_amm_pair(&mut state.tracker, &mut holders.set, &pair, is_pair)?;
        msg!("AMM pair {}: {}", pair, is_pair);
        emit!(AmmPairUpdated {
            pair,
            is_pair,
            timestamp: Clock::get()?.unix_timestamp,
        });
        holders.store()
    }

    pub fn allow_pre_trading_transfer(
        &mut self,
        program_id: &Pubkey,
        remaining: &[AccountInfo<'info>],
        account: Pubkey,
    ) -> Result<()> {
        let mut holders = LoadedHolders::load(program_id, remaining)?;
        self.token_state.token.allow_pre_trading_transfer(&mut holders.set, &account)?;
        msg!("Pre-trading transfers allowed for {}", account);
        emit!(PreTradingTransferAllowed {
            account,
            timestamp: Clock::get()?.unix_timestamp,
        });
        holders.store()
    }

    pub fn enable_trading(&mut self) -> Result<()> {
        self.token_state.token.enable_trading()?;
        msg!("Trading enabled");
        emit!(TradingEnabled {
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }

    pub fn reset_cursor(&mut self) -> Result<()> {
        let old_cursor = self.token_state.tracker.reset_cursor();
        msg!("Cursor reset from {}", old_cursor);
        emit!(CursorReset {
            old_cursor,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}
