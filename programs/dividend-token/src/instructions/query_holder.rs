use anchor_lang::prelude::*;
use crate::constants::{HOLDER_SEED, TOKEN_STATE_SEED};
use crate::states::{HolderAccount, HolderInfo, TokenState};
use super::holder_accounts::LoadedHolders;

/// Read-only dividend view of one holder, returned as instruction return data
#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct QueryHolder<'info> {
    /// Program state PDA
    #[account(
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    /// Dividend record of the queried holder
    #[account(
        seeds = [HOLDER_SEED, account.as_ref()],
        bump = holder_account.bump
    )]
    pub holder_account: Box<Account<'info, HolderAccount>>,
}

/// Lookup by registry position. The record registered at that position
/// is passed as a remaining account.
#[derive(Accounts)]
pub struct QueryHolderAt<'info> {
    /// Program state PDA
    #[account(
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,
}

impl<'info> QueryHolder<'info> {
    pub fn by_account(ctx: Context<QueryHolder>, account: Pubkey) -> Result<HolderInfo> {
        let now = Clock::get()?.unix_timestamp;
        msg!("Querying holder {}", account);
        let info = ctx
            .accounts
            .token_state
            .tracker
            .holder_info(&ctx.accounts.holder_account, now)?;
        log_holder(&info);
        Ok(info)
    }
}

impl<'info> QueryHolderAt<'info> {
    pub fn by_index(
        ctx: Context<'_, '_, '_, 'info, QueryHolderAt<'info>>,
        index: u32,
    ) -> Result<Option<HolderInfo>> {
        let now = Clock::get()?.unix_timestamp;
        let holders = LoadedHolders::load(ctx.program_id, ctx.remaining_accounts)?;
        let info = ctx
            .accounts
            .token_state
            .tracker
            .holder_info_at(&holders.set, index, now)?;
        match &info {
            Some(info) => log_holder(info),
            None => msg!("No holder at index {}", index),
        }
        Ok(info)
    }
}

fn log_holder(info: &HolderInfo) {
    msg!("Holder: {}", info.account);
    msg!("Index: {}", info.index);
    msg!("Iterations until processed: {}", info.iterations_until_processed);
    msg!("Withdrawable: {} units", info.withdrawable);
    msg!("Total earned: {} units", info.total_earned);
    msg!("Withdrawn: {} units", info.withdrawn);
    msg!("Last claim: {}", info.last_claim_time);
    msg!("Next claim: {}", info.next_claim_time);
    msg!("Seconds until auto claim: {}", info.seconds_until_auto_claim);
}
