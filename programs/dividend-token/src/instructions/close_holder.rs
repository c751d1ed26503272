use anchor_lang::prelude::*;
use crate::constants::{HOLDER_SEED, TOKEN_STATE_SEED};
use crate::errors::ErrorCode;
use crate::states::{HolderAccount, TokenState};

/// Closes a settled holder record and refunds its rent to the owner.
#[derive(Accounts)]
pub struct CloseHolder<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Program state PDA
    #[account(
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    /// Holder record PDA
    #[account(
        mut,
        close = owner,
        seeds = [HOLDER_SEED, owner.key().as_ref()],
        bump = holder_account.bump,
        has_one = owner
    )]
    pub holder_account: Box<Account<'info, HolderAccount>>,
}

impl<'info> CloseHolder<'info> {
    pub fn handle(ctx: Context<CloseHolder>) -> Result<()> {
        let owner = ctx.accounts.owner.key();
        let ledger = &ctx.accounts.token_state.tracker.ledger;
        require!(
            ctx.accounts.holder_account.is_closable(ledger)?,
            ErrorCode::HolderNotSettled
        );

        msg!("Closing holder record for {}", owner);
        emit!(crate::events::HolderClosed {
            owner,
            holder_account: ctx.accounts.holder_account.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
