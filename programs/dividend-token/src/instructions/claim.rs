use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{HOLDER_SEED, TOKEN_STATE_SEED};
use crate::states::{HolderAccount, TokenState};
use super::payout::VaultPayout;

/// Pays a holder everything currently withdrawable
#[derive(Accounts)]
pub struct Claim<'info> {
    pub holder: Signer<'info>,

    /// Program state PDA
    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    /// Holder's dividend record
    #[account(
        mut,
        seeds = [HOLDER_SEED, holder.key().as_ref()],
        bump = holder_account.bump
    )]
    pub holder_account: Box<Account<'info, HolderAccount>>,

    /// Reward vault
    #[account(
        mut,
        address = token_state.reward_vault
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    /// Holder's reward token account
    #[account(
        mut,
        token::mint = token_state.reward_mint,
        token::authority = holder
    )]
    pub holder_reward_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> Claim<'info> {
    pub fn handle(ctx: Context<Claim>) -> Result<()> {
        let holder = ctx.accounts.holder.key();
        let now = Clock::get()?.unix_timestamp;
        msg!("Processing claim for holder: {}", holder);

        let bump = [ctx.accounts.token_state.bump];
        let signer_seeds: &[&[&[u8]]] = &[&[TOKEN_STATE_SEED, &bump]];
        let mut payout = VaultPayout::new(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.reward_vault.to_account_info(),
            ctx.accounts.reward_vault.amount,
            ctx.accounts.token_state.to_account_info(),
            ctx.accounts.token_state.reward_mint,
            signer_seeds,
            vec![ctx.accounts.holder_reward_account.to_account_info()],
        );

        let state = &mut ctx.accounts.token_state;
        let record: &mut HolderAccount = &mut ctx.accounts.holder_account;
        let amount = state.tracker.claim(record, now, &mut payout)?;

        msg!("Claimed {} reward units", amount);
        msg!("Total withdrawn: {} units", record.withdrawn);

        emit!(crate::events::RewardClaimed {
            holder,
            amount,
            automatic: false,
            timestamp: now,
        });

        Ok(())
    }
}
