use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::errors::ErrorCode;
use crate::constants::TOKEN_STATE_SEED;
use crate::states::TokenState;

/// Deposits reward asset into the vault and spreads it over tracked holders
#[derive(Accounts)]
pub struct DepositRewards<'info> {
    pub depositor: Signer<'info>,

    /// Program state PDA
    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    /// Depositor's reward token account
    #[account(
        mut,
        token::mint = token_state.reward_mint,
        token::authority = depositor
    )]
    pub depositor_reward_account: Box<Account<'info, TokenAccount>>,

    /// Reward vault
    #[account(
        mut,
        address = token_state.reward_vault
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct DepositRewardsParams {
    /// Amount of reward asset, in its smallest unit
    pub amount: u64,
}

impl<'info> DepositRewards<'info> {
    pub fn handle(ctx: Context<DepositRewards>, params: DepositRewardsParams) -> Result<()> {
        msg!("Depositing {} reward units", params.amount);
        require!(params.amount > 0, ErrorCode::InvalidDepositAmount);
        require!(
            ctx.accounts.depositor_reward_account.amount >= params.amount,
            ErrorCode::InsufficientBalance
        );

        anchor_spl::token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                anchor_spl::token::Transfer {
                    from: ctx.accounts.depositor_reward_account.to_account_info(),
                    to: ctx.accounts.reward_vault.to_account_info(),
                    authority: ctx.accounts.depositor.to_account_info(),
                },
            ),
            params.amount,
        )?;

        let state = &mut ctx.accounts.token_state;
        state.tracker.distribute(params.amount)?;

        let ledger = &state.tracker.ledger;
        msg!("Tracked supply: {} units", ledger.total_supply);
        msg!("Total injected: {} units", ledger.total_injected);
        msg!("Reward reserve: {} units", ledger.reward_reserve);

        emit!(crate::events::RewardsDeposited {
            depositor: ctx.accounts.depositor.key(),
            amount: params.amount,
            tracked_supply: ledger.total_supply,
            total_injected: ledger.total_injected,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
