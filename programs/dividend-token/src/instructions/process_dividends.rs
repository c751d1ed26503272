use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::errors::ErrorCode;
use crate::constants::{TOKEN_STATE_SEED, MIN_PROCESSING_BUDGET, MAX_PROCESSING_BUDGET};
use crate::states::TokenState;
use super::holder_accounts::LoadedHolders;
use super::payout::VaultPayout;

/// Crank that walks the holder registry from the cursor and pays holders
/// whose claim wait elapsed. Their `HolderAccount`s and reward token
/// accounts are passed as remaining accounts; holders without a reward
/// account are skipped, and the walk stops at the first holder whose
/// record is missing.
#[derive(Accounts)]
pub struct ProcessDividends<'info> {
    pub cranker: Signer<'info>,

    /// Program state PDA
    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    /// Reward vault
    #[account(
        mut,
        address = token_state.reward_vault
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ProcessDividendsParams {
    /// Most holders to visit in this call
    pub unit_budget: u32,
}

impl<'info> ProcessDividends<'info> {
    pub fn handle(
        ctx: Context<'_, '_, '_, 'info, ProcessDividends<'info>>,
        params: ProcessDividendsParams,
    ) -> Result<()> {
        require!(
            (MIN_PROCESSING_BUDGET..=MAX_PROCESSING_BUDGET).contains(&params.unit_budget),
            ErrorCode::ProcessingBudgetOutOfBounds
        );
        let now = Clock::get()?.unix_timestamp;
        msg!("Processing dividends with budget {}", params.unit_budget);

        let mut holders = LoadedHolders::load(ctx.program_id, ctx.remaining_accounts)?;

        let bump = [ctx.accounts.token_state.bump];
        let signer_seeds: &[&[&[u8]]] = &[&[TOKEN_STATE_SEED, &bump]];
        let mut payout = VaultPayout::new(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.reward_vault.to_account_info(),
            ctx.accounts.reward_vault.amount,
            ctx.accounts.token_state.to_account_info(),
            ctx.accounts.token_state.reward_mint,
            signer_seeds,
            ctx.remaining_accounts.to_vec(),
        );

        let state = &mut ctx.accounts.token_state;
        let report = state
            .tracker
            .process_batch(&mut holders.set, params.unit_budget, now, &mut payout)?;

        for (holder, amount) in &payout.paid {
            emit!(crate::events::RewardClaimed {
                holder: *holder,
                amount: *amount,
                automatic: true,
                timestamp: now,
            });
        }

        emit!(crate::events::DividendsProcessed {
            processed: report.processed,
            paid: report.paid,
            cursor: report.cursor,
            wrapped: report.wrapped,
            total_distributed: state.tracker.ledger.total_distributed,
            timestamp: now,
        });

        holders.store()
    }
}
