use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::TOKEN_STATE_SEED;
use crate::states::TokenState;
use super::holder_accounts::LoadedHolders;
use super::payout::VaultPayout;

/// Taxed token transfer.
///
/// Remaining accounts carry the `HolderAccount`s of the sender, the
/// recipient and anyone else the transfer touches (the liquidity wallet,
/// the last registered holder when a holder leaves the registry), plus
/// the holders and reward token accounts for the follow-up batch run.
#[derive(Accounts)]
pub struct TransferTokens<'info> {
    /// Token holder sending the tokens
    pub sender: Signer<'info>,

    /// Program state PDA
    #[account(
        mut,
        seeds = [TOKEN_STATE_SEED],
        bump = token_state.bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    /// Reward vault paying the batch run
    #[account(
        mut,
        address = token_state.reward_vault
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct TransferParams {
    /// Recipient of the tokens
    pub to: Pubkey,
    /// Amount debited from the sender
    pub amount: u64,
}

impl<'info> TransferTokens<'info> {
    pub fn handle(
        ctx: Context<'_, '_, '_, 'info, TransferTokens<'info>>,
        params: TransferParams,
    ) -> Result<()> {
        let sender = ctx.accounts.sender.key();
        let now = Clock::get()?.unix_timestamp;
        msg!("Transfer of {} units from {} to {}", params.amount, sender, params.to);

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

        let state: &mut TokenState = &mut ctx.accounts.token_state;
        let receipt = state.transfer(&mut holders.set, &sender, &params.to, params.amount)?;

        if let Some(liquidation) = receipt.liquidation {
            emit!(crate::events::FeesLiquidated {
                liquidity_wallet: state.token.liquidity_wallet,
                tokens_for_liquidity: liquidation.tokens_for_liquidity,
                tokens_for_rewards: liquidation.tokens_for_rewards,
                timestamp: now,
            });
        }

        msg!("Received: {} units, fee: {} units", receipt.amount_received, receipt.fee);
        msg!("Sender balance: {} units", state.token.balance_of(&holders.set, &sender)?);
        emit!(crate::events::TransferTaxed {
            from: sender,
            to: params.to,
            amount: params.amount,
            amount_received: receipt.amount_received,
            fee: receipt.fee,
            timestamp: now,
        });

        let report = state
            .tracker
            .process_batch(&mut holders.set, state.processing_budget, now, &mut payout)?;

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
