use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::states::{DividendTracker, HolderAccount, TokenLedger, TokenState};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin of the token; receives the whole supply
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Program state PDA
    #[account(
        init,
        payer = authority,
        space = TokenState::DISCRIMINATOR.len() + TokenState::INIT_SPACE,
        seeds = [TOKEN_STATE_SEED],
        bump
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    /// Authority's holder record, credited with the whole supply
    #[account(
        init,
        payer = authority,
        space = HolderAccount::DISCRIMINATOR.len() + HolderAccount::INIT_SPACE,
        seeds = [HOLDER_SEED, authority.key().as_ref()],
        bump
    )]
    pub authority_holder: Box<Account<'info, HolderAccount>>,

    /// Mint of the reward asset
    pub reward_mint: Box<Account<'info, Mint>>,

    /// Vault holding rewards until they are paid out
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, reward_mint.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = token_state
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct InitializeParams {
    /// Seconds between payouts to the same holder (default 1 hour)
    pub claim_wait: Option<i64>,
    /// Smallest tracked balance (default 10,000 tokens)
    pub minimum_balance: Option<u64>,
    /// Accumulator magnitude as a power of ten (default 38)
    pub scale_decimals: Option<u8>,
}

impl<'info> Initialize<'info> {
    pub fn handle(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        msg!("Initializing dividend token");

        let authority = ctx.accounts.authority.key();
        let state_key = ctx.accounts.token_state.key();

        let tracker = DividendTracker::with_settings(
            params.claim_wait.unwrap_or(DEFAULT_CLAIM_WAIT_SECONDS),
            params.minimum_balance.unwrap_or(DEFAULT_MINIMUM_TRACKED_BALANCE),
            params.scale_decimals.unwrap_or(DEFAULT_SCALE_DECIMALS),
        )?;
        let token = TokenLedger::new(authority, state_key, TOTAL_SUPPLY);

        // the owner never earns dividends; the fee collector has no record
        ctx.accounts
            .authority_holder
            .set_inner(token.genesis_holder(authority, ctx.bumps.authority_holder));

        let claim_wait = tracker.claim_wait;
        let minimum_balance = tracker.minimum_balance;
        let scale_decimals = tracker.ledger.scale_decimals;

        ctx.accounts.token_state.set_inner(TokenState {
            authority,
            reward_mint: ctx.accounts.reward_mint.key(),
            reward_vault: ctx.accounts.reward_vault.key(),
            processing_budget: DEFAULT_PROCESSING_BUDGET,
            bump: ctx.bumps.token_state,
            vault_bump: ctx.bumps.reward_vault,
            token,
            tracker,
        });

        msg!("Token state: {}", state_key);
        msg!("Authority: {}", authority);
        msg!("Reward mint: {}", ctx.accounts.reward_mint.key());
        msg!("Total supply: {} units", TOTAL_SUPPLY);
        msg!("Claim wait: {} seconds", claim_wait);
        msg!("Minimum tracked balance: {} units", minimum_balance);
        msg!("Scale decimals: {}", scale_decimals);

        emit!(crate::events::TokenInitialized {
            token_state: state_key,
            authority,
            reward_mint: ctx.accounts.reward_mint.key(),
            reward_vault: ctx.accounts.reward_vault.key(),
            total_supply: TOTAL_SUPPLY,
            claim_wait,
            minimum_balance,
            scale_decimals,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
