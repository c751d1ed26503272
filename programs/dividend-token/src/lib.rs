use anchor_lang::prelude::*;

declare_id!("Hn4GUjMn9XLaMcoMGQbx8YvQsxTEudSbPq7zpSmBasZN");

pub mod instructions;
pub mod errors;
pub mod constants;
pub mod math;
pub mod states;
pub mod events;

#[cfg(test)]
pub mod test;

pub use instructions::*;
pub use events::*;

#[program]
pub mod dividend_token {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        Initialize::handle(ctx, params)
    }

    pub fn open_holder(ctx: Context<OpenHolder>, owner: Pubkey) -> Result<()> {
        OpenHolder::handle(ctx, owner)
    }

    pub fn close_holder(ctx: Context<CloseHolder>) -> Result<()> {
        CloseHolder::handle(ctx)
    }

    pub fn transfer<'info>(
        ctx: Context<'_, '_, '_, 'info, TransferTokens<'info>>,
        params: TransferParams,
    ) -> Result<()> {
        TransferTokens::handle(ctx, params)
    }

    pub fn deposit_rewards(ctx: Context<DepositRewards>, params: DepositRewardsParams) -> Result<()> {
        DepositRewards::handle(ctx, params)
    }

    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        Claim::handle(ctx)
    }

    pub fn process_dividends<'info>(
        ctx: Context<'_, '_, '_, 'info, ProcessDividends<'info>>,
        params: ProcessDividendsParams,
    ) -> Result<()> {
        ProcessDividends::handle(ctx, params)
    }

    pub fn update_claim_wait(ctx: Context<UpdateConfig>, claim_wait: i64) -> Result<()> {
        ctx.accounts.update_claim_wait(claim_wait)
    }

    pub fn update_minimum_balance(ctx: Context<UpdateConfig>, minimum_balance: u64) -> Result<()> {
        ctx.accounts.update_minimum_balance(minimum_balance)
    }

    pub fn update_scale_decimals(ctx: Context<UpdateConfig>, scale_decimals: u8) -> Result<()> {
        ctx.accounts.update_scale_decimals(scale_decimals)
    }

    pub fn update_processing_budget(ctx: Context<UpdateConfig>, budget: u32) -> Result<()> {
        ctx.accounts.update_processing_budget(budget)
    }

    pub fn update_liquidation_threshold(ctx: Context<UpdateConfig>, threshold: u64) -> Result<()> {
        ctx.accounts.update_liquidation_threshold(threshold)
    }

    pub fn update_liquidity_wallet<'info>(
        ctx: Context<'_, '_, '_, 'info, UpdateConfig<'info>>,
        wallet: Pubkey,
    ) -> Result<()> {
        ctx.accounts.update_liquidity_wallet(ctx.program_id, ctx.remaining_accounts, wallet)
    }

    pub fn set_fee_exempt<'info>(
        ctx: Context<'_, '_, '_, 'info, UpdateConfig<'info>>,
        account: Pubkey,
        exempt: bool,
    ) -> Result<()> {
        ctx.accounts.set_fee_exempt(ctx.program_id, ctx.remaining_accounts, account, exempt)
    }

    pub fn exclude_from_dividends<'info>(
        ctx: Context<'_, '_, '_, 'info, UpdateConfig<'info>>,
        account: Pubkey,
    ) -> Result<()> {
        ctx.accounts.exclude_from_dividends(ctx.program_id, ctx.remaining_accounts, account)
    }

    pub fn set_amm_pair<'info>(
        ctx: Context<'_, '_, '_, 'info, UpdateConfig<'info>>,
        pair: Pubkey,
        is_pair: bool,
    ) -> Result<()> {
        ctx.accounts.set_amm_pair(ctx.program_id, ctx.remaining_accounts, pair, is_pair)
    }

    pub fn allow_pre_trading_transfer<'info>(
        ctx: Context<'_, '_, '_, 'info, UpdateConfig<'info>>,
        account: Pubkey,
    ) -> Result<()> {
        ctx.accounts.allow_pre_trading_transfer(ctx.program_id, ctx.remaining_accounts, account)
    }

    pub fn enable_trading(ctx: Context<UpdateConfig>) -> Result<()> {
        ctx.accounts.enable_trading()
    }

    pub fn reset_cursor(ctx: Context<UpdateConfig>) -> Result<()> {
        ctx.accounts.reset_cursor()
    }

    pub fn query_holder(ctx: Context<QueryHolder>, account: Pubkey) -> Result<states::HolderInfo> {
        QueryHolder::by_account(ctx, account)
    }

    pub fn query_holder_at<'info>(
        ctx: Context<'_, '_, '_, 'info, QueryHolderAt<'info>>,
        index: u32,
    ) -> Result<Option<states::HolderInfo>> {
        QueryHolderAt::by_index(ctx, index)
    }
}
