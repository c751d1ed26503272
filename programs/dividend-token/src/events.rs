use anchor_lang::prelude::*;

/// Event emitted when the token state and reward vault are created
#[event]
pub struct TokenInitialized {
    /// The state PDA
    pub token_state: Pubkey,
    /// Admin of the token
    pub authority: Pubkey,
    /// Reward asset mint
    pub reward_mint: Pubkey,
    /// Reward vault token account
    pub reward_vault: Pubkey,
    /// Supply minted to the authority
    pub total_supply: u64,
    pub claim_wait: i64,
    pub minimum_balance: u64,
    pub scale_decimals: u8,
    pub timestamp: i64,
}

/// Event emitted for every token transfer
#[event]
pub struct TransferTaxed {
    pub from: Pubkey,
    pub to: Pubkey,
    /// Amount debited from the sender
    pub amount: u64,
    /// Amount credited to the recipient
    pub amount_received: u64,
    /// Fee moved to the fee collector
    pub fee: u64,
    pub timestamp: i64,
}

/// Event emitted when collected fees are released to the liquidity wallet
#[event]
pub struct FeesLiquidated {
    pub liquidity_wallet: Pubkey,
    /// Share paired as liquidity
    pub tokens_for_liquidity: u64,
    /// Share sold for the reward asset
    pub tokens_for_rewards: u64,
    pub timestamp: i64,
}

/// Event emitted when reward asset is deposited and distributed
#[event]
pub struct RewardsDeposited {
    pub depositor: Pubkey,
    pub amount: u64,
    /// Tracked supply the deposit was spread over
    pub tracked_supply: u64,
    /// Total rewards injected so far
    pub total_injected: u64,
    pub timestamp: i64,
}

/// Event emitted when a holder is paid, by claim or by batch
#[event]
pub struct RewardClaimed {
    pub holder: Pubkey,
    pub amount: u64,
    /// True when paid by the batch processor
    pub automatic: bool,
    pub timestamp: i64,
}

/// Event emitted after each batch run
#[event]
pub struct DividendsProcessed {
    /// Holders visited
    pub processed: u32,
    /// Holders paid
    pub paid: u32,
    /// Cursor after the run
    pub cursor: u32,
    /// Cursor passed the end of the registry
    pub wrapped: bool,
    /// Total rewards paid so far
    pub total_distributed: u64,
    pub timestamp: i64,
}

#[event]
pub struct ClaimWaitUpdated {
    pub old_claim_wait: i64,
    pub new_claim_wait: i64,
    pub timestamp: i64,
}

#[event]
pub struct MinimumBalanceUpdated {
    pub old_minimum_balance: u64,
    pub new_minimum_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct ScaleUpdated {
    pub old_scale_decimals: u8,
    pub new_scale_decimals: u8,
    pub timestamp: i64,
}

#[event]
pub struct ProcessingBudgetUpdated {
    pub old_budget: u32,
    pub new_budget: u32,
    pub timestamp: i64,
}

#[event]
pub struct LiquidationThresholdUpdated {
    pub old_threshold: u64,
    pub new_threshold: u64,
    pub timestamp: i64,
}

#[event]
pub struct LiquidityWalletUpdated {
    pub old_wallet: Pubkey,
    pub new_wallet: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct FeeExemptionUpdated {
    pub account: Pubkey,
    pub was_exempt: bool,
    pub is_exempt: bool,
    pub timestamp: i64,
}

/// Event emitted when an account is permanently removed from dividends
#[event]
pub struct ExcludedFromDividends {
    pub account: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AmmPairUpdated {
    pub pair: Pubkey,
    pub is_pair: bool,
    pub timestamp: i64,
}

#[event]
pub struct PreTradingTransferAllowed {
    pub account: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct TradingEnabled {
    pub timestamp: i64,
}

#[event]
pub struct CursorReset {
    pub old_cursor: u32,
    pub timestamp: i64,
}

/// Event emitted when a holder account is opened
#[event]
pub struct HolderOpened {
    pub owner: Pubkey,
    pub holder_account: Pubkey,
    pub payer: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct HolderClosed {
    pub owner: Pubkey,
    pub holder_account: Pubkey,
    pub timestamp: i64,
}
