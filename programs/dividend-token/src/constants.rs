// PDA Seeds
pub const TOKEN_STATE_SEED: &[u8] = b"token_state";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const HOLDER_SEED: &[u8] = b"holder";

// Token parameters
pub const ONE_TOKEN: u64 = 1_000_000_000;
pub const TOTAL_SUPPLY: u64 = 1_000_000_000 * ONE_TOKEN; // 1B tokens

// Transfer fees (percent of the transferred amount)
pub const REWARDS_FEE_PERCENT: u8 = 4;
pub const LIQUIDITY_FEE_PERCENT: u8 = 2;

// Liquidation of collected fees
pub const DEFAULT_LIQUIDATION_THRESHOLD: u64 = 100_000 * ONE_TOKEN;
pub const MAX_LIQUIDATION_THRESHOLD: u64 = 200_000 * ONE_TOKEN;
pub const MAX_SELL_AMOUNT: u64 = 1_000_000 * ONE_TOKEN;

// Dividend tracking
pub const DEFAULT_CLAIM_WAIT_SECONDS: i64 = 3600; // 1 hour
pub const MIN_CLAIM_WAIT_SECONDS: i64 = 3600;
pub const MAX_CLAIM_WAIT_SECONDS: i64 = 86400; // 24 hours
pub const DEFAULT_MINIMUM_TRACKED_BALANCE: u64 = 10_000 * ONE_TOKEN;
pub const MAX_MINIMUM_TRACKED_BALANCE: u64 = 10_000_000 * ONE_TOKEN;

// Magnitude of the per-share accumulator, as a power of ten
pub const DEFAULT_SCALE_DECIMALS: u8 = 38;
pub const MIN_SCALE_DECIMALS: u8 = 20; // 10^20 > 2^64
pub const MAX_SCALE_DECIMALS: u8 = 38; // 10^38 < 2^128

// Holders visited per batch
pub const DEFAULT_PROCESSING_BUDGET: u32 = 8;
pub const MIN_PROCESSING_BUDGET: u32 = 1;
pub const MAX_PROCESSING_BUDGET: u32 = 20;
