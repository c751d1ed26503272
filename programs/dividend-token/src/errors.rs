use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Math overflow occurred during calculation")]
    MathOverflow,
    #[msg("Holder registry index is out of sync with its keys")]
    RegistryCorrupted,
    #[msg("Reported previous balance does not match the tracked balance")]
    BalanceMismatch,
    #[msg("Reward reserve is smaller than the amount owed")]
    InsufficientRewardReserve,
    #[msg("No tracked supply to distribute rewards over")]
    NoTrackedSupply,
    #[msg("Claim wait has not elapsed since the last claim")]
    ClaimCooldownActive,
    #[msg("No rewards available to withdraw")]
    NothingToWithdraw,
    #[msg("Reward transfer to holder failed")]
    RewardTransferFailed,
    #[msg("Reward token account for holder not provided")]
    RecipientAccountMissing,
    #[msg("Claim wait must be between 1 and 24 hours")]
    ClaimWaitOutOfBounds,
    #[msg("Minimum tracked balance out of bounds")]
    MinimumBalanceOutOfBounds,
    #[msg("Scale decimals must be between 20 and 38")]
    ScaleOutOfBounds,
    #[msg("Scale cannot change after rewards were injected")]
    ScaleLocked,
    #[msg("Processing budget out of bounds")]
    ProcessingBudgetOutOfBounds,
    #[msg("Liquidation threshold out of bounds")]
    LiquidationThresholdOutOfBounds,
    #[msg("New value is identical to the current one")]
    ValueUnchanged,
    #[msg("Account is already excluded from dividends")]
    AlreadyExcluded,
    #[msg("Fee liquidation already in progress")]
    SwapInProgress,
    #[msg("Trading has not been enabled yet")]
    TradingNotEnabled,
    #[msg("Trading is already enabled")]
    TradingAlreadyEnabled,
    #[msg("Sell amount exceeds the maximum sell transaction amount")]
    SellAmountExceeded,
    #[msg("Insufficient balance for operation")]
    InsufficientBalance,
    #[msg("The default address is not a valid account")]
    InvalidAccount,
    #[msg("Signer is not the token authority")]
    Unauthorized,
    #[msg("Holder account was not supplied with the instruction")]
    HolderAccountMissing,
    #[msg("Holder account still has a balance, unpaid rewards or flags")]
    HolderNotSettled,
    #[msg("Invalid deposit amount - must be greater than zero")]
    InvalidDepositAmount,
}
