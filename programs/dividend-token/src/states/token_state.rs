use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::ErrorCode;
use super::dividend_tracker::DividendTracker;
use super::token_ledger::{TokenLedger, TransferReceipt};
use super::HolderSet;

/// Program-wide state: fee policy, the dividend accumulator and the
/// payout cursor. Fixed size; per-holder data lives in `HolderAccount`s.
///
/// The account is a PDA and also acts as the fee collector and as the
/// authority of the reward vault.
#[account]
#[derive(InitSpace)]
pub struct TokenState {
    /// Admin allowed to change settings
    pub authority: Pubkey,
    /// Mint of the reward asset
    pub reward_mint: Pubkey,
    /// Token account holding undistributed rewards
    pub reward_vault: Pubkey,
    /// Holders visited by the batch run after each transfer
    pub processing_budget: u32,
    /// Bump seed for the state PDA
    pub bump: u8,
    /// Bump seed for the reward vault PDA
    pub vault_bump: u8,
    pub token: TokenLedger,
    pub tracker: DividendTracker,
}

impl TokenState {
    pub fn transfer(
        &mut self,
        holders: &mut HolderSet,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<TransferReceipt> {
        self.token.transfer(&mut self.tracker, holders, from, to, amount)
    }

    pub fn update_processing_budget(&mut self, budget: u32) -> Result<u32> {
        require!(
            (MIN_PROCESSING_BUDGET..=MAX_PROCESSING_BUDGET).contains(&budget),
            ErrorCode::ProcessingBudgetOutOfBounds
        );
        require!(budget != self.processing_budget, ErrorCode::ValueUnchanged);
        Ok(std::mem::replace(&mut self.processing_budget, budget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::HolderAccount;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn state() -> (TokenState, HolderSet) {
        let token = TokenLedger::new(key(1), key(4), TOTAL_SUPPLY);
        let mut holders = HolderSet::default();
        holders.insert(token.genesis_holder(key(1), 255));
        let state = TokenState {
            authority: key(1),
            reward_mint: key(2),
            reward_vault: key(3),
            processing_budget: DEFAULT_PROCESSING_BUDGET,
            bump: 255,
            vault_bump: 254,
            token,
            tracker: DividendTracker::default(),
        };
        (state, holders)
    }

    fn serialized_len(state: &TokenState) -> usize {
        let mut data = Vec::new();
        state.try_serialize(&mut data).unwrap();
        data.len()
    }

    #[test]
    fn size_does_not_grow_with_holders() {
        let (mut state, mut holders) = state();
        state.token.enable_trading().unwrap();
        let before = serialized_len(&state);
        assert_eq!(before, TokenState::DISCRIMINATOR.len() + TokenState::INIT_SPACE);

        // dust transfers to fresh keys, tracked ones included
        for n in 0..200u8 {
            let mut bytes = [0xAB; 32];
            bytes[0] = n;
            let account = Pubkey::new_from_array(bytes);
            holders.insert(HolderAccount::new(account, 255));
            let amount = if n % 2 == 0 { 1 } else { DEFAULT_MINIMUM_TRACKED_BALANCE };
            state.transfer(&mut holders, &key(1), &account, amount).unwrap();
        }

        assert_eq!(state.tracker.registry.len(), 100);
        assert_eq!(serialized_len(&state), before);
    }

    #[test]
    fn processing_budget_is_bounded() {
        let (mut state, _) = state();
        assert_eq!(
            state.update_processing_budget(0).unwrap_err(),
            error!(ErrorCode::ProcessingBudgetOutOfBounds)
        );
        assert_eq!(
            state.update_processing_budget(MAX_PROCESSING_BUDGET + 1).unwrap_err(),
            error!(ErrorCode::ProcessingBudgetOutOfBounds)
        );
        assert_eq!(
            state.update_processing_budget(DEFAULT_PROCESSING_BUDGET).unwrap_err(),
            error!(ErrorCode::ValueUnchanged)
        );
        assert_eq!(state.update_processing_budget(12).unwrap(), DEFAULT_PROCESSING_BUDGET);
    }
}
