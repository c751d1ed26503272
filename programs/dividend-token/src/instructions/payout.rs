use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount};
use crate::errors::ErrorCode;
use crate::states::RewardSink;

/// Pays rewards out of the vault with a signed token transfer.
///
/// Recipients are looked up among the supplied token accounts; a holder
/// without a matching reward account is reported as a failed payout so
/// the ledger rolls its booking back. A payout larger than what is left
/// in the vault fails with `InsufficientRewardReserve`.
pub struct VaultPayout<'a, 'info> {
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    reward_mint: Pubkey,
    signer_seeds: &'a [&'a [&'a [u8]]],
    recipients: Vec<AccountInfo<'info>>,
    /// Vault token balance not yet paid out by this sink
    vault_balance: u64,
    /// Payouts made through this sink, in order
    pub paid: Vec<(Pubkey, u64)>,
}

impl<'a, 'info> VaultPayout<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        vault: AccountInfo<'info>,
        vault_balance: u64,
        vault_authority: AccountInfo<'info>,
        reward_mint: Pubkey,
        signer_seeds: &'a [&'a [&'a [u8]]],
        recipients: Vec<AccountInfo<'info>>,
    ) -> Self {
        Self {
            token_program,
            vault,
            vault_authority,
            reward_mint,
            signer_seeds,
            recipients,
            vault_balance,
            paid: Vec::new(),
        }
    }

    fn find_recipient(&self, holder: &Pubkey) -> Result<AccountInfo<'info>> {
        for info in &self.recipients {
            if info.owner != &token::ID || !info.is_writable {
                continue;
            }
            let data = info.try_borrow_data()?;
            let Ok(account) = TokenAccount::try_deserialize(&mut &data[..]) else {
                continue;
            };
            if account.owner == *holder && account.mint == self.reward_mint {
                return Ok(info.clone());
            }
        }
        err!(ErrorCode::RecipientAccountMissing)
    }
}

impl RewardSink for VaultPayout<'_, '_> {
    fn transfer_reward(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        if amount > self.vault_balance {
            msg!("Vault holds {} reward units, {} owed to {}", self.vault_balance, amount, holder);
            return err!(ErrorCode::InsufficientRewardReserve);
        }
        let recipient = self.find_recipient(holder)?;

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                token::Transfer {
                    from: self.vault.clone(),
                    to: recipient,
                    authority: self.vault_authority.clone(),
                },
                self.signer_seeds,
            ),
            amount,
        )?;

        self.vault_balance -= amount;
        self.paid.push((*holder, amount));
        Ok(())
    }
}
