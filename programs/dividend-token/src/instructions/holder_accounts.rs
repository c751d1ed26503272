use anchor_lang::prelude::*;
use crate::constants::HOLDER_SEED;
use crate::errors::ErrorCode;
use crate::states::{HolderAccount, HolderSet};

/// Holder records passed as remaining accounts.
///
/// Program-owned accounts carrying the `HolderAccount` discriminator are
/// deserialized and checked against their PDA address. Anything else
/// (reward token accounts, for instance) is left to other consumers.
pub struct LoadedHolders<'info> {
    pub set: HolderSet,
    /// Records as loaded, next to the account they came from
    accounts: Vec<(HolderAccount, AccountInfo<'info>)>,
}

impl<'info> LoadedHolders<'info> {
    pub fn load(program_id: &Pubkey, infos: &[AccountInfo<'info>]) -> Result<Self> {
        let mut set = HolderSet::default();
        let mut accounts = Vec::new();

        for info in infos {
            if info.owner != program_id {
                continue;
            }
            let record = {
                let data = info.try_borrow_data()?;
                if !data.starts_with(HolderAccount::DISCRIMINATOR) {
                    continue;
                }
                HolderAccount::try_deserialize(&mut &data[..])?
            };

            let expected = Pubkey::create_program_address(
                &[HOLDER_SEED, record.owner.as_ref(), &[record.bump]],
                program_id,
            )
            .map_err(|_| error!(ErrorCode::InvalidAccount))?;
            require_keys_eq!(expected, info.key(), ErrorCode::InvalidAccount);

            if set.insert(record.clone()) {
                accounts.push((record, info.clone()));
            }
        }

        msg!("Loaded {} holder records", set.len());
        Ok(Self { set, accounts })
    }

    /// Writes changed records back to their accounts.
    pub fn store(&self) -> Result<()> {
        for (loaded, info) in &self.accounts {
            let record = self.set.get(&loaded.owner)?;
            if record == loaded {
                continue;
            }
            require!(info.is_writable, ErrorCode::InvalidAccount);
            let mut data = info.try_borrow_mut_data()?;
            let mut writer: &mut [u8] = &mut data[..];
            record.try_serialize(&mut writer)?;
        }
        Ok(())
    }
}
