use std::collections::BTreeSet;

use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use super::HolderSet;

/// Ordered set of dividend-eligible holders.
///
/// Only the length is stored globally. Each holder's position lives in its
/// own `HolderAccount::registry_index`, so the registry costs the same no
/// matter how many holders join. Removal swaps the last holder into the
/// vacated slot, which means the last holder's record must be loaded too.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HolderRegistry {
    len: u32,
}

impl HolderRegistry {
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, holders: &HolderSet, account: &Pubkey) -> Result<bool> {
        Ok(holders.get(account)?.is_registered())
    }

    pub fn index_of(&self, holders: &HolderSet, account: &Pubkey) -> Result<Option<u32>> {
        Ok(holders.get(account)?.registry_index)
    }

    /// Holder at `index`, `None` past the end. The record registered
    /// there must be loaded.
    pub fn at(&self, holders: &HolderSet, index: u32) -> Result<Option<Pubkey>> {
        if index >= self.len {
            return Ok(None);
        }
        let owner = holders
            .owner_at(index)?
            .ok_or_else(|| error!(ErrorCode::HolderAccountMissing))?;
        Ok(Some(owner))
    }

    /// Inserts or removes `account` depending on its eligibility.
    /// Returns whether the account is registered afterwards.
    pub fn upsert(
        &mut self,
        holders: &mut HolderSet,
        account: &Pubkey,
        balance: u64,
        minimum_balance: u64,
        exempt: bool,
    ) -> Result<bool> {
        if exempt || balance == 0 || balance < minimum_balance {
            self.remove(holders, account)?;
            return Ok(false);
        }
        self.insert(holders, account)?;
        Ok(true)
    }

    /// Appends `account` unless already present.
    pub fn insert(&mut self, holders: &mut HolderSet, account: &Pubkey) -> Result<bool> {
        let record = holders.get_mut(account)?;
        if record.is_registered() {
            return Ok(false);
        }
        let next_len = self.len.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        record.registry_index = Some(self.len);
        self.len = next_len;
        Ok(true)
    }

    /// Swap-removes `account`. Unregistered accounts are a no-op.
    pub fn remove(&mut self, holders: &mut HolderSet, account: &Pubkey) -> Result<bool> {
        let Some(index) = holders.get(account)?.registry_index else {
            return Ok(false);
        };
        self.verify(holders)?;
        let last = self.len - 1;

        if index != last {
            let moved = holders
                .owner_at(last)?
                .ok_or_else(|| error!(ErrorCode::HolderAccountMissing))?;
            holders.get_mut(&moved)?.registry_index = Some(index);
        }
        holders.get_mut(account)?.registry_index = None;
        self.len = last;
        Ok(true)
    }

    /// Checks that every loaded registered record points inside the
    /// registry and no two records share a slot.
    pub fn verify(&self, holders: &HolderSet) -> Result<()> {
        let mut seen = BTreeSet::new();
        for record in holders.iter() {
            if let Some(index) = record.registry_index {
                require!(
                    index < self.len && seen.insert(index),
                    ErrorCode::RegistryCorrupted
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::HolderAccount;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn holders(count: u8) -> HolderSet {
        let mut set = HolderSet::default();
        for n in 1..=count {
            set.insert(HolderAccount::new(key(n), 255));
        }
        set
    }

    fn order(registry: &HolderRegistry, set: &HolderSet) -> Vec<Pubkey> {
        (0..registry.len())
            .map(|index| registry.at(set, index).unwrap().unwrap())
            .collect()
    }

    #[test]
    fn insert_keeps_insertion_order() {
        let mut set = holders(4);
        let mut registry = HolderRegistry::default();
        for n in 1..=4 {
            assert!(registry.insert(&mut set, &key(n)).unwrap());
        }
        assert!(!registry.insert(&mut set, &key(2)).unwrap());

        assert_eq!(registry.len(), 4);
        assert_eq!(order(&registry, &set), vec![key(1), key(2), key(3), key(4)]);
        assert_eq!(registry.index_of(&set, &key(3)).unwrap(), Some(2));
        assert_eq!(registry.at(&set, 4).unwrap(), None);
        registry.verify(&set).unwrap();
    }

    #[test]
    fn remove_swaps_last_into_gap() {
        let mut set = holders(4);
        let mut registry = HolderRegistry::default();
        for n in 1..=4 {
            registry.insert(&mut set, &key(n)).unwrap();
        }

        assert!(registry.remove(&mut set, &key(2)).unwrap());
        assert_eq!(order(&registry, &set), vec![key(1), key(4), key(3)]);
        assert_eq!(registry.index_of(&set, &key(4)).unwrap(), Some(1));
        assert_eq!(registry.index_of(&set, &key(2)).unwrap(), None);
        registry.verify(&set).unwrap();

        // removing the tail moves nothing
        assert!(registry.remove(&mut set, &key(3)).unwrap());
        assert_eq!(order(&registry, &set), vec![key(1), key(4)]);
        registry.verify(&set).unwrap();
    }

    #[test]
    fn removing_absent_account_is_idempotent() {
        let mut set = holders(2);
        let mut registry = HolderRegistry::default();
        registry.insert(&mut set, &key(1)).unwrap();

        assert!(!registry.remove(&mut set, &key(2)).unwrap());
        assert!(!registry.remove(&mut set, &key(2)).unwrap());
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(&mut set, &key(1)).unwrap());
        assert!(!registry.remove(&mut set, &key(1)).unwrap());
        assert!(registry.is_empty());
    }

    #[test]
    fn removal_needs_the_last_holder_loaded() {
        let mut set = holders(3);
        let mut registry = HolderRegistry::default();
        for n in 1..=3 {
            registry.insert(&mut set, &key(n)).unwrap();
        }

        let mut partial = HolderSet::default();
        partial.insert(set.get(&key(1)).unwrap().clone());
        let before = registry;
        assert_eq!(
            registry.remove(&mut partial, &key(1)).unwrap_err(),
            error!(ErrorCode::HolderAccountMissing)
        );
        assert_eq!(registry, before);
    }

    #[test]
    fn upsert_applies_eligibility() {
        let mut set = holders(4);
        let mut registry = HolderRegistry::default();

        assert!(registry.upsert(&mut set, &key(1), 500, 100, false).unwrap());
        assert!(!registry.upsert(&mut set, &key(2), 99, 100, false).unwrap());
        assert!(!registry.upsert(&mut set, &key(3), 500, 100, true).unwrap());
        assert_eq!(registry.len(), 1);

        // dropping below the minimum removes the holder
        assert!(!registry.upsert(&mut set, &key(1), 50, 100, false).unwrap());
        assert!(registry.is_empty());

        // a zero minimum still never tracks empty balances
        assert!(!registry.upsert(&mut set, &key(4), 0, 0, false).unwrap());
        assert!(registry.is_empty());
    }

    #[test]
    fn verify_detects_dangling_index() {
        let mut set = holders(2);
        let mut registry = HolderRegistry::default();
        registry.insert(&mut set, &key(1)).unwrap();
        registry.insert(&mut set, &key(2)).unwrap();
        set.get_mut(&key(2)).unwrap().registry_index = Some(7);

        assert_eq!(registry.verify(&set).unwrap_err(), error!(ErrorCode::RegistryCorrupted));
        assert_eq!(
            registry.remove(&mut set, &key(2)).unwrap_err(),
            error!(ErrorCode::RegistryCorrupted)
        );
    }
}
