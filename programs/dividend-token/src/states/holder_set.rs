use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use super::HolderAccount;

/// Holder records loaded for one instruction, keyed by owner.
///
/// Only the records an instruction was given are visible; asking for any
/// other owner fails with `HolderAccountMissing`.
#[derive(Clone, Debug, Default)]
pub struct HolderSet {
    records: BTreeMap<Pubkey, HolderAccount>,
}

impl HolderSet {
    /// Adds a record. Returns false if its owner is already loaded.
    pub fn insert(&mut self, record: HolderAccount) -> bool {
        if self.records.contains_key(&record.owner) {
            return false;
        }
        self.records.insert(record.owner, record);
        true
    }

    pub fn contains(&self, owner: &Pubkey) -> bool {
        self.records.contains_key(owner)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, owner: &Pubkey) -> Result<&HolderAccount> {
        self.records
            .get(owner)
            .ok_or_else(|| error!(ErrorCode::HolderAccountMissing))
    }

    pub fn get_mut(&mut self, owner: &Pubkey) -> Result<&mut HolderAccount> {
        self.records
            .get_mut(owner)
            .ok_or_else(|| error!(ErrorCode::HolderAccountMissing))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HolderAccount> {
        self.records.values()
    }

    /// Owner of the loaded record registered at `index`, if any.
    pub fn owner_at(&self, index: u32) -> Result<Option<Pubkey>> {
        let mut found = None;
        for record in self.records.values() {
            if record.registry_index == Some(index) {
                require!(found.is_none(), ErrorCode::RegistryCorrupted);
                found = Some(record.owner);
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    #[test]
    fn duplicate_owner_is_ignored() {
        let mut set = HolderSet::default();
        assert!(set.insert(HolderAccount::new(key(1), 250)));
        assert!(!set.insert(HolderAccount::new(key(1), 251)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&key(1)).unwrap().bump, 250);
    }

    #[test]
    fn unknown_owner_is_missing() {
        let set = HolderSet::default();
        assert_eq!(set.get(&key(9)).unwrap_err(), error!(ErrorCode::HolderAccountMissing));
    }

    #[test]
    fn shared_index_is_corruption() {
        let mut set = HolderSet::default();
        for n in 1..=2 {
            let mut record = HolderAccount::new(key(n), 250);
            record.registry_index = Some(0);
            set.insert(record);
        }
        assert_eq!(set.owner_at(0).unwrap_err(), error!(ErrorCode::RegistryCorrupted));
        assert_eq!(set.owner_at(1).unwrap(), None);
    }
}
