//! Fixed-point helpers for the magnified per-share accumulator.
//!
//! Magnified values are `U256` at runtime and stored as four little-endian
//! `u64` limbs inside program state. Signed quantities (the per-holder
//! correction) use two's-complement over the same 256 bits, so they can be
//! combined with unsigned accumulators through wrapping addition.
//!
//! The magnitude is a power of ten (`10^scale_decimals`) so that shares
//! which divide evenly in minor units come out exact.

use anchor_lang::prelude::*;
use ruint::aliases::U256;
use crate::errors::ErrorCode;

/// A 256-bit value in its serialized limb form.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WideUint {
    pub limbs: [u64; 4],
}

impl WideUint {
    pub fn get(&self) -> U256 {
        U256::from_limbs(self.limbs)
    }

    pub fn set(&mut self, value: U256) {
        self.limbs = value.into_limbs();
    }

    pub fn is_zero(&self) -> bool {
        self.limbs == [0; 4]
    }
}

impl From<U256> for WideUint {
    fn from(value: U256) -> Self {
        Self { limbs: value.into_limbs() }
    }
}

/// `10^scale_decimals` as a wide integer.
pub fn magnitude(scale_decimals: u8) -> Result<U256> {
    let factor = 10u128
        .checked_pow(scale_decimals as u32)
        .ok_or(ErrorCode::MathOverflow)?;
    Ok(U256::from(factor))
}

/// `amount * magnitude / supply`, truncating.
pub fn magnified_share(amount: u64, supply: u64, scale_decimals: u8) -> Result<U256> {
    require!(supply > 0, ErrorCode::NoTrackedSupply);
    let magnified = U256::from(amount)
        .checked_mul(magnitude(scale_decimals)?)
        .ok_or(ErrorCode::MathOverflow)?;
    Ok(magnified / U256::from(supply))
}

/// `per_share * balance`, failing instead of wrapping.
pub fn magnify(per_share: U256, balance: u64) -> Result<U256> {
    per_share
        .checked_mul(U256::from(balance))
        .ok_or_else(|| error!(ErrorCode::MathOverflow))
}

/// Two's-complement sign bit.
pub fn is_negative(value: U256) -> bool {
    value.bit(255)
}

/// Reduces a magnified amount back to minor units.
/// Negative inputs (rounding artefacts of the signed correction) clamp to zero.
pub fn demagnify(value: U256, scale_decimals: u8) -> Result<u64> {
    if is_negative(value) {
        return Ok(0);
    }
    let units = value / magnitude(scale_decimals)?;
    u64::try_from(units).map_err(|_| error!(ErrorCode::MathOverflow))
}
