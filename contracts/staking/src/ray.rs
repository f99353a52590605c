//! 27-decimal fixed-point ("ray") arithmetic.
//!
//! Rays are stored as `u128` but every product is formed in the host's
//! 256-bit integer so that `x * y` never wraps before the scale is divided
//! back out. Each operation rounds half-up exactly once.

use soroban_sdk::{Env, U256};

use crate::ContractError;

/// `1.0` in ray precision.
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;

const HALF_RAY: u128 = RAY / 2;

fn wide(env: &Env, value: u128) -> U256 {
    U256::from_u128(env, value)
}

fn narrow(value: &U256) -> Result<u128, ContractError> {
    value.to_u128().ok_or(ContractError::ArithmeticError)
}

/// `round(x * y / RAY)`.
pub fn mul_ray(env: &Env, x: u128, y: u128) -> Result<u128, ContractError> {
    let product = wide(env, x).mul(&wide(env, y));
    let rounded = product.add(&wide(env, HALF_RAY)).div(&wide(env, RAY));
    narrow(&rounded)
}

/// `round(x * RAY / y)`. Fails with `ArithmeticError` when `y == 0`.
pub fn div_ray(env: &Env, x: u128, y: u128) -> Result<u128, ContractError> {
    if y == 0 {
        return Err(ContractError::ArithmeticError);
    }
    let scaled = wide(env, x).mul(&wide(env, RAY));
    let rounded = scaled.add(&wide(env, y / 2)).div(&wide(env, y));
    narrow(&rounded)
}

/// `x^n` by repeated squaring.
///
/// Each squaring and each accumulation is a rounded [`mul_ray`], so the
/// number of rounding steps is `O(log n)` even for exponents in the billions.
pub fn pow_ray(env: &Env, x: u128, n: u64) -> Result<u128, ContractError> {
    let mut base = x;
    let mut exp = n;
    let mut acc = if exp % 2 != 0 { base } else { RAY };

    exp /= 2;
    while exp != 0 {
        base = mul_ray(env, base, base)?;
        if exp % 2 != 0 {
            acc = mul_ray(env, acc, base)?;
        }
        exp /= 2;
    }

    Ok(acc)
}
