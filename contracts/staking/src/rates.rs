use soroban_sdk::Env;

use crate::ray::{div_ray, mul_ray, pow_ray, RAY};
use crate::ContractError;

/// 365 days. Leap seconds and leap days are ignored.
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

// ── Rate accumulator ────────────────────────────────────────────────────────

/// Convert a nominal annual rate into a per-second growth factor.
///
/// ```text
/// factor = RAY + annual_rate / SECONDS_PER_YEAR
/// ```
///
/// Compounding `factor` once per second for a year approximates
/// `e^annual_rate`, i.e. continuous compounding at the nominal rate.
///
/// # Arguments
/// * `annual_rate` – fraction of principal gained per year, ray-scaled
///                   (5 % = `5 × 10^25`)
pub fn yearly_rate_to_ray(env: &Env, annual_rate: u128) -> Result<u128, ContractError> {
    let seconds = (SECONDS_PER_YEAR as u128)
        .checked_mul(RAY)
        .ok_or(ContractError::ArithmeticError)?;
    let per_second = div_ray(env, annual_rate, seconds)?;
    RAY.checked_add(per_second)
        .ok_or(ContractError::ArithmeticError)
}

/// Grow a ray-scaled quantity by `rate` compounded over `age` seconds.
///
/// Used for the flexible reward index, where the quantity is itself a ray.
pub fn accrue_ray(env: &Env, value: u128, rate: u128, age: u64) -> Result<u128, ContractError> {
    let growth = pow_ray(env, rate, age)?;
    mul_ray(env, growth, value)
}

/// Grow a token amount by `rate` compounded over `age` seconds.
///
/// Deterministic: identical inputs always give the identical result, which
/// lets the fixed-term reservation be recomputed at settlement instead of
/// stored.
pub fn accrue(env: &Env, principal: i128, rate: u128, age: u64) -> Result<i128, ContractError> {
    let principal = to_unsigned(principal)?;
    to_signed(accrue_ray(env, principal, rate, age)?)
}

/// Growth of `amount` between two index snapshots:
///
/// ```text
/// amount × (current / snapshot) − amount
/// ```
///
/// Returns zero when there is no principal or no prior snapshot.
pub fn index_growth(
    env: &Env,
    amount: i128,
    current: u128,
    snapshot: u128,
) -> Result<i128, ContractError> {
    if amount <= 0 || snapshot == 0 {
        return Ok(0);
    }
    let ratio = div_ray(env, current, snapshot)?;
    let grown = to_signed(mul_ray(env, ratio, to_unsigned(amount)?)?)?;
    Ok(grown.saturating_sub(amount).max(0))
}

/// Principal expressed in index units (`amount / index`), the quantity whose
/// sum across positions tracks the whole flexible pool.
pub fn scaled_amount(env: &Env, amount: i128, index: u128) -> Result<u128, ContractError> {
    if amount <= 0 {
        return Ok(0);
    }
    div_ray(env, to_unsigned(amount)?, index)
}

pub(crate) fn to_unsigned(amount: i128) -> Result<u128, ContractError> {
    u128::try_from(amount).map_err(|_| ContractError::ArithmeticError)
}

pub(crate) fn to_signed(amount: u128) -> Result<i128, ContractError> {
    i128::try_from(amount).map_err(|_| ContractError::ArithmeticError)
}
