use soroban_sdk::{Address, Env};

use crate::{custody, events, ContractError};

/// Upper bound for any fee percentage.
pub const MAX_FEE_PERCENT: u32 = 100;

/// How realized interest is divided at settlement.
///
/// ```text
/// fee      = interest × fee% / 100
/// burn     = fee / 2
/// retained = fee − burn      (stays in the reward reserve)
/// net      = interest − fee  (goes to the staker)
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeeSplit {
    pub fee: i128,
    pub burn: i128,
    pub retained: i128,
    pub net: i128,
}

impl FeeSplit {
    /// Tokens that leave the reserve beyond principal: the staker's net
    /// share plus the burned half of the fee.
    pub fn outflow(&self) -> i128 {
        self.net.saturating_add(self.burn)
    }
}

/// Divide `interest` by `fee_percent`. Integer division truncates; zero or
/// negative interest is never charged.
pub fn split_fee(interest: i128, fee_percent: u32) -> Result<FeeSplit, ContractError> {
    if fee_percent > MAX_FEE_PERCENT {
        return Err(ContractError::InvalidInput);
    }
    if interest <= 0 {
        return Ok(FeeSplit::default());
    }
    let fee = interest
        .checked_mul(fee_percent as i128)
        .ok_or(ContractError::ArithmeticError)?
        / 100;
    let burn = fee / 2;
    Ok(FeeSplit {
        fee,
        burn,
        retained: fee - burn,
        net: interest - fee,
    })
}

/// Reserve tokens not backing principal or committed interest.
///
/// ```text
/// free = balance − total_staked − total_interest
/// ```
pub fn free_reserve(balance: i128, total_staked: i128, total_interest: i128) -> i128 {
    balance
        .saturating_sub(total_staked)
        .saturating_sub(total_interest)
}

/// Guard: `outflow` must be payable from the free reserve.
pub fn ensure_covered(free: i128, outflow: i128) -> Result<(), ContractError> {
    if outflow > free {
        return Err(ContractError::InsufficientRewards);
    }
    Ok(())
}

/// Burn the burn share of `split` and record the settlement.
pub fn burn_fee(
    env: &Env,
    token: &Address,
    staker: &Address,
    interest: i128,
    split: &FeeSplit,
) -> Result<(), ContractError> {
    if split.burn > 0 {
        custody::burn(env, token, split.burn)?;
    }
    if split.fee > 0 {
        events::publish_tokens_burned(env, staker.clone(), interest, split.fee, split.burn);
    }
    Ok(())
}
