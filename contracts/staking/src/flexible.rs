//! Flexible pool ledger.
//!
//! One global reward index compounds for every depositor at once; each
//! position only remembers the index it last saw. Touching a position folds
//! `principal × (index / snapshot − 1)` into its unclaimed reward and moves
//! the snapshot forward, so no per-user work is ever needed between touches.
//!
//! Functions here operate on in-memory copies. The caller loads state,
//! reconciles, applies one ledger operation and writes everything back, so a
//! failing call never persists a half-updated index.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::rates::{accrue_ray, index_growth, scaled_amount, to_signed};
use crate::ray::{mul_ray, RAY};
use crate::settlement::{split_fee, FeeSplit};
use crate::storage::extend_persistent;
use crate::ContractError;

const FLEX_STATE: Symbol = symbol_short!("FLX_STATE");

// ── Types ───────────────────────────────────────────────────────────────────

/// Shared accumulator for the flexible pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlexibleState {
    /// Cumulative growth since inception (ray). Never decreases.
    pub reward_index: u128,
    /// Per-second growth factor (ray) applied from `last_index_update`.
    pub rate: u128,
    /// Nominal annual rate `rate` was derived from (ray).
    pub annual_rate: u128,
    /// Percentage of realized rewards charged on compound / withdraw.
    pub fee: u32,
    pub last_index_update: u64,
    pub total_principal: i128,
    /// Σ principal / snapshot over all positions, in index units.
    pub total_scaled: u128,
    /// Σ unclaimed rewards over all positions.
    pub total_unclaimed: i128,
}

impl FlexibleState {
    pub fn new(now: u64) -> Self {
        Self {
            reward_index: RAY,
            rate: RAY,
            annual_rate: 0,
            fee: 0,
            last_index_update: now,
            total_principal: 0,
            total_scaled: 0,
            total_unclaimed: 0,
        }
    }
}

/// A depositor's flexible position. The zero value means "no position".
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FlexiblePosition {
    pub principal: i128,
    /// Global index at the last touch; `0` while uninitialized.
    pub reward_index: u128,
    pub unclaimed: i128,
    pub last_touched: u64,
}

impl FlexiblePosition {
    pub fn is_empty(&self) -> bool {
        self.principal == 0 && self.unclaimed == 0
    }
}

/// What a compound or withdrawal realized.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Realized {
    /// Principal leaving the pool (zero for compound).
    pub principal: i128,
    /// Gross reward realized before fees.
    pub interest: i128,
    pub fee: FeeSplit,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn position_key(user: &Address) -> (Symbol, Address) {
    (symbol_short!("FLX_POS"), user.clone())
}

pub fn get_state(env: &Env) -> Result<FlexibleState, ContractError> {
    env.storage()
        .instance()
        .get(&FLEX_STATE)
        .ok_or(ContractError::NotInitialized)
}

pub fn store_state(env: &Env, state: &FlexibleState) {
    env.storage().instance().set(&FLEX_STATE, state);
}

pub fn get_position(env: &Env, user: &Address) -> FlexiblePosition {
    let key = position_key(user);
    match env.storage().persistent().get(&key) {
        Some(position) => {
            extend_persistent(env, &key);
            position
        }
        None => FlexiblePosition::default(),
    }
}

/// Persist `position`, dropping the entry entirely once it is empty.
pub fn store_position(env: &Env, user: &Address, position: &FlexiblePosition) {
    let key = position_key(user);
    if position.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, position);
        extend_persistent(env, &key);
    }
}

// ── Global index ────────────────────────────────────────────────────────────

/// Index value at `now` without mutating anything.
pub fn projected_index(
    env: &Env,
    state: &FlexibleState,
    now: u64,
) -> Result<u128, ContractError> {
    let elapsed = now.saturating_sub(state.last_index_update);
    if elapsed == 0 || state.total_principal <= 0 {
        return Ok(state.reward_index);
    }
    accrue_ray(env, state.reward_index, state.rate, elapsed)
}

/// Bring the global index up to `now`.
///
/// Returns `true` when the index moved.
pub fn reconcile_global(
    env: &Env,
    state: &mut FlexibleState,
    now: u64,
) -> Result<bool, ContractError> {
    let index = projected_index(env, state, now)?;
    let moved = index != state.reward_index;
    state.reward_index = index;
    state.last_index_update = now;
    Ok(moved)
}

/// Rewards owed to the whole pool at `now` that have not been folded into
/// principal yet.
pub fn reward_liability(
    env: &Env,
    state: &FlexibleState,
    now: u64,
) -> Result<i128, ContractError> {
    let index = projected_index(env, state, now)?;
    let pool_value = to_signed(mul_ray(env, state.total_scaled, index)?)?;
    Ok(pool_value
        .saturating_add(state.total_unclaimed)
        .saturating_sub(state.total_principal)
        .max(0))
}

// ── Position reconciliation ─────────────────────────────────────────────────

fn detach(
    env: &Env,
    state: &mut FlexibleState,
    position: &FlexiblePosition,
) -> Result<(), ContractError> {
    let scaled = scaled_amount(env, position.principal, position.reward_index.max(1))?;
    state.total_scaled = state.total_scaled.saturating_sub(scaled);
    state.total_unclaimed = state.total_unclaimed.saturating_sub(position.unclaimed);
    state.total_principal = state.total_principal.saturating_sub(position.principal);
    Ok(())
}

fn attach(
    env: &Env,
    state: &mut FlexibleState,
    position: &FlexiblePosition,
) -> Result<(), ContractError> {
    let scaled = scaled_amount(env, position.principal, position.reward_index.max(1))?;
    state.total_scaled = state
        .total_scaled
        .checked_add(scaled)
        .ok_or(ContractError::ArithmeticError)?;
    state.total_unclaimed = state
        .total_unclaimed
        .checked_add(position.unclaimed)
        .ok_or(ContractError::ArithmeticError)?;
    state.total_principal = state
        .total_principal
        .checked_add(position.principal)
        .ok_or(ContractError::ArithmeticError)?;
    Ok(())
}

/// Fold growth since the position's snapshot into `unclaimed` and move the
/// snapshot to the current global index. `state` must already be reconciled.
fn touch(
    env: &Env,
    state: &mut FlexibleState,
    position: &mut FlexiblePosition,
    now: u64,
) -> Result<(), ContractError> {
    detach(env, state, position)?;
    let growth = index_growth(
        env,
        position.principal,
        state.reward_index,
        position.reward_index,
    )?;
    position.unclaimed = position
        .unclaimed
        .checked_add(growth)
        .ok_or(ContractError::ArithmeticError)?;
    position.reward_index = state.reward_index;
    position.last_touched = now;
    Ok(())
}

/// Pending (pre-fee) reward of `position` at `now`, read-only.
pub fn pending_rewards(
    env: &Env,
    state: &FlexibleState,
    position: &FlexiblePosition,
    now: u64,
) -> Result<i128, ContractError> {
    let index = projected_index(env, state, now)?;
    let growth = index_growth(env, position.principal, index, position.reward_index)?;
    Ok(position.unclaimed.saturating_add(growth))
}

// ── Ledger operations ───────────────────────────────────────────────────────

/// Add `amount` to the position's principal after settling its growth.
pub fn deposit(
    env: &Env,
    state: &mut FlexibleState,
    position: &mut FlexiblePosition,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    touch(env, state, position, now)?;
    position.principal = position
        .principal
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticError)?;
    attach(env, state, position)
}

/// Convert unclaimed reward, net of fee, into principal.
pub fn compound(
    env: &Env,
    state: &mut FlexibleState,
    position: &mut FlexiblePosition,
    now: u64,
) -> Result<Realized, ContractError> {
    touch(env, state, position, now)?;
    let interest = position.unclaimed;
    let fee = split_fee(interest, state.fee)?;
    position.principal = position
        .principal
        .checked_add(fee.net)
        .ok_or(ContractError::ArithmeticError)?;
    position.unclaimed = 0;
    attach(env, state, position)?;
    Ok(Realized {
        principal: 0,
        interest,
        fee,
    })
}

/// Close the position. Principal is returned fee-free; only the reward
/// portion is charged.
pub fn withdraw(
    env: &Env,
    state: &mut FlexibleState,
    position: &mut FlexiblePosition,
    now: u64,
) -> Result<Realized, ContractError> {
    touch(env, state, position, now)?;
    if position.is_empty() {
        return Err(ContractError::NoWithdrawableBalance);
    }
    let principal = position.principal;
    let interest = position.unclaimed;
    let fee = split_fee(interest, state.fee)?;
    *position = FlexiblePosition::default();
    Ok(Realized {
        principal,
        interest,
        fee,
    })
}
