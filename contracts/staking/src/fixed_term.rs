use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::rates::accrue;
use crate::storage::{extend_persistent, extend_persistent_for};
use crate::ContractError;

// ── Storage key constants ───────────────────────────────────────────────────

/// Highest offer id handed out so far (ids start at 1).
const OFFER_CTR: Symbol = symbol_short!("OFR_CTR");
/// Highest fixed-term stake id handed out so far (ids start at 1).
const STAKE_CTR: Symbol = symbol_short!("STK_CTR");

// ── Types ───────────────────────────────────────────────────────────────────

/// Terms under which tokens can be locked for a fixed duration.
///
/// Everything except `active` is frozen at creation, so stakes opened under
/// an offer keep their terms even after the offer is discontinued.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeOffer {
    pub id: u64,
    /// Per-second growth factor (ray), derived from `annual_rate`.
    pub rate: u128,
    /// Nominal annual rate the offer was created with (ray).
    pub annual_rate: u128,
    /// Percentage of realized interest charged at settlement.
    pub fee: u32,
    /// Lock-up in seconds.
    pub duration: u64,
    /// `false` once discontinued; never flips back.
    pub active: bool,
    /// Only the admin may open stakes under this offer.
    pub admin_only: bool,
}

/// A single fixed-term lock.
///
/// After settlement the record stays readable with `principal == 0`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixedTermStake {
    pub id: u64,
    pub offer_id: u64,
    pub principal: i128,
    pub created_at: u64,
    pub owner: Address,
}

impl FixedTermStake {
    pub fn is_settled(&self) -> bool {
        self.principal == 0
    }

    pub fn matures_at(&self, offer: &StakeOffer) -> u64 {
        self.created_at.saturating_add(offer.duration)
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn offer_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("OFFER"), id)
}

fn stake_key(id: u64) -> (Symbol, u64) {
    (symbol_short!("FX_STAKE"), id)
}

fn owner_key(owner: &Address) -> (Symbol, Address) {
    (symbol_short!("FX_OWNED"), owner.clone())
}

pub fn store_offer(env: &Env, offer: &StakeOffer) {
    let key = offer_key(offer.id);
    env.storage().persistent().set(&key, offer);
    extend_persistent(env, &key);
}

pub fn get_offer(env: &Env, id: u64) -> Option<StakeOffer> {
    let key = offer_key(id);
    let offer = env.storage().persistent().get(&key);
    if offer.is_some() {
        extend_persistent(env, &key);
    }
    offer
}

/// Allocate and return the next offer id (1-based, monotonically increasing).
pub fn next_offer_id(env: &Env) -> u64 {
    let next = last_offer_id(env).saturating_add(1);
    env.storage().instance().set(&OFFER_CTR, &next);
    next
}

pub fn last_offer_id(env: &Env) -> u64 {
    env.storage().instance().get(&OFFER_CTR).unwrap_or(0u64)
}

/// Every offer id ever created, discontinued ones included.
pub fn all_offer_ids(env: &Env) -> Vec<u64> {
    let mut ids = Vec::new(env);
    for id in 1..=last_offer_id(env) {
        ids.push_back(id);
    }
    ids
}

pub fn store_stake(env: &Env, stake: &FixedTermStake) {
    let key = stake_key(stake.id);
    env.storage().persistent().set(&key, stake);
    extend_persistent(env, &key);
}

pub fn get_stake(env: &Env, id: u64) -> Option<FixedTermStake> {
    let key = stake_key(id);
    let stake = env.storage().persistent().get(&key);
    if stake.is_some() {
        extend_persistent(env, &key);
    }
    stake
}

/// Allocate and return the next stake id (1-based, monotonically increasing).
pub fn next_stake_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&STAKE_CTR).unwrap_or(0u64);
    let next = current.saturating_add(1);
    env.storage().instance().set(&STAKE_CTR, &next);
    next
}

/// Open stake ids held by `owner`, in creation order.
pub fn stake_ids_of(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&owner_key(owner))
        .unwrap_or(Vec::new(env))
}

pub fn add_owned_stake(env: &Env, owner: &Address, id: u64) {
    let key = owner_key(owner);
    let mut ids = stake_ids_of(env, owner);
    ids.push_back(id);
    env.storage().persistent().set(&key, &ids);
    extend_persistent(env, &key);
}

pub fn remove_owned_stake(env: &Env, owner: &Address, id: u64) {
    let key = owner_key(owner);
    let mut ids = stake_ids_of(env, owner);
    if let Some(pos) = ids.first_index_of(id) {
        ids.remove(pos);
    }
    if ids.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &ids);
        extend_persistent(env, &key);
    }
}

/// Keep every entry a fresh stake depends on alive until it can be settled.
pub fn keep_until_maturity(env: &Env, offer: &StakeOffer, stake: &FixedTermStake) {
    extend_persistent_for(env, &stake_key(stake.id), offer.duration);
    extend_persistent_for(env, &offer_key(offer.id), offer.duration);
    extend_persistent_for(env, &owner_key(&stake.owner), offer.duration);
}

// ── Accounting ──────────────────────────────────────────────────────────────

/// Interest committed for a stake of `principal` held for the full duration
/// of `offer`.
///
/// Computed the same way at creation (to reserve) and at settlement (to
/// release), so the liability always nets back to zero.
pub fn reserved_interest(
    env: &Env,
    offer: &StakeOffer,
    principal: i128,
) -> Result<i128, ContractError> {
    let grown = accrue(env, principal, offer.rate, offer.duration)?;
    Ok(grown.saturating_sub(principal))
}

/// Gross value (principal + interest) of `stake` at `now`.
pub fn gross_value(
    env: &Env,
    offer: &StakeOffer,
    stake: &FixedTermStake,
    now: u64,
) -> Result<i128, ContractError> {
    if stake.is_settled() {
        return Ok(0);
    }
    let age = now.saturating_sub(stake.created_at);
    accrue(env, stake.principal, offer.rate, age)
}
