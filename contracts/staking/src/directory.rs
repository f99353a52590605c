//! Enumerable set of addresses with an open flexible position.
//!
//! Dense slots `0..count` hold the addresses; a reverse map gives each
//! address its slot so removal is a swap with the last slot.

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::storage::extend_persistent;

const DIR_COUNT: Symbol = symbol_short!("DIR_CNT");

fn slot_key(slot: u32) -> (Symbol, u32) {
    (symbol_short!("DIR_SLOT"), slot)
}

fn position_key(staker: &Address) -> (Symbol, Address) {
    (symbol_short!("DIR_POS"), staker.clone())
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&DIR_COUNT).unwrap_or(0u32)
}

pub fn contains(env: &Env, staker: &Address) -> bool {
    env.storage().persistent().has(&position_key(staker))
}

/// Add `staker` if not already listed. Returns `true` when inserted.
pub fn insert(env: &Env, staker: &Address) -> bool {
    if contains(env, staker) {
        return false;
    }
    let slot = count(env);
    let slot_k = slot_key(slot);
    let pos_k = position_key(staker);

    env.storage().persistent().set(&slot_k, staker);
    env.storage().persistent().set(&pos_k, &slot);
    extend_persistent(env, &slot_k);
    extend_persistent(env, &pos_k);
    env.storage().instance().set(&DIR_COUNT, &(slot + 1));
    true
}

/// Remove `staker`, moving the last entry into its slot. Returns `true`
/// when something was removed.
pub fn remove(env: &Env, staker: &Address) -> bool {
    let pos_k = position_key(staker);
    let slot: u32 = match env.storage().persistent().get(&pos_k) {
        Some(slot) => slot,
        None => return false,
    };
    let last = count(env).saturating_sub(1);

    if slot != last {
        let moved: Option<Address> = env.storage().persistent().get(&slot_key(last));
        if let Some(moved) = moved {
            let slot_k = slot_key(slot);
            let moved_k = position_key(&moved);
            env.storage().persistent().set(&slot_k, &moved);
            env.storage().persistent().set(&moved_k, &slot);
            extend_persistent(env, &slot_k);
            extend_persistent(env, &moved_k);
        }
    }

    env.storage().persistent().remove(&slot_key(last));
    env.storage().persistent().remove(&pos_k);
    env.storage().instance().set(&DIR_COUNT, &last);
    true
}

/// Up to `limit` addresses starting at slot `offset`.
pub fn paginate(env: &Env, offset: u32, limit: u32) -> Vec<Address> {
    let mut page = Vec::new(env);
    let end = offset.saturating_add(limit).min(count(env));
    for slot in offset..end {
        if let Some(staker) = env.storage().persistent().get::<_, Address>(&slot_key(slot)) {
            page.push_back(staker);
        }
    }
    page
}
