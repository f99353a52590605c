use soroban_sdk::{Env, IntoVal, Val};

// ~300 days / ~600 days of ledgers at 5s close time.
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

const LEDGER_SECONDS: u64 = 5;

/// Extension target, capped at what the network currently allows.
fn extend_target(env: &Env, wanted: u32) -> u32 {
    wanted.min(env.storage().max_ttl())
}

/// Keep a persistent entry alive after it was written or read.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    let extend_to = extend_target(env, TTL_EXTEND_TO);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD.min(extend_to), extend_to);
}

/// Keep a persistent entry alive for at least `seconds` of ledger time on
/// top of the regular extension window.
pub fn extend_persistent_for<K>(env: &Env, key: &K, seconds: u64)
where
    K: IntoVal<Env, Val>,
{
    let ledgers = u32::try_from(seconds / LEDGER_SECONDS).unwrap_or(u32::MAX);
    let extend_to = extend_target(env, ledgers.saturating_add(TTL_EXTEND_TO));
    env.storage()
        .persistent()
        .extend_ttl(key, extend_to, extend_to);
}

/// Instance storage TTL covers every configuration key and global total.
pub fn extend_instance(env: &Env) {
    let extend_to = extend_target(env, TTL_EXTEND_TO);
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD.min(extend_to), extend_to);
}
