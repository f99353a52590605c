#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when the admin publishes a new fixed-term offer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeOfferCreatedEvent {
    pub offer_id: u64,
    pub annual_rate: u128,
    pub fee: u32,
    pub duration: u64,
    pub admin_only: bool,
    pub timestamp: u64,
}

/// Fired when an offer stops accepting new stakes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeOfferDiscontinuedEvent {
    pub offer_id: u64,
    pub timestamp: u64,
}

/// Fired when a fixed-term stake is opened.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub owner: Address,
    pub payer: Address,
    pub amount: i128,
    pub stake_id: u64,
    pub reserved_interest: i128,
    pub timestamp: u64,
}

/// Fired when a matured fixed-term stake is settled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub principal: i128,
    pub interest: i128,
    pub paid: i128,
    pub timestamp: u64,
}

/// Fired on every flexible deposit.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositFlexibleEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when unclaimed flexible rewards are folded into principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompoundFlexibleEvent {
    pub staker: Address,
    pub interest: i128,
    pub compounded: i128,
    pub timestamp: u64,
}

/// Fired when a flexible position is closed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawFlexibleEvent {
    pub staker: Address,
    pub principal: i128,
    pub interest: i128,
    pub paid: i128,
    pub timestamp: u64,
}

/// Fired whenever the global flexible reward index advances.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardIndexUpdatedEvent {
    pub reward_index: u128,
    pub timestamp: u64,
}

/// Fired when a staker's flexible principal changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlexiblePrincipalUpdatedEvent {
    pub staker: Address,
    pub principal: i128,
    pub total_principal: i128,
    pub timestamp: u64,
}

/// Fired when flexible rewards leave the reserve.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReservedRewardsUpdatedEvent {
    pub released: i128,
    pub total_rewards: i128,
    pub timestamp: u64,
}

/// Settlement record for the burned half of a realization fee.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensBurnedEvent {
    pub staker: Address,
    pub interest: i128,
    pub fee: i128,
    pub burned: i128,
    pub timestamp: u64,
}

/// Fired when the admin changes the flexible rate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlexibleRateSetEvent {
    pub annual_rate: u128,
    pub rate: u128,
    pub timestamp: u64,
}

/// Fired when the admin changes the flexible fee.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlexibleFeeSetEvent {
    pub fee: u32,
    pub timestamp: u64,
}

/// Fired when the admin takes uncommitted reserve tokens out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsWithdrawnEvent {
    pub admin: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_offer_created(
    env: &Env,
    offer_id: u64,
    annual_rate: u128,
    fee: u32,
    duration: u64,
    admin_only: bool,
) {
    env.events().publish(
        (symbol_short!("OFR_NEW"), offer_id),
        StakeOfferCreatedEvent {
            offer_id,
            annual_rate,
            fee,
            duration,
            admin_only,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_offer_discontinued(env: &Env, offer_id: u64) {
    env.events().publish(
        (symbol_short!("OFR_END"), offer_id),
        StakeOfferDiscontinuedEvent {
            offer_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    owner: Address,
    payer: Address,
    amount: i128,
    stake_id: u64,
    reserved_interest: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), owner.clone()),
        DepositEvent {
            owner,
            payer,
            amount,
            stake_id,
            reserved_interest,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    owner: Address,
    stake_id: u64,
    principal: i128,
    interest: i128,
    paid: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), owner.clone()),
        WithdrawEvent {
            owner,
            stake_id,
            principal,
            interest,
            paid,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit_flexible(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FLX_DEP"), staker.clone()),
        DepositFlexibleEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_compound_flexible(env: &Env, staker: Address, interest: i128, compounded: i128) {
    env.events().publish(
        (symbol_short!("FLX_CMP"), staker.clone()),
        CompoundFlexibleEvent {
            staker,
            interest,
            compounded,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw_flexible(
    env: &Env,
    staker: Address,
    principal: i128,
    interest: i128,
    paid: i128,
) {
    env.events().publish(
        (symbol_short!("FLX_WDR"), staker.clone()),
        WithdrawFlexibleEvent {
            staker,
            principal,
            interest,
            paid,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_index_updated(env: &Env, reward_index: u128) {
    env.events().publish(
        (symbol_short!("IDX_UPD"),),
        RewardIndexUpdatedEvent {
            reward_index,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_flexible_principal_updated(
    env: &Env,
    staker: Address,
    principal: i128,
    total_principal: i128,
) {
    env.events().publish(
        (symbol_short!("FLX_PRIN"), staker.clone()),
        FlexiblePrincipalUpdatedEvent {
            staker,
            principal,
            total_principal,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reserved_rewards_updated(env: &Env, released: i128, total_rewards: i128) {
    env.events().publish(
        (symbol_short!("RSV_UPD"),),
        ReservedRewardsUpdatedEvent {
            released,
            total_rewards,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tokens_burned(env: &Env, staker: Address, interest: i128, fee: i128, burned: i128) {
    env.events().publish(
        (symbol_short!("BURNED"), staker.clone()),
        TokensBurnedEvent {
            staker,
            interest,
            fee,
            burned,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_flexible_rate_set(env: &Env, annual_rate: u128, rate: u128) {
    env.events().publish(
        (symbol_short!("FLX_RATE"),),
        FlexibleRateSetEvent {
            annual_rate,
            rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_flexible_fee_set(env: &Env, fee: u32) {
    env.events().publish(
        (symbol_short!("FLX_FEE"),),
        FlexibleFeeSetEvent {
            fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_withdrawn(env: &Env, admin: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_OUT"), admin.clone()),
        RewardsWithdrawnEvent {
            admin,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"),),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"),),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"),),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
