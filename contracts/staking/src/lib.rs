#![no_std]

pub mod custody;
pub mod directory;
pub mod events;
pub mod fixed_term;
pub mod flexible;
pub mod rates;
pub mod ray;
pub mod settlement;
pub mod storage;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

use fixed_term::{FixedTermStake, StakeOffer};
use flexible::{FlexiblePosition, FlexibleState};
use settlement::MAX_FEE_PERCENT;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
/// Fixed-term plus flexible principal held by the engine.
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
/// Interest reserved for open fixed-term stakes.
const TOTAL_INTEREST: Symbol = symbol_short!("TOT_INT");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    ArithmeticError = 5,
    OfferNotFound = 6,
    OfferInactive = 7,
    OfferAdminOnly = 8,
    StakeNotFound = 9,
    StakeNotMatured = 10,
    NotStakeOwner = 11,
    NoWithdrawableBalance = 12,
    InsufficientBalance = 13,
    InsufficientAllowance = 14,
    InsufficientRewards = 15,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct MogaStakingContract;

#[contractimpl]
impl MogaStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `admin` – privileged caller for offers, flexible parameters and
    ///             reserve withdrawals.
    /// * `token` – SEP-41 token that is staked and paid out as interest.
    ///
    /// The flexible pool starts with index `RAY`, a 0 % rate and no fee.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        let now = env.ledger().timestamp();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TOKEN, &token);
        flexible::store_state(&env, &FlexibleState::new(now));
        // Totals and id counters read as zero while absent.
        storage::extend_instance(&env);

        events::publish_initialized(&env, admin, token);

        Ok(())
    }

    // ── Stake offers ────────────────────────────────────────────────────────

    /// Publish a fixed-term offer and return its id.
    ///
    /// `annual_rate` is the nominal yearly rate as a ray (5 % = 5e25); it is
    /// stored pre-converted to a per-second growth factor.
    pub fn create_stake_offer(
        env: Env,
        admin: Address,
        annual_rate: u128,
        fee: u32,
        duration: u64,
        admin_only: bool,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        if fee > MAX_FEE_PERCENT || duration == 0 {
            return Err(ContractError::InvalidInput);
        }
        let rate = rates::yearly_rate_to_ray(&env, annual_rate)?;

        let id = fixed_term::next_offer_id(&env);
        let offer = StakeOffer {
            id,
            rate,
            annual_rate,
            fee,
            duration,
            active: true,
            admin_only,
        };
        fixed_term::store_offer(&env, &offer);

        events::publish_offer_created(&env, id, annual_rate, fee, duration, admin_only);

        Ok(id)
    }

    /// Stop accepting new stakes under `offer_id`. Open stakes keep their
    /// terms.
    pub fn discontinue_stake_offer(
        env: Env,
        admin: Address,
        offer_id: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        let mut offer = fixed_term::get_offer(&env, offer_id).ok_or(ContractError::OfferNotFound)?;
        if !offer.active {
            return Err(ContractError::OfferInactive);
        }
        offer.active = false;
        fixed_term::store_offer(&env, &offer);

        events::publish_offer_discontinued(&env, offer_id);

        Ok(())
    }

    pub fn get_stake_offer(env: Env, offer_id: u64) -> Result<StakeOffer, ContractError> {
        fixed_term::get_offer(&env, offer_id).ok_or(ContractError::OfferNotFound)
    }

    pub fn get_all_stake_offer_ids(env: Env) -> Vec<u64> {
        fixed_term::all_offer_ids(&env)
    }

    // ── Fixed-term staking ──────────────────────────────────────────────────

    /// Lock `amount` under `offer_id` and return the new stake id.
    ///
    /// The interest the stake will have earned at maturity is reserved now;
    /// the call fails with `InsufficientRewards` if the free reserve cannot
    /// cover it.
    pub fn stake_fixed_term(
        env: Env,
        staker: Address,
        offer_id: u64,
        amount: i128,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let is_admin = Self::is_admin(&env, &staker)?;
        Self::open_fixed_term(&env, &staker, &staker, offer_id, amount, is_admin)
    }

    /// Admin-funded stake owned by `beneficiary`.
    pub fn stake_fixed_term_for_beneficiary(
        env: Env,
        admin: Address,
        offer_id: u64,
        amount: i128,
        beneficiary: Address,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        Self::open_fixed_term(&env, &admin, &beneficiary, offer_id, amount, true)
    }

    /// [`Self::stake_fixed_term_for_beneficiary`] for a batch of owners, each
    /// receiving `amount`. Any failure aborts the whole batch.
    pub fn stake_fixed_term_for_many(
        env: Env,
        admin: Address,
        offer_id: u64,
        amount: i128,
        beneficiaries: Vec<Address>,
    ) -> Result<Vec<u64>, ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        if beneficiaries.is_empty() {
            return Err(ContractError::InvalidInput);
        }

        let mut ids = Vec::new(&env);
        for beneficiary in beneficiaries.iter() {
            let id = Self::open_fixed_term(&env, &admin, &beneficiary, offer_id, amount, true)?;
            ids.push_back(id);
        }
        Ok(ids)
    }

    /// Settle a matured stake and return the amount paid to its owner.
    ///
    /// Interest grows until now, the offer fee is charged on the interest
    /// only, half the fee is burned and the reservation made at creation is
    /// released in full.
    pub fn unstake_fixed_term(
        env: Env,
        owner: Address,
        stake_id: u64,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();

        let mut stake = fixed_term::get_stake(&env, stake_id).ok_or(ContractError::StakeNotFound)?;
        if stake.owner != owner {
            return Err(ContractError::NotStakeOwner);
        }
        if stake.is_settled() {
            return Err(ContractError::NoWithdrawableBalance);
        }
        let offer = fixed_term::get_offer(&env, stake.offer_id).ok_or(ContractError::OfferNotFound)?;

        let now = env.ledger().timestamp();
        if now < stake.matures_at(&offer) {
            return Err(ContractError::StakeNotMatured);
        }

        // 1. Price the settlement.
        let principal = stake.principal;
        let gross = fixed_term::gross_value(&env, &offer, &stake, now)?;
        let interest = gross.saturating_sub(principal);
        let reserved = fixed_term::reserved_interest(&env, &offer, principal)?;
        let split = settlement::split_fee(interest, offer.fee)?;

        // 2. The payout may only draw on this stake's reservation and the
        //    free reserve.
        let token = Self::token(&env)?;
        let total_staked = Self::get_total_staked(&env);
        let total_interest = Self::get_total_interest(&env);
        let free = settlement::free_reserve(
            custody::balance(&env, &token),
            total_staked,
            total_interest.saturating_sub(reserved),
        );
        settlement::ensure_covered(free, split.outflow())?;

        // 3. Effects before interactions.
        stake.principal = 0;
        fixed_term::store_stake(&env, &stake);
        fixed_term::remove_owned_stake(&env, &owner, stake_id);
        Self::set_total_staked(&env, total_staked.saturating_sub(principal));
        Self::set_total_interest(&env, total_interest.saturating_sub(reserved));

        // 4. Pay out and burn.
        let paid = principal.saturating_add(split.net);
        custody::pay(&env, &token, &owner, paid)?;
        settlement::burn_fee(&env, &token, &owner, interest, &split)?;

        events::publish_withdraw(&env, owner, stake_id, principal, interest, paid);

        Ok(paid)
    }

    /// Gross value (principal + interest) of a stake at the current time.
    /// Settled stakes report zero.
    pub fn rewards(env: Env, stake_id: u64) -> Result<i128, ContractError> {
        let stake = fixed_term::get_stake(&env, stake_id).ok_or(ContractError::StakeNotFound)?;
        let offer = fixed_term::get_offer(&env, stake.offer_id).ok_or(ContractError::OfferNotFound)?;
        fixed_term::gross_value(&env, &offer, &stake, env.ledger().timestamp())
    }

    pub fn get_stake_details(env: Env, stake_id: u64) -> Result<FixedTermStake, ContractError> {
        fixed_term::get_stake(&env, stake_id).ok_or(ContractError::StakeNotFound)
    }

    /// Open fixed-term stake ids owned by `owner`.
    pub fn get_stake_ids_of(env: Env, owner: Address) -> Vec<u64> {
        fixed_term::stake_ids_of(&env, &owner)
    }

    // ── Flexible staking ────────────────────────────────────────────────────

    /// Deposit `amount` into the flexible pool.
    ///
    /// The global index is brought up to date and the staker's growth since
    /// their last touch is banked before the principal changes.
    pub fn stake_flexible(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();
        let mut state = Self::sync_flexible(&env, now)?;
        let mut position = flexible::get_position(&env, &staker);
        flexible::deposit(&env, &mut state, &mut position, amount, now)?;

        let token = Self::token(&env)?;
        custody::collect(&env, &token, &staker, amount)?;

        flexible::store_position(&env, &staker, &position);
        flexible::store_state(&env, &state);
        Self::set_total_staked(&env, Self::get_total_staked(&env).saturating_add(amount));
        directory::insert(&env, &staker);

        events::publish_deposit_flexible(&env, staker.clone(), amount);
        events::publish_flexible_principal_updated(
            &env,
            staker,
            position.principal,
            state.total_principal,
        );

        Ok(())
    }

    /// Fold the staker's unclaimed reward, net of the flexible fee, into
    /// principal. Returns the amount compounded.
    pub fn compound_flexible(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let mut state = Self::sync_flexible(&env, now)?;
        let mut position = flexible::get_position(&env, &staker);
        if position.is_empty() {
            return Err(ContractError::NoWithdrawableBalance);
        }
        let realized = flexible::compound(&env, &mut state, &mut position, now)?;

        let token = Self::token(&env)?;
        let total_staked = Self::get_total_staked(&env);
        let free = settlement::free_reserve(
            custody::balance(&env, &token),
            total_staked,
            Self::get_total_interest(&env),
        );
        settlement::ensure_covered(free, realized.fee.outflow())?;

        flexible::store_position(&env, &staker, &position);
        flexible::store_state(&env, &state);
        Self::set_total_staked(&env, total_staked.saturating_add(realized.fee.net));
        settlement::burn_fee(&env, &token, &staker, realized.interest, &realized.fee)?;

        events::publish_compound_flexible(&env, staker.clone(), realized.interest, realized.fee.net);
        events::publish_flexible_principal_updated(
            &env,
            staker,
            position.principal,
            state.total_principal,
        );
        Self::publish_reserve_release(&env, &token, realized.fee.outflow());

        Ok(realized.fee.net)
    }

    /// Close the staker's flexible position and return the amount paid.
    ///
    /// Principal is returned in full; the fee applies to the reward only.
    pub fn withdraw_flexible(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let mut state = Self::sync_flexible(&env, now)?;
        let mut position = flexible::get_position(&env, &staker);
        let realized = flexible::withdraw(&env, &mut state, &mut position, now)?;

        let token = Self::token(&env)?;
        let total_staked = Self::get_total_staked(&env);
        let free = settlement::free_reserve(
            custody::balance(&env, &token),
            total_staked,
            Self::get_total_interest(&env),
        );
        settlement::ensure_covered(free, realized.fee.outflow())?;

        flexible::store_position(&env, &staker, &position);
        flexible::store_state(&env, &state);
        Self::set_total_staked(&env, total_staked.saturating_sub(realized.principal));
        directory::remove(&env, &staker);

        let paid = realized.principal.saturating_add(realized.fee.net);
        custody::pay(&env, &token, &staker, paid)?;
        settlement::burn_fee(&env, &token, &staker, realized.interest, &realized.fee)?;

        events::publish_withdraw_flexible(
            &env,
            staker.clone(),
            realized.principal,
            realized.interest,
            paid,
        );
        events::publish_flexible_principal_updated(&env, staker, 0, state.total_principal);
        Self::publish_reserve_release(&env, &token, realized.fee.outflow());

        Ok(paid)
    }

    /// Pre-fee reward a compound or withdrawal would realize right now.
    pub fn rewards_flexible(env: Env, staker: Address) -> Result<i128, ContractError> {
        let state = flexible::get_state(&env)?;
        let position = flexible::get_position(&env, &staker);
        flexible::pending_rewards(&env, &state, &position, env.ledger().timestamp())
    }

    pub fn flexible_balance_of(env: Env, staker: Address) -> i128 {
        flexible::get_position(&env, &staker).principal
    }

    pub fn user_reward_index(env: Env, staker: Address) -> u128 {
        flexible::get_position(&env, &staker).reward_index
    }

    pub fn user_unclaimed_rewards(env: Env, staker: Address) -> i128 {
        flexible::get_position(&env, &staker).unclaimed
    }

    pub fn get_flexible_position(env: Env, staker: Address) -> FlexiblePosition {
        flexible::get_position(&env, &staker)
    }

    /// Stored global index, as of the last reconciliation.
    pub fn reward_index(env: Env) -> Result<u128, ContractError> {
        Ok(flexible::get_state(&env)?.reward_index)
    }

    pub fn get_flexible_state(env: Env) -> Result<FlexibleState, ContractError> {
        flexible::get_state(&env)
    }

    /// Per-second growth factor of the flexible pool (ray).
    pub fn flexible_rate(env: Env) -> Result<u128, ContractError> {
        Ok(flexible::get_state(&env)?.rate)
    }

    pub fn flexible_annual_rate(env: Env) -> Result<u128, ContractError> {
        Ok(flexible::get_state(&env)?.annual_rate)
    }

    pub fn flexible_fee(env: Env) -> Result<u32, ContractError> {
        Ok(flexible::get_state(&env)?.fee)
    }

    pub fn get_flexible_stakers_count(env: Env) -> u32 {
        directory::count(&env)
    }

    pub fn get_flexible_stakers(env: Env, offset: u32, limit: u32) -> Vec<Address> {
        directory::paginate(&env, offset, limit)
    }

    // ── Flexible parameters ─────────────────────────────────────────────────

    /// Change the flexible pool's nominal annual rate (ray).
    ///
    /// Accrual up to now is locked in at the old rate before the new one
    /// takes effect.
    pub fn set_flexible_rate(
        env: Env,
        admin: Address,
        annual_rate: u128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        let rate = rates::yearly_rate_to_ray(&env, annual_rate)?;
        let mut state = Self::sync_flexible(&env, env.ledger().timestamp())?;
        state.annual_rate = annual_rate;
        state.rate = rate;
        flexible::store_state(&env, &state);

        events::publish_flexible_rate_set(&env, annual_rate, rate);

        Ok(())
    }

    /// Change the percentage charged on realized flexible rewards.
    pub fn set_flexible_fee(env: Env, admin: Address, fee: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        if fee > MAX_FEE_PERCENT {
            return Err(ContractError::InvalidInput);
        }

        let mut state = Self::sync_flexible(&env, env.ledger().timestamp())?;
        state.fee = fee;
        flexible::store_state(&env, &state);

        events::publish_flexible_fee_set(&env, fee);

        Ok(())
    }

    // ── Reserve ─────────────────────────────────────────────────────────────

    /// Fixed-term and flexible principal held by the engine.
    pub fn total_staked(env: Env) -> i128 {
        Self::get_total_staked(&env)
    }

    /// Interest reserved for open fixed-term stakes.
    pub fn total_interest(env: Env) -> i128 {
        Self::get_total_interest(&env)
    }

    /// Engine balance not backing principal.
    pub fn total_rewards(env: Env) -> Result<i128, ContractError> {
        let token = Self::token(&env)?;
        Ok(custody::balance(&env, &token)
            .saturating_sub(Self::get_total_staked(&env))
            .max(0))
    }

    /// Rewards accrued by the flexible pool as a whole and not yet realized.
    pub fn flexible_reward_liability(env: Env) -> Result<i128, ContractError> {
        let state = flexible::get_state(&env)?;
        flexible::reward_liability(&env, &state, env.ledger().timestamp())
    }

    /// Reserve tokens not committed to principal, fixed-term interest or
    /// accrued flexible rewards.
    pub fn withdrawable_amount(env: Env) -> Result<i128, ContractError> {
        Self::compute_withdrawable(&env)
    }

    /// Return `amount` of uncommitted reserve to the admin.
    pub fn withdraw_rewards(env: Env, admin: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        if amount > Self::compute_withdrawable(&env)? {
            return Err(ContractError::InsufficientRewards);
        }

        let token = Self::token(&env)?;
        custody::pay(&env, &token, &admin, amount)?;

        events::publish_rewards_withdrawn(&env, admin, amount);

        Ok(())
    }

    // ── Rate math ───────────────────────────────────────────────────────────

    /// Per-second growth factor for a nominal annual rate (both rays).
    pub fn yearly_rate_to_ray(env: Env, annual_rate: u128) -> Result<u128, ContractError> {
        rates::yearly_rate_to_ray(&env, annual_rate)
    }

    /// `principal` compounded at the per-second `rate` for `age` seconds.
    pub fn accrue_interest(
        env: Env,
        principal: i128,
        rate: u128,
        age: u64,
    ) -> Result<i128, ContractError> {
        if principal < 0 {
            return Err(ContractError::InvalidInput);
        }
        rates::accrue(&env, principal, rate, age)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        Self::token(&env)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        storage::extend_instance(env);
        Ok(())
    }

    fn is_admin(env: &Env, caller: &Address) -> Result<bool, ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        Ok(*caller == admin)
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !Self::is_admin(env, caller)? {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn get_total_staked(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    fn set_total_staked(env: &Env, value: i128) {
        env.storage().instance().set(&TOTAL_STAKED, &value);
    }

    fn get_total_interest(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_INTEREST).unwrap_or(0)
    }

    fn set_total_interest(env: &Env, value: i128) {
        env.storage().instance().set(&TOTAL_INTEREST, &value);
    }

    /// Load the flexible state and bring its index up to `now`.
    ///
    /// The caller persists the returned state once its own mutation is done.
    fn sync_flexible(env: &Env, now: u64) -> Result<FlexibleState, ContractError> {
        let mut state = flexible::get_state(env)?;
        if flexible::reconcile_global(env, &mut state, now)? {
            events::publish_reward_index_updated(env, state.reward_index);
        }
        Ok(state)
    }

    /// Shared path for every way of opening a fixed-term stake.
    fn open_fixed_term(
        env: &Env,
        payer: &Address,
        owner: &Address,
        offer_id: u64,
        amount: i128,
        privileged: bool,
    ) -> Result<u64, ContractError> {
        if amount <= 0 || *owner == env.current_contract_address() {
            return Err(ContractError::InvalidInput);
        }

        let offer = fixed_term::get_offer(env, offer_id).ok_or(ContractError::OfferNotFound)?;
        if !offer.active {
            return Err(ContractError::OfferInactive);
        }
        if offer.admin_only && !privileged {
            return Err(ContractError::OfferAdminOnly);
        }

        // 1. Reserve the full-term interest against the free reserve.
        let reserved = fixed_term::reserved_interest(env, &offer, amount)?;
        let token = Self::token(env)?;
        let total_staked = Self::get_total_staked(env);
        let total_interest = Self::get_total_interest(env);
        let free = settlement::free_reserve(
            custody::balance(env, &token),
            total_staked,
            total_interest,
        );
        settlement::ensure_covered(free, reserved)?;

        // 2. Pull the principal from the payer.
        custody::collect(env, &token, payer, amount)?;

        // 3. Record the stake.
        let id = fixed_term::next_stake_id(env);
        let stake = FixedTermStake {
            id,
            offer_id,
            principal: amount,
            created_at: env.ledger().timestamp(),
            owner: owner.clone(),
        };
        fixed_term::store_stake(env, &stake);
        fixed_term::add_owned_stake(env, owner, id);
        fixed_term::keep_until_maturity(env, &offer, &stake);
        Self::set_total_staked(env, total_staked.saturating_add(amount));
        Self::set_total_interest(env, total_interest.saturating_add(reserved));

        events::publish_deposit(env, owner.clone(), payer.clone(), amount, id, reserved);

        Ok(id)
    }

    fn compute_withdrawable(env: &Env) -> Result<i128, ContractError> {
        let token = Self::token(env)?;
        let state = flexible::get_state(env)?;
        let liability = flexible::reward_liability(env, &state, env.ledger().timestamp())?;
        let free = settlement::free_reserve(
            custody::balance(env, &token),
            Self::get_total_staked(env),
            Self::get_total_interest(env),
        );
        Ok(free.saturating_sub(liability).max(0))
    }

    fn publish_reserve_release(env: &Env, token: &Address, released: i128) {
        let total_rewards = custody::balance(env, token)
            .saturating_sub(Self::get_total_staked(env))
            .max(0);
        events::publish_reserved_rewards_updated(env, released, total_rewards);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_fixed_term;
