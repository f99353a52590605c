extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{storage::Persistent as _, Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, Symbol,
};

use crate::events::{
    DepositEvent, StakeOfferCreatedEvent, StakeOfferDiscontinuedEvent, TokensBurnedEvent,
    WithdrawEvent,
};
use crate::test::{
    approve, balance, events_named, fund, only_event, setup, DAY, FIVE_PERCENT, TOKEN, YEAR,
};
use crate::{ContractError, MogaStakingContractClient};

/// 5 % for a year, 10 % fee.
fn yearly_offer(client: &MogaStakingContractClient<'static>, admin: &Address, admin_only: bool) -> u64 {
    client.create_stake_offer(admin, &FIVE_PERCENT, &10, &YEAR, &admin_only)
}

// ── Offers ───────────────────────────────────────────────────────────────────

#[test]
fn test_create_offer_stores_terms() {
    let (env, client, admin, _token) = setup(0);

    let id = yearly_offer(&client, &admin, false);
    assert_eq!(id, 1);

    let offer = client.get_stake_offer(&id);
    assert_eq!(offer.annual_rate, FIVE_PERCENT);
    assert_eq!(offer.rate, 1_000_000_001_585_489_599_188_229_325);
    assert_eq!(offer.fee, 10);
    assert_eq!(offer.duration, YEAR);
    assert!(offer.active);
    assert!(!offer.admin_only);

    let second = client.create_stake_offer(&admin, &FIVE_PERCENT, &0, &(30 * DAY), &true);
    assert_eq!(second, 2);
    assert_eq!(client.get_all_stake_offer_ids(), vec![&env, 1u64, 2u64]);
}

#[test]
fn test_create_offer_validates_input() {
    let (env, client, admin, _token) = setup(0);

    let result = client.try_create_stake_offer(&admin, &FIVE_PERCENT, &101, &YEAR, &false);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    let result = client.try_create_stake_offer(&admin, &FIVE_PERCENT, &10, &0, &false);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    let stranger = Address::generate(&env);
    let result = client.try_create_stake_offer(&stranger, &FIVE_PERCENT, &10, &YEAR, &false);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_unknown_offer() {
    let (env, client, _admin, token) = setup(1_000 * TOKEN);

    let result = client.try_get_stake_offer(&7);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::OfferNotFound),
        _ => unreachable!("Expected OfferNotFound error"),
    }

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);
    let result = client.try_stake_fixed_term(&staker, &7, &(100 * TOKEN));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::OfferNotFound),
        _ => unreachable!("Expected OfferNotFound error"),
    }
}

#[test]
fn test_discontinued_offer_rejects_new_stakes_but_settles_old_ones() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 200 * TOKEN);
    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));

    client.discontinue_stake_offer(&admin, &offer);
    assert!(!client.get_stake_offer(&offer).active);

    let result = client.try_stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::OfferInactive),
        _ => unreachable!("Expected OfferInactive error"),
    }

    let result = client.try_discontinue_stake_offer(&admin, &offer);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::OfferInactive),
        _ => unreachable!("Expected OfferInactive error"),
    }

    env.ledger().set_timestamp(YEAR);
    assert_eq!(client.unstake_fixed_term(&staker, &stake_id), 1_046_143_987);
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

#[test]
fn test_fixed_term_lifecycle_one_year_at_five_percent() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);

    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    assert_eq!(stake_id, 1);
    assert_eq!(balance(&env, &token, &staker), 0);
    assert_eq!(client.total_staked(), 100 * TOKEN);
    // Full-term interest is reserved up front.
    assert_eq!(client.total_interest(), 51_271_096);
    assert_eq!(client.get_stake_ids_of(&staker), vec![&env, 1u64]);

    let stake = client.get_stake_details(&stake_id);
    assert_eq!(stake.owner, staker);
    assert_eq!(stake.principal, 100 * TOKEN);
    assert_eq!(stake.offer_id, offer);
    assert_eq!(stake.created_at, 0);

    env.ledger().set_timestamp(YEAR);
    assert_eq!(client.rewards(&stake_id), 1_051_271_096);

    let paid = client.unstake_fixed_term(&staker, &stake_id);

    // interest 51_271_096, fee 5_127_109, burn 2_563_554
    assert_eq!(paid, 1_046_143_987);
    assert_eq!(balance(&env, &token, &staker), 1_046_143_987);
    assert_eq!(
        balance(&env, &token, &client.address),
        1_100 * TOKEN - 1_046_143_987 - 2_563_554
    );
    assert_eq!(client.total_staked(), 0);
    assert_eq!(client.total_interest(), 0);
    assert_eq!(client.get_stake_ids_of(&staker).len(), 0);

    // Record survives settlement with zero principal.
    let settled = client.get_stake_details(&stake_id);
    assert_eq!(settled.principal, 0);
    assert_eq!(client.rewards(&stake_id), 0);
}

#[test]
fn test_interest_keeps_growing_after_maturity() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = client.create_stake_offer(&admin, &FIVE_PERCENT, &0, &(90 * DAY), &false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);
    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    let reserved = client.total_interest();
    assert_eq!(reserved, 12_405_080);

    env.ledger().set_timestamp(YEAR);
    let paid = client.unstake_fixed_term(&staker, &stake_id);

    assert_eq!(paid, 1_051_271_096);
    // Only the creation-time reservation is released.
    assert_eq!(client.total_interest(), 0);
}

#[test]
fn test_unstake_before_maturity_fails() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);
    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));

    env.ledger().set_timestamp(YEAR - 1);
    let result = client.try_unstake_fixed_term(&staker, &stake_id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::StakeNotMatured),
        _ => unreachable!("Expected StakeNotMatured error"),
    }
    assert_eq!(client.total_staked(), 100 * TOKEN);
}

#[test]
fn test_unstake_by_non_owner_fails() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    let thief = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);
    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));

    env.ledger().set_timestamp(YEAR);
    let result = client.try_unstake_fixed_term(&thief, &stake_id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotStakeOwner),
        _ => unreachable!("Expected NotStakeOwner error"),
    }
}

#[test]
fn test_double_unstake_fails() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);
    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));

    env.ledger().set_timestamp(YEAR);
    client.unstake_fixed_term(&staker, &stake_id);
    let paid_once = balance(&env, &token, &staker);

    let result = client.try_unstake_fixed_term(&staker, &stake_id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoWithdrawableBalance),
        _ => unreachable!("Expected NoWithdrawableBalance error"),
    }
    assert_eq!(balance(&env, &token, &staker), paid_once);
}

#[test]
fn test_unknown_stake() {
    let (env, client, _admin, _token) = setup(0);
    let staker = Address::generate(&env);

    let result = client.try_unstake_fixed_term(&staker, &42);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::StakeNotFound),
        _ => unreachable!("Expected StakeNotFound error"),
    }

    let result = client.try_rewards(&42);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::StakeNotFound),
        _ => unreachable!("Expected StakeNotFound error"),
    }
}

#[test]
fn test_stake_zero_fails() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);

    let result = client.try_stake_fixed_term(&staker, &offer, &0);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

// ── Reserve coverage ─────────────────────────────────────────────────────────

#[test]
fn test_stake_rejected_when_reserve_cannot_cover_interest() {
    let (env, client, admin, token) = setup(5 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);

    // 100 tokens need ~5.13 tokens of interest; the reserve holds 5.
    let result = client.try_stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientRewards),
        _ => unreachable!("Expected InsufficientRewards error"),
    }
    assert_eq!(balance(&env, &token, &staker), 100 * TOKEN);

    // A smaller stake fits.
    client.stake_fixed_term(&staker, &offer, &(50 * TOKEN));
    assert_eq!(client.total_staked(), 50 * TOKEN);
}

#[test]
fn test_reservations_shrink_withdrawable_amount() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);
    client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));

    assert_eq!(client.total_rewards(), 1_000 * TOKEN);
    assert_eq!(client.withdrawable_amount(), 1_000 * TOKEN - 51_271_096);
}

// ── Token pull failures ──────────────────────────────────────────────────────

#[test]
fn test_stake_without_allowance_fails() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&staker, &(100 * TOKEN));

    let result = client.try_stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientAllowance),
        _ => unreachable!("Expected InsufficientAllowance error"),
    }
}

#[test]
fn test_stake_without_balance_fails() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&staker, &(10 * TOKEN));
    approve(&env, &client, &token, &staker, 100 * TOKEN);

    let result = client.try_stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientBalance),
        _ => unreachable!("Expected InsufficientBalance error"),
    }
    assert_eq!(client.total_staked(), 0);
    assert_eq!(client.total_interest(), 0);
}

// ── Admin-only offers and beneficiaries ──────────────────────────────────────

#[test]
fn test_admin_only_offer_rejects_regular_staker() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, true);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);

    let result = client.try_stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::OfferAdminOnly),
        _ => unreachable!("Expected OfferAdminOnly error"),
    }

    // The admin may use it directly.
    fund(&env, &client, &token, &admin, 100 * TOKEN);
    let id = client.stake_fixed_term(&admin, &offer, &(100 * TOKEN));
    assert_eq!(client.get_stake_details(&id).owner, admin);
}

#[test]
fn test_stake_for_beneficiary() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, true);

    let beneficiary = Address::generate(&env);
    fund(&env, &client, &token, &admin, 100 * TOKEN);

    let id = client.stake_fixed_term_for_beneficiary(&admin, &offer, &(100 * TOKEN), &beneficiary);

    assert_eq!(balance(&env, &token, &admin), 0);
    assert_eq!(client.get_stake_details(&id).owner, beneficiary);
    assert_eq!(client.get_stake_ids_of(&beneficiary), vec![&env, id]);
    assert_eq!(client.get_stake_ids_of(&admin).len(), 0);

    env.ledger().set_timestamp(YEAR);

    // The funder does not own the stake.
    let result = client.try_unstake_fixed_term(&admin, &id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotStakeOwner),
        _ => unreachable!("Expected NotStakeOwner error"),
    }

    client.unstake_fixed_term(&beneficiary, &id);
    assert_eq!(balance(&env, &token, &beneficiary), 1_046_143_987);
}

#[test]
fn test_stake_for_beneficiary_requires_admin() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let stranger = Address::generate(&env);
    fund(&env, &client, &token, &stranger, 100 * TOKEN);

    let result =
        client.try_stake_fixed_term_for_beneficiary(&stranger, &offer, &(100 * TOKEN), &stranger);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_stake_for_many_beneficiaries() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, true);

    let a = Address::generate(&env);
    let b = Address::generate(&env);
    let c = Address::generate(&env);
    fund(&env, &client, &token, &admin, 300 * TOKEN);

    let ids = client.stake_fixed_term_for_many(
        &admin,
        &offer,
        &(100 * TOKEN),
        &vec![&env, a.clone(), b.clone(), c.clone()],
    );

    assert_eq!(ids, vec![&env, 1u64, 2u64, 3u64]);
    assert_eq!(client.total_staked(), 300 * TOKEN);
    assert_eq!(client.total_interest(), 3 * 51_271_096);
    assert_eq!(client.get_stake_details(&2).owner, b);
    assert_eq!(client.get_stake_ids_of(&c), vec![&env, 3u64]);
}

#[test]
fn test_stake_for_many_is_all_or_nothing() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, true);

    let a = Address::generate(&env);
    let b = Address::generate(&env);
    // Enough for one stake only.
    fund(&env, &client, &token, &admin, 100 * TOKEN);

    let result =
        client.try_stake_fixed_term_for_many(&admin, &offer, &(100 * TOKEN), &vec![&env, a.clone(), b]);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientBalance),
        _ => unreachable!("Expected InsufficientBalance error"),
    }
    assert_eq!(client.total_staked(), 0);
    assert_eq!(client.get_stake_ids_of(&a).len(), 0);
    assert_eq!(balance(&env, &token, &admin), 100 * TOKEN);
}

#[test]
fn test_stake_for_many_rejects_empty_batch() {
    let (env, client, admin, _token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, true);

    let result = client.try_stake_fixed_term_for_many(&admin, &offer, &TOKEN, &vec![&env]);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_owner_index_tracks_multiple_stakes() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 300 * TOKEN);
    let first = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    let second = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    let third = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    assert_eq!(client.get_stake_ids_of(&staker), vec![&env, first, second, third]);

    env.ledger().set_timestamp(YEAR);
    client.unstake_fixed_term(&staker, &second);
    assert_eq!(client.get_stake_ids_of(&staker), vec![&env, first, third]);
}

#[test]
fn test_stakes_mature_independently() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = client.create_stake_offer(&admin, &FIVE_PERCENT, &0, &(30 * DAY), &false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 200 * TOKEN);
    let early = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));

    env.ledger().set_timestamp(10 * DAY);
    let late = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    assert_eq!(client.get_stake_details(&late).created_at, 10 * DAY);

    env.ledger().set_timestamp(30 * DAY);
    client.unstake_fixed_term(&staker, &early);

    let result = client.try_unstake_fixed_term(&staker, &late);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::StakeNotMatured),
        _ => unreachable!("Expected StakeNotMatured error"),
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

#[test]
fn test_offer_events() {
    let (env, client, admin, _token) = setup(0);
    env.ledger().set_timestamp(7 * DAY);

    let offer = client.create_stake_offer(&admin, &FIVE_PERCENT, &10, &YEAR, &true);
    let created: StakeOfferCreatedEvent =
        only_event(&env, &client.address, symbol_short!("OFR_NEW"));
    assert_eq!(
        created,
        StakeOfferCreatedEvent {
            offer_id: offer,
            annual_rate: FIVE_PERCENT,
            fee: 10,
            duration: YEAR,
            admin_only: true,
            timestamp: 7 * DAY,
        }
    );

    client.discontinue_stake_offer(&admin, &offer);
    let ended: StakeOfferDiscontinuedEvent =
        only_event(&env, &client.address, symbol_short!("OFR_END"));
    assert_eq!(ended.offer_id, offer);
    assert_eq!(ended.timestamp, 7 * DAY);
}

#[test]
fn test_deposit_and_withdraw_events_carry_settlement() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);

    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));
    let deposit: DepositEvent = only_event(&env, &client.address, symbol_short!("DEPOSIT"));
    assert_eq!(
        deposit,
        DepositEvent {
            owner: staker.clone(),
            payer: staker.clone(),
            amount: 100 * TOKEN,
            stake_id,
            reserved_interest: 51_271_096,
            timestamp: 0,
        }
    );

    env.ledger().set_timestamp(YEAR);
    client.unstake_fixed_term(&staker, &stake_id);

    let withdraw: WithdrawEvent = only_event(&env, &client.address, symbol_short!("WITHDRAW"));
    assert_eq!(
        withdraw,
        WithdrawEvent {
            owner: staker.clone(),
            stake_id,
            principal: 100 * TOKEN,
            interest: 51_271_096,
            paid: 1_046_143_987,
            timestamp: YEAR,
        }
    );

    let burned: TokensBurnedEvent = only_event(&env, &client.address, symbol_short!("BURNED"));
    assert_eq!(
        burned,
        TokensBurnedEvent {
            staker,
            interest: 51_271_096,
            fee: 5_127_109,
            burned: 2_563_554,
            timestamp: YEAR,
        }
    );
}

#[test]
fn test_fee_free_settlement_burns_nothing() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = client.create_stake_offer(&admin, &FIVE_PERCENT, &0, &YEAR, &false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);
    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));

    env.ledger().set_timestamp(YEAR);
    client.unstake_fixed_term(&staker, &stake_id);

    let burned = events_named::<TokensBurnedEvent>(&env, &client.address, symbol_short!("BURNED"));
    assert!(burned.is_empty());
    let withdraw: WithdrawEvent = only_event(&env, &client.address, symbol_short!("WITHDRAW"));
    assert_eq!(withdraw.paid, 1_051_271_096);
}

#[test]
fn test_beneficiary_deposit_events_name_payer_and_owner() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, true);

    let a = Address::generate(&env);
    let b = Address::generate(&env);
    fund(&env, &client, &token, &admin, 200 * TOKEN);

    let beneficiaries = vec![&env, a.clone(), b.clone()];
    client.stake_fixed_term_for_many(&admin, &offer, &(100 * TOKEN), &beneficiaries);

    let deposits = events_named::<DepositEvent>(&env, &client.address, symbol_short!("DEPOSIT"));
    assert_eq!(deposits.len(), 2);
    assert_eq!(deposits[0].owner, a);
    assert_eq!(deposits[0].payer, admin);
    assert_eq!(deposits[0].stake_id, 1);
    assert_eq!(deposits[1].owner, b);
    assert_eq!(deposits[1].payer, admin);
    assert_eq!(deposits[1].stake_id, 2);
    assert_eq!(deposits[1].reserved_interest, 51_271_096);
}

// ── Storage lifetime ─────────────────────────────────────────────────────────

fn persistent_ttl(
    env: &Env,
    client: &MogaStakingContractClient<'static>,
    tag: Symbol,
    id: u64,
) -> u32 {
    env.as_contract(&client.address, || env.storage().persistent().get_ttl(&(tag, id)))
}

#[test]
fn test_stake_entries_outlive_lock_period() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);
    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));

    // One year of 5 second ledgers.
    let ledgers_to_maturity = (YEAR / 5) as u32;
    let stake_ttl = persistent_ttl(&env, &client, symbol_short!("FX_STAKE"), stake_id);
    assert!(stake_ttl >= ledgers_to_maturity);
    assert!(persistent_ttl(&env, &client, symbol_short!("OFFER"), offer) >= ledgers_to_maturity);
}

#[test]
fn test_reading_a_stake_extends_its_entry() {
    let (env, client, admin, token) = setup(1_000 * TOKEN);
    let offer = yearly_offer(&client, &admin, false);

    let staker = Address::generate(&env);
    fund(&env, &client, &token, &staker, 100 * TOKEN);
    let stake_id = client.stake_fixed_term(&staker, &offer, &(100 * TOKEN));

    env.ledger().set_sequence_number(1_200_000);
    let before = persistent_ttl(&env, &client, symbol_short!("FX_STAKE"), stake_id);
    client.get_stake_details(&stake_id);
    let after = persistent_ttl(&env, &client, symbol_short!("FX_STAKE"), stake_id);

    assert!(after > before);
}
