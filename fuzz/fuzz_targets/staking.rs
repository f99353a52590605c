#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use moga_staking::{MogaStakingContract, MogaStakingContractClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

const TOKEN: i128 = 10_000_000;
const RESERVE: i128 = 1_000_000 * TOKEN;
const PERCENT: u128 = 10_000_000_000_000_000_000_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    StakeFlexible { amount: u32 },
    CompoundFlexible,
    WithdrawFlexible,
    StakeFixedTerm { amount: u32 },
    UnstakeFixedTerm { stake_id: u8 },
    SetFlexibleRate { percent: u8 },
    SetFlexibleFee { fee: u8 },
    AdvanceTime { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(MogaStakingContract, ());
    let client = MogaStakingContractClient::new(&env, &contract_id);

    client.initialize(&admin, &token);
    StellarAssetClient::new(&env, &token).mint(&contract_id, &RESERVE);
    let offer = client.create_stake_offer(&admin, &(5 * PERCENT), &10, &86_400, &false);

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&user, &(1_000_000 * TOKEN));
        TokenClient::new(&env, &token).approve(
            &user,
            &contract_id,
            &(1_000_000 * TOKEN),
            &(env.ledger().sequence() + 10_000),
        );
        users.push(user);
    }

    let mut now = 0u64;
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::StakeFlexible { amount } => {
                let _ = client.try_stake_flexible(caller, &(amount as i128));
            }
            FuzzAction::CompoundFlexible => {
                let _ = client.try_compound_flexible(caller);
            }
            FuzzAction::WithdrawFlexible => {
                let _ = client.try_withdraw_flexible(caller);
            }
            FuzzAction::StakeFixedTerm { amount } => {
                let _ = client.try_stake_fixed_term(caller, &offer, &(amount as i128));
            }
            FuzzAction::UnstakeFixedTerm { stake_id } => {
                let _ = client.try_unstake_fixed_term(caller, &(stake_id as u64));
            }
            FuzzAction::SetFlexibleRate { percent } => {
                let _ = client.try_set_flexible_rate(&admin, &((percent % 101) as u128 * PERCENT));
            }
            FuzzAction::SetFlexibleFee { fee } => {
                let _ = client.try_set_flexible_fee(&admin, &(fee as u32));
            }
            FuzzAction::AdvanceTime { seconds } => {
                now = now.saturating_add(seconds as u64);
                env.ledger().set_timestamp(now);
            }
        }

        // Principal and reserved fixed-term interest stay fully backed.
        let held = TokenClient::new(&env, &token).balance(&contract_id);
        assert!(client.total_interest() >= 0);
        assert!(held >= client.total_staked() + client.total_interest());
    }
});
