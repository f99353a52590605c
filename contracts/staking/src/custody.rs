//! Token movements through the SEP-41 client.
//!
//! Shortfalls are detected up front and returned as `InsufficientBalance` or
//! `InsufficientAllowance` instead of letting the token contract trap.

use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Tokens held by the engine.
pub fn balance(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}

/// Pull `amount` from `from` into the engine using its allowance.
pub fn collect(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    let engine = env.current_contract_address();

    if client.balance(from) < amount {
        return Err(ContractError::InsufficientBalance);
    }
    if client.allowance(from, &engine) < amount {
        return Err(ContractError::InsufficientAllowance);
    }

    client.transfer_from(&engine, from, &engine, &amount);
    Ok(())
}

/// Send `amount` from the engine to `to`.
pub fn pay(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Ok(());
    }
    let client = token::Client::new(env, token);
    let engine = env.current_contract_address();

    if client.balance(&engine) < amount {
        return Err(ContractError::InsufficientBalance);
    }

    client.transfer(&engine, to, &amount);
    Ok(())
}

/// Destroy `amount` of the engine's own tokens.
pub fn burn(env: &Env, token: &Address, amount: i128) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    let engine = env.current_contract_address();

    if client.balance(&engine) < amount {
        return Err(ContractError::InsufficientBalance);
    }

    client.burn(&engine, &amount);
    Ok(())
}
