use harvest::error::{ErrorCode, HarvestResult};
use harvest::validate;
use soroban_sdk::{Address, Env};

use crate::events::VaultEvents;
use crate::storage::{
    get_account, get_base_profit, get_config, get_referral_balance, get_token_profit,
    save_account, save_base_profit, save_referral_balance, save_token_profit, utils, FeeKind,
};

/// Admin sweep of the accumulated entry fees, paid in the base token.
pub fn withdraw_profits(env: &Env, admin: &Address) -> HarvestResult {
    let config = get_config(env);
    let amount = get_base_profit(env);
    validate!(
        env,
        amount > 0,
        ErrorCode::InsufficientTokens,
        "Vault: Withdraw profits: nothing to withdraw"
    )?;

    save_base_profit(env, 0);

    utils::transfer_token(
        env,
        &config.base_token,
        &env.current_contract_address(),
        admin,
        amount,
    );

    VaultEvents::profit_withdrawn(
        env,
        admin.clone(),
        FeeKind::Entry,
        config.base_token,
        amount,
    );
    Ok(())
}

/// Admin sweep of the farming fees and undistributed referral remainders
/// accumulated in `token`.
pub fn withdraw_token_profits_admin(env: &Env, admin: &Address, token: &Address) -> HarvestResult {
    let amount = get_token_profit(env, token);
    validate!(
        env,
        amount > 0,
        ErrorCode::InsufficientTokens,
        "Vault: Withdraw token profits: nothing to withdraw"
    )?;

    save_token_profit(env, token, 0);

    utils::transfer_token(env, token, &env.current_contract_address(), admin, amount);

    VaultEvents::profit_withdrawn(env, admin.clone(), FeeKind::Farming, token.clone(), amount);
    Ok(())
}

/// Referrer sweep of the commission balance accrued in `token`. Sweeping
/// counts as activity for the inactivity policy.
pub fn withdraw_token_profits_user(env: &Env, sender: &Address, token: &Address) -> HarvestResult {
    let amount = get_referral_balance(env, token, sender);
    validate!(
        env,
        amount > 0,
        ErrorCode::InsufficientTokens,
        "Vault: Withdraw token profits: nothing to withdraw"
    )?;

    save_referral_balance(env, token, sender, 0);

    let mut account = get_account(env, sender)?;
    account.last_active_time = env.ledger().timestamp();
    save_account(env, sender, &account);

    utils::transfer_token(env, token, &env.current_contract_address(), sender, amount);

    VaultEvents::profit_withdrawn(env, sender.clone(), FeeKind::Referral, token.clone(), amount);
    Ok(())
}

/// Emergency drain of any token balance sitting on the contract. Guarded by
/// the admin, meant for rewards stranded by configuration mistakes.
pub fn rescue_tokens(env: &Env, admin: &Address, token: &Address, amount: i128) -> HarvestResult {
    validate!(
        env,
        amount > 0,
        ErrorCode::ZeroAmount,
        "Vault: Rescue tokens: amount must be positive"
    )?;
    validate!(
        env,
        utils::token_balance(env, token, &env.current_contract_address()) >= amount,
        ErrorCode::InsufficientTokens,
        "Vault: Rescue tokens: amount exceeds contract balance"
    )?;

    utils::transfer_token(env, token, &env.current_contract_address(), admin, amount);
    Ok(())
}
