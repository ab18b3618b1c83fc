use harvest::error::{ErrorCode, HarvestResult};
use harvest::math::proportion::bps_of;
use harvest::math::safe_math::SafeMath;
use harvest::{get_then_update_id, validate};
use soroban_sdk::{Address, Env, Vec};

use crate::controller::referral;
use crate::events::VaultEvents;
use crate::storage::{
    get_account, get_base_profit, get_config, get_counters, get_owned_stakes,
    get_pending_withdrawals, get_stake, get_totals, get_withdrawal, save_account,
    save_base_profit, save_counters, save_owned_stakes, save_pending_withdrawals, save_stake,
    save_totals, save_withdrawal, utils, ContractStatus, Stake, Withdrawal,
};

/// Takes the entry fee off `amount` and mints a 1:1 stake for the remainder.
/// A nonzero `referrer_id` additionally asks for a referral link.
pub fn deposit(env: &Env, sender: &Address, referrer_id: u64, amount: i128) -> HarvestResult<u64> {
    let config = get_config(env);
    validate!(
        env,
        config.status == ContractStatus::Active,
        ErrorCode::InvalidActivity,
        "Vault: Deposit: contract is not active"
    )?;
    validate!(
        env,
        amount > 0,
        ErrorCode::ZeroAmount,
        "Vault: Deposit: amount must be positive"
    )?;

    let now = env.ledger().timestamp();
    let entry_fee = bps_of(env, amount, config.entry_fee_bps)?;
    let net_amount = amount.safe_sub(entry_fee, env)?;

    let mut counters = get_counters(env);
    let stake_id = get_then_update_id!(counters, stakes);
    let mut account = referral::get_or_create_account(env, sender, &mut counters);
    save_counters(env, &counters);

    let stake = Stake {
        id: stake_id,
        account_id: account.id,
        owner: sender.clone(),
        shares: net_amount,
        principal: net_amount,
        since_time: now,
        till_time: 0,
    };
    save_stake(env, &stake);

    let mut owned = get_owned_stakes(env, sender);
    owned.push_back(stake_id);
    save_owned_stakes(env, sender, &owned);

    let mut totals = get_totals(env);
    totals.total_shares = totals.total_shares.safe_add(net_amount, env)?;
    totals.total_staked = totals.total_staked.safe_add(net_amount, env)?;
    save_totals(env, &totals);

    save_base_profit(env, get_base_profit(env).safe_add(entry_fee, env)?);

    // Reactivation counts for the already linked upline before any new link
    // is attempted, so a fresh link is never credited twice.
    if !account.has_active_stake {
        if let Some(ref upline) = account.referrer {
            referral::increment_referred(env, upline)?;
        }
        account.has_active_stake = true;
    }
    if referrer_id != 0 {
        referral::try_link(env, sender, &mut account, referrer_id, amount, &config.referral)?;
    }
    account.last_active_time = now;
    save_account(env, sender, &account);

    utils::transfer_token(
        env,
        &config.base_token,
        sender,
        &env.current_contract_address(),
        amount,
    );

    VaultEvents::deposit(env, sender.clone(), stake_id, net_amount);
    Ok(stake_id)
}

/// Closes an open stake and queues its principal behind the configured
/// time-lock. The stake stops earning from here on.
pub fn submit_withdrawal(env: &Env, sender: &Address, stake_id: u64) -> HarvestResult<u64> {
    let config = get_config(env);
    validate!(
        env,
        config.status != ContractStatus::Inactive,
        ErrorCode::InvalidActivity,
        "Vault: Submit withdrawal: contract is inactive"
    )?;
    validate!(
        env,
        stake_id != 0,
        ErrorCode::ZeroId,
        "Vault: Submit withdrawal: stake id cannot be zero"
    )?;

    let mut stake = get_stake(env, stake_id)?;
    validate!(
        env,
        stake.owner == *sender,
        ErrorCode::NotOwner,
        "Vault: Submit withdrawal: stake does not belong to caller"
    )?;
    validate!(
        env,
        stake.till_time == 0,
        ErrorCode::AlreadyClosed,
        "Vault: Submit withdrawal: stake is already closed"
    )?;

    let now = env.ledger().timestamp();
    stake.till_time = now;
    save_stake(env, &stake);

    let mut owned = get_owned_stakes(env, sender);
    remove_id(&mut owned, stake_id);
    save_owned_stakes(env, sender, &owned);

    let mut totals = get_totals(env);
    totals.total_shares = totals.total_shares.safe_sub(stake.shares, env)?;
    totals.total_staked = totals.total_staked.safe_sub(stake.principal, env)?;
    save_totals(env, &totals);

    let mut counters = get_counters(env);
    let withdrawal_id = get_then_update_id!(counters, withdrawals);
    save_counters(env, &counters);

    let withdrawal = Withdrawal {
        id: withdrawal_id,
        owner: sender.clone(),
        shares: stake.shares,
        principal: stake.principal,
        unlock_time: now.safe_add(config.duration, env)?,
        released: false,
    };
    save_withdrawal(env, &withdrawal);

    let mut pending = get_pending_withdrawals(env, sender);
    pending.push_back(withdrawal_id);
    save_pending_withdrawals(env, sender, &pending);

    let mut account = get_account(env, sender)?;
    if owned.is_empty() {
        account.has_active_stake = false;
        if let Some(ref upline) = account.referrer {
            referral::decrement_referred(env, upline)?;
        }
    }
    account.last_active_time = now;
    save_account(env, sender, &account);

    VaultEvents::withdrawal_submitted(
        env,
        sender.clone(),
        withdrawal_id,
        stake_id,
        stake.principal,
    );
    Ok(withdrawal_id)
}

/// Releases a matured withdrawal's principal back to its owner.
pub fn withdraw(env: &Env, sender: &Address, withdrawal_id: u64) -> HarvestResult {
    let config = get_config(env);
    validate!(
        env,
        config.status != ContractStatus::Inactive,
        ErrorCode::InvalidActivity,
        "Vault: Withdraw: contract is inactive"
    )?;
    validate!(
        env,
        withdrawal_id != 0,
        ErrorCode::ZeroId,
        "Vault: Withdraw: withdrawal id cannot be zero"
    )?;

    let mut withdrawal = get_withdrawal(env, withdrawal_id)?;
    validate!(
        env,
        withdrawal.owner == *sender,
        ErrorCode::NotOwner,
        "Vault: Withdraw: withdrawal does not belong to caller"
    )?;
    validate!(
        env,
        !withdrawal.released,
        ErrorCode::AlreadyReleased,
        "Vault: Withdraw: withdrawal was already released"
    )?;

    let now = env.ledger().timestamp();
    validate!(
        env,
        now >= withdrawal.unlock_time,
        ErrorCode::TimelockActive,
        "Vault: Withdraw: timelock has not expired"
    )?;

    withdrawal.released = true;
    save_withdrawal(env, &withdrawal);

    let mut pending = get_pending_withdrawals(env, sender);
    remove_id(&mut pending, withdrawal_id);
    save_pending_withdrawals(env, sender, &pending);

    utils::transfer_token(
        env,
        &config.base_token,
        &env.current_contract_address(),
        sender,
        withdrawal.principal,
    );

    VaultEvents::withdrawn(env, sender.clone(), withdrawal_id, withdrawal.principal);
    Ok(())
}

/// Drops `id` from an id list by swapping in the tail element. Order is not
/// preserved.
fn remove_id(list: &mut Vec<u64>, id: u64) {
    if let Some(index) = list.first_index_of(id) {
        if let Some(last) = list.pop_back() {
            if index < list.len() {
                list.set(index, last);
            }
        }
    }
}
