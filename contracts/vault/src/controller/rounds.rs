use harvest::error::{ErrorCode, HarvestResult};
use harvest::math::safe_math::SafeMath;
use harvest::{get_then_update_id, validate};
use soroban_sdk::{log, Address, Env};

use crate::controller::referral;
use crate::events::VaultEvents;
use crate::math::rewards;
use crate::storage::{
    get_account, get_config, get_counters, get_referral_balance, get_round, get_stake,
    get_token_profit, is_claimed, maybe_get_account, save_account, save_counters,
    save_referral_balance, save_round, save_token_profit, set_claimed, utils, YieldRound,
};

/// Opens a pending yield round against an explicit share snapshot. The
/// snapshot is passed in rather than read from totals so the admin can open a
/// round retroactively for the share base that was staked at `since_time`.
pub fn open_round(env: &Env, since_time: u64, stake_snapshot: i128) -> HarvestResult<u64> {
    validate!(
        env,
        since_time != 0,
        ErrorCode::ZeroValue,
        "Vault: Open round: start time cannot be zero"
    )?;
    validate!(
        env,
        stake_snapshot > 0,
        ErrorCode::ZeroValue,
        "Vault: Open round: stake snapshot must be positive"
    )?;

    let mut counters = get_counters(env);
    let round_id = get_then_update_id!(counters, rounds);
    save_counters(env, &counters);

    let round = YieldRound {
        id: round_id,
        since_time,
        till_time: 0,
        reward_amount: 0,
        reward_token: None,
        stake_snapshot,
        rate_per_unit: 0,
    };
    save_round(env, &round);

    VaultEvents::round_opened(env, round_id, since_time, stake_snapshot);
    Ok(round_id)
}

/// Amends or finalizes a pending round. `till_time == 0` only rewrites the
/// start time (when one is given) and keeps the round pending. A nonzero
/// `till_time` locks in the reward: the rate is fixed against the snapshot
/// and the reward tokens move from the admin into the vault.
pub fn finalize_round(
    env: &Env,
    admin: &Address,
    round_id: u64,
    token: Option<Address>,
    amount: i128,
    since_time: Option<u64>,
    till_time: u64,
) -> HarvestResult {
    validate!(
        env,
        round_id != 0,
        ErrorCode::ZeroId,
        "Vault: Finalize round: round id cannot be zero"
    )?;

    let mut round = get_round(env, round_id)?;
    validate!(
        env,
        round.till_time == 0,
        ErrorCode::AlreadyEnded,
        "Vault: Finalize round: round has already ended"
    )?;

    if let Some(new_since) = since_time {
        round.since_time = new_since;
    }

    if till_time == 0 {
        save_round(env, &round);
        VaultEvents::round_amended(env, round_id, round.since_time);
        return Ok(());
    }

    let reward_token = match token {
        Some(reward_token) => reward_token,
        None => {
            log!(env, "Vault: Finalize round: reward token cannot be empty");
            return Err(ErrorCode::InvalidAddress);
        }
    };
    validate!(
        env,
        till_time > round.since_time,
        ErrorCode::InvalidTillTime,
        "Vault: Finalize round: end time must be greater than start time"
    )?;
    validate!(
        env,
        amount > 0,
        ErrorCode::ZeroAmount,
        "Vault: Finalize round: reward amount must be positive"
    )?;
    validate!(
        env,
        utils::token_balance(env, &reward_token, admin) >= amount,
        ErrorCode::InsufficientTokens,
        "Vault: Finalize round: admin does not hold enough reward tokens"
    )?;

    round.reward_token = Some(reward_token.clone());
    round.reward_amount = amount;
    round.till_time = till_time;
    round.rate_per_unit = rewards::rate_per_unit(env, amount, round.stake_snapshot);
    save_round(env, &round);

    utils::transfer_token(
        env,
        &reward_token,
        admin,
        &env.current_contract_address(),
        amount,
    );

    VaultEvents::round_finalized(
        env,
        round_id,
        reward_token,
        amount,
        till_time,
        round.rate_per_unit,
    );
    Ok(())
}

/// Pays a stake its share of a finalized round: farming fee to the protocol,
/// referral reserve through the upline cascade, and the net amount plus any
/// previously accrued commission balance straight to the claimant.
pub fn claim(env: &Env, sender: &Address, stake_id: u64, round_id: u64) -> HarvestResult {
    validate!(
        env,
        stake_id != 0,
        ErrorCode::ZeroId,
        "Vault: Claim: stake id cannot be zero"
    )?;
    validate!(
        env,
        round_id != 0,
        ErrorCode::ZeroId,
        "Vault: Claim: round id cannot be zero"
    )?;

    let stake = get_stake(env, stake_id)?;
    validate!(
        env,
        stake.owner == *sender,
        ErrorCode::NotOwner,
        "Vault: Claim: stake does not belong to caller"
    )?;

    let round = get_round(env, round_id)?;
    validate!(
        env,
        round.till_time != 0,
        ErrorCode::RoundNotEnded,
        "Vault: Claim: round has not ended"
    )?;
    validate!(
        env,
        !is_claimed(env, stake_id, round_id),
        ErrorCode::AlreadyClaimed,
        "Vault: Claim: rewards were already claimed"
    )?;
    validate!(
        env,
        stake.since_time <= round.since_time,
        ErrorCode::StakedAfterRoundStart,
        "Vault: Claim: stake was opened after the round started"
    )?;

    let reward_token = round.reward_token.clone().ok_or(ErrorCode::RoundNotEnded)?;

    set_claimed(env, stake_id, round_id);

    let now = env.ledger().timestamp();
    let config = get_config(env);
    let mut account = get_account(env, sender)?;

    let gross = rewards::gross_reward(env, stake.shares, round.rate_per_unit);
    let (net, protocol_fee, referral_reserve) = rewards::claim_cuts(
        env,
        gross,
        config.farming_fee_bps,
        config.referral.referral_fee_bps,
        account.referrer.is_some(),
    )?;

    let paid = referral::distribute(
        env,
        sender,
        &account,
        &config.referral,
        &reward_token,
        referral_reserve,
        now,
    )?;
    let undistributed = referral_reserve.safe_sub(paid, env)?;

    let token_profit = get_token_profit(env, &reward_token)
        .safe_add(protocol_fee, env)?
        .safe_add(undistributed, env)?;
    save_token_profit(env, &reward_token, token_profit);

    // The claimant's accrued commission balance rides along with the payout.
    let accrued = get_referral_balance(env, &reward_token, sender);
    let payout = net.safe_add(accrued, env)?;
    if accrued != 0 {
        save_referral_balance(env, &reward_token, sender, 0);
    }

    account.last_active_time = now;
    save_account(env, sender, &account);

    utils::transfer_token(
        env,
        &reward_token,
        &env.current_contract_address(),
        sender,
        payout,
    );

    VaultEvents::claimed(env, sender.clone(), round_id, stake_id, reward_token, net);
    Ok(())
}

/// Read-only preview of `claim` for a `(stake, round)` pair. Pending rounds
/// preview as zero.
pub fn claimable(env: &Env, stake_id: u64, round_id: u64) -> HarvestResult<(i128, i128)> {
    validate!(
        env,
        stake_id != 0 && round_id != 0,
        ErrorCode::ZeroId,
        "Vault: Claimable: ids cannot be zero"
    )?;

    let stake = get_stake(env, stake_id)?;
    let round = get_round(env, round_id)?;
    let config = get_config(env);

    let gross = rewards::gross_reward(env, stake.shares, round.rate_per_unit);
    let has_referrer = maybe_get_account(env, &stake.owner)
        .map_or(false, |account| account.referrer.is_some());
    let (net, _, _) = rewards::claim_cuts(
        env,
        gross,
        config.farming_fee_bps,
        config.referral.referral_fee_bps,
        has_referrer,
    )?;
    Ok((gross, net))
}
