use harvest::constants::MAX_REFERRAL_LEVELS;
use harvest::error::HarvestResult;
use harvest::get_then_update_id;
use harvest::math::proportion::bps_of;
use harvest::math::safe_math::SafeMath;
use soroban_sdk::{Address, Env, Symbol};

use crate::events::VaultEvents;
use crate::math::rewards::tier_rate_bps;
use crate::storage::{
    get_account, get_account_address, get_referral_balance, maybe_get_account, save_account,
    save_account_address, save_referral_balance, Account, Counters, ReferralConfig,
};

/// Looks up the caller's account, minting one (and its id-to-address index
/// entry) on first contact. The caller persists the returned account once all
/// mutations for the operation are applied.
pub fn get_or_create_account(env: &Env, owner: &Address, counters: &mut Counters) -> Account {
    match maybe_get_account(env, owner) {
        Some(account) => account,
        None => {
            let account_id = get_then_update_id!(counters, accounts);
            save_account_address(env, account_id, owner);
            Account {
                id: account_id,
                referrer: None,
                referred_count: 0,
                last_active_time: 0,
                has_active_stake: false,
            }
        }
    }
}

/// Attempts to link `referee` under the account with id `referrer_id`. Links
/// are best-effort: an unlinkable request downgrades to a plain deposit and
/// leaves a `referral_link_failed` event naming the reason, it never fails
/// the deposit itself.
pub fn try_link(
    env: &Env,
    referee: &Address,
    account: &mut Account,
    referrer_id: u64,
    amount: i128,
    config: &ReferralConfig,
) -> HarvestResult {
    if account.referrer.is_some() {
        VaultEvents::referral_link_failed(
            env,
            referee.clone(),
            referrer_id,
            Symbol::new(env, "already_linked"),
        );
        return Ok(());
    }

    let referrer_addr = match get_account_address(env, referrer_id) {
        Some(referrer_addr) => referrer_addr,
        None => {
            VaultEvents::referral_link_failed(
                env,
                referee.clone(),
                referrer_id,
                Symbol::new(env, "no_account"),
            );
            return Ok(());
        }
    };

    if referrer_addr == *referee {
        VaultEvents::referral_link_failed(
            env,
            referee.clone(),
            referrer_id,
            Symbol::new(env, "self_ref"),
        );
        return Ok(());
    }

    if amount < config.min_deposit {
        VaultEvents::referral_link_failed(
            env,
            referee.clone(),
            referrer_id,
            Symbol::new(env, "below_min"),
        );
        return Ok(());
    }

    account.referrer = Some(referrer_addr.clone());
    increment_referred(env, &referrer_addr)?;
    VaultEvents::referral_linked(env, referee.clone(), referrer_addr);
    Ok(())
}

pub fn increment_referred(env: &Env, upline: &Address) -> HarvestResult {
    let mut account = get_account(env, upline)?;
    account.referred_count = account.referred_count.safe_add(1, env)?;
    save_account(env, upline, &account);
    Ok(())
}

pub fn decrement_referred(env: &Env, upline: &Address) -> HarvestResult {
    let mut account = get_account(env, upline)?;
    account.referred_count = account.referred_count.safe_sub(1, env)?;
    save_account(env, upline, &account);
    Ok(())
}

/// Walks at most two upline levels and credits each eligible referrer its
/// share of `reserve` as a pull-payment balance. A credit counts as activity
/// for the earner. Returns the total credited; the caller routes whatever is
/// left to the protocol accumulator. Shares of ineligible levels never pass
/// through to a deeper level.
pub fn distribute(
    env: &Env,
    claimant: &Address,
    claimant_account: &Account,
    config: &ReferralConfig,
    token: &Address,
    reserve: i128,
    now: u64,
) -> HarvestResult<i128> {
    let mut paid: i128 = 0;
    if reserve == 0 {
        return Ok(paid);
    }

    let mut upline = claimant_account.referrer.clone();
    let mut level: u32 = 0;
    while let Some(referrer_addr) = upline {
        if level >= MAX_REFERRAL_LEVELS || level >= config.level_bps.len() {
            break;
        }

        let mut referrer = get_account(env, &referrer_addr)?;
        let level_share = bps_of(env, reserve, config.level_bps.get(level).unwrap_or(0))?;
        let share = bps_of(
            env,
            level_share,
            tier_rate_bps(&config.tiers, referrer.referred_count),
        )?;

        if is_eligible(&referrer, config, now) && share > 0 {
            let balance = get_referral_balance(env, token, &referrer_addr).safe_add(share, env)?;
            save_referral_balance(env, token, &referrer_addr, balance);
            referrer.last_active_time = now;
            save_account(env, &referrer_addr, &referrer);
            paid = paid.safe_add(share, env)?;
            VaultEvents::referral_paid(
                env,
                referrer_addr.clone(),
                claimant.clone(),
                token.clone(),
                share,
                level + 1,
            );
        }

        upline = referrer.referrer.clone();
        level += 1;
    }

    Ok(paid)
}

/// A referrer must hold an open stake to earn, and when the activity policy
/// is on, must also have interacted within the inactivity window.
fn is_eligible(account: &Account, config: &ReferralConfig, now: u64) -> bool {
    if !account.has_active_stake {
        return false;
    }
    if !config.only_reward_active {
        return true;
    }
    now.saturating_sub(account.last_active_time) <= config.inactivity_window
}
