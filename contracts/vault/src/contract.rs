use harvest::constants::{
    BPS_DENOMINATOR, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, MAX_REFERRAL_LEVELS,
};
use harvest::error::ErrorCode;
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, Address, BytesN, Env, Vec,
};

use crate::controller;
use crate::events::VaultEvents;
use crate::msg::{ClaimableResponse, ConfigResponse, TotalsResponse};
use crate::storage::{
    default_referral_config, get_account_address, get_base_profit, get_config, get_counters,
    get_owned_stakes, get_pending_withdrawals, get_referral_balance, get_round, get_stake,
    get_token_profit, get_totals, get_withdrawal, is_claimed, maybe_get_account, save_base_profit,
    save_config, save_counters, save_totals, utils, Account, Config, ContractStatus, Counters,
    FeeKind, ReferralTier, Stake, Totals, Withdrawal, YieldRound,
};
use crate::vault::VaultTrait;

contractmeta!(
    key = "Description",
    val = "Principal staking vault with timelocked withdrawals and referral yield sharing"
);

#[contract]
pub struct Vault;

#[contractimpl]
impl VaultTrait for Vault {
    fn initialize(
        env: Env,
        admin: Address,
        base_token: Address,
        duration: u64,
        entry_fee_bps: i64,
        farming_fee_bps: i64,
    ) {
        if utils::is_initialized(&env) {
            log!(
                &env,
                "Vault: Initialize: initializing contract twice is not allowed"
            );
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }
        if duration == 0 {
            log!(&env, "Vault: Initialize: withdrawal duration cannot be zero");
            panic_with_error!(&env, ErrorCode::ZeroValue);
        }
        if !(0..=BPS_DENOMINATOR).contains(&entry_fee_bps)
            || !(0..=BPS_DENOMINATOR).contains(&farming_fee_bps)
        {
            log!(&env, "Vault: Initialize: fees must be between 0 and 10000 bps");
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        let referral = default_referral_config(&env);
        if farming_fee_bps + referral.referral_fee_bps > BPS_DENOMINATOR {
            log!(
                &env,
                "Vault: Initialize: farming and referral fees exceed 10000 bps"
            );
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        utils::set_initialized(&env);
        utils::save_admin(&env, &admin);

        let config = Config {
            base_token: base_token.clone(),
            status: ContractStatus::Inactive,
            duration,
            entry_fee_bps,
            farming_fee_bps,
            referral,
        };
        save_config(&env, &config);
        save_counters(
            &env,
            &Counters {
                stakes: 1,
                withdrawals: 1,
                rounds: 1,
                accounts: 1,
            },
        );
        save_totals(
            &env,
            &Totals {
                total_shares: 0,
                total_staked: 0,
            },
        );
        save_base_profit(&env, 0);

        VaultEvents::initialize(&env, admin, base_token);
    }

    fn change_status(env: Env, sender: Address, status: ContractStatus) {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let mut config = get_config(&env);
        config.status = status;
        save_config(&env, &config);

        VaultEvents::status_changed(&env, status);
    }

    fn change_fee(env: Env, sender: Address, fee_kind: FeeKind, bps: i64) {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if !(0..=BPS_DENOMINATOR).contains(&bps) {
            log!(&env, "Vault: Change fee: fee must be between 0 and 10000 bps");
            panic_with_error!(&env, ErrorCode::InvalidFee);
        }

        let mut config = get_config(&env);
        match fee_kind {
            FeeKind::Entry => config.entry_fee_bps = bps,
            FeeKind::Farming => {
                if bps + config.referral.referral_fee_bps > BPS_DENOMINATOR {
                    log!(
                        &env,
                        "Vault: Change fee: farming and referral fees exceed 10000 bps"
                    );
                    panic_with_error!(&env, ErrorCode::InvalidFee);
                }
                config.farming_fee_bps = bps;
            }
            FeeKind::Referral => {
                log!(
                    &env,
                    "Vault: Change fee: referral fee is managed in the referral config"
                );
                panic_with_error!(&env, ErrorCode::InvalidFee);
            }
        }
        save_config(&env, &config);

        VaultEvents::fee_changed(&env, fee_kind, bps);
    }

    fn change_duration(env: Env, sender: Address, duration: u64) {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if duration == 0 {
            log!(&env, "Vault: Change duration: duration cannot be zero");
            panic_with_error!(&env, ErrorCode::ZeroValue);
        }

        let mut config = get_config(&env);
        config.duration = duration;
        save_config(&env, &config);

        VaultEvents::duration_changed(&env, duration);
    }

    #[allow(clippy::too_many_arguments)]
    fn update_referral_config(
        env: Env,
        sender: Address,
        referral_fee_bps: Option<i64>,
        min_deposit: Option<i128>,
        level_bps: Option<Vec<i64>>,
        tiers: Option<Vec<ReferralTier>>,
        only_reward_active: Option<bool>,
        inactivity_window: Option<u64>,
    ) {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let mut config = get_config(&env);
        let mut referral = config.referral.clone();

        if let Some(bps) = referral_fee_bps {
            if !(0..=BPS_DENOMINATOR).contains(&bps)
                || config.farming_fee_bps + bps > BPS_DENOMINATOR
            {
                log!(&env, "Vault: Update referral config: referral fee out of range");
                panic_with_error!(&env, ErrorCode::InvalidReferralConfig);
            }
            referral.referral_fee_bps = bps;
        }
        if let Some(amount) = min_deposit {
            if amount < 0 {
                log!(
                    &env,
                    "Vault: Update referral config: min deposit cannot be negative"
                );
                panic_with_error!(&env, ErrorCode::InvalidReferralConfig);
            }
            referral.min_deposit = amount;
        }
        if let Some(levels) = level_bps {
            if levels.len() > MAX_REFERRAL_LEVELS {
                log!(
                    &env,
                    "Vault: Update referral config: at most {} levels are supported",
                    MAX_REFERRAL_LEVELS
                );
                panic_with_error!(&env, ErrorCode::InvalidReferralConfig);
            }
            let mut total: i64 = 0;
            for level in levels.iter() {
                if !(0..=BPS_DENOMINATOR).contains(&level) {
                    log!(
                        &env,
                        "Vault: Update referral config: level split out of range"
                    );
                    panic_with_error!(&env, ErrorCode::InvalidReferralConfig);
                }
                total += level;
            }
            if total > BPS_DENOMINATOR {
                log!(
                    &env,
                    "Vault: Update referral config: level splits exceed 10000 bps"
                );
                panic_with_error!(&env, ErrorCode::InvalidReferralConfig);
            }
            referral.level_bps = levels;
        }
        if let Some(new_tiers) = tiers {
            let mut previous_min = 0u32;
            let mut first = true;
            for tier in new_tiers.iter() {
                if !(0..=BPS_DENOMINATOR).contains(&tier.rate_bps)
                    || (!first && tier.min_count <= previous_min)
                {
                    log!(
                        &env,
                        "Vault: Update referral config: tiers must ascend with rates in range"
                    );
                    panic_with_error!(&env, ErrorCode::InvalidReferralConfig);
                }
                previous_min = tier.min_count;
                first = false;
            }
            referral.tiers = new_tiers;
        }
        if let Some(flag) = only_reward_active {
            referral.only_reward_active = flag;
        }
        if let Some(window) = inactivity_window {
            if window == 0 {
                log!(
                    &env,
                    "Vault: Update referral config: inactivity window cannot be zero"
                );
                panic_with_error!(&env, ErrorCode::ZeroValue);
            }
            referral.inactivity_window = window;
        }

        config.referral = referral;
        save_config(&env, &config);

        VaultEvents::referral_config_updated(&env);
    }

    fn open_round(env: Env, sender: Address, since_time: u64, stake_snapshot: i128) -> u64 {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::rounds::open_round(&env, since_time, stake_snapshot)
            .unwrap_or_else(|err| panic_with_error!(&env, err))
    }

    #[allow(clippy::too_many_arguments)]
    fn finalize_round(
        env: Env,
        sender: Address,
        round_id: u64,
        token: Option<Address>,
        amount: i128,
        since_time: Option<u64>,
        till_time: u64,
    ) {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::rounds::finalize_round(
            &env, &sender, round_id, token, amount, since_time, till_time,
        )
        .unwrap_or_else(|err| panic_with_error!(&env, err));
    }

    fn withdraw_profits(env: Env, sender: Address) {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::profits::withdraw_profits(&env, &sender)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
    }

    fn rescue_tokens(env: Env, sender: Address, token: Address, amount: i128) {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::profits::rescue_tokens(&env, &sender, &token, amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
    }

    fn transfer_ownership(env: Env, sender: Address, new_admin: Address) {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        utils::save_admin(&env, &new_admin);

        VaultEvents::ownership_transferred(&env, sender, new_admin);
    }

    fn renounce_ownership(env: Env, sender: Address) {
        sender.require_auth();
        utils::is_admin(&env, &sender);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        utils::remove_admin(&env);

        VaultEvents::ownership_renounced(&env, sender);
    }

    fn deposit(env: Env, sender: Address, referrer_id: u64, amount: i128) -> u64 {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::stake::deposit(&env, &sender, referrer_id, amount)
            .unwrap_or_else(|err| panic_with_error!(&env, err))
    }

    fn submit_withdrawal(env: Env, sender: Address, stake_id: u64) -> u64 {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::stake::submit_withdrawal(&env, &sender, stake_id)
            .unwrap_or_else(|err| panic_with_error!(&env, err))
    }

    fn withdraw(env: Env, sender: Address, withdrawal_id: u64) {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::stake::withdraw(&env, &sender, withdrawal_id)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
    }

    fn claim(env: Env, sender: Address, stake_id: u64, round_id: u64) {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::rounds::claim(&env, &sender, stake_id, round_id)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
    }

    fn withdraw_token_profits(env: Env, sender: Address, token: Address) {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let is_admin_caller = utils::maybe_admin(&env).map_or(false, |admin| admin == sender);
        let result = if is_admin_caller {
            controller::profits::withdraw_token_profits_admin(&env, &sender, &token)
        } else {
            controller::profits::withdraw_token_profits_user(&env, &sender, &token)
        };
        result.unwrap_or_else(|err| panic_with_error!(&env, err));
    }

    fn query_config(env: Env) -> ConfigResponse {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        ConfigResponse {
            config: get_config(&env),
        }
    }

    fn query_admin(env: Env) -> Address {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        utils::get_admin(&env)
    }

    fn query_totals(env: Env) -> TotalsResponse {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        TotalsResponse {
            totals: get_totals(&env),
        }
    }

    fn query_stake(env: Env, stake_id: u64) -> Stake {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        get_stake(&env, stake_id).unwrap_or_else(|err| panic_with_error!(&env, err))
    }

    fn query_stake_ids(env: Env, owner: Address) -> Vec<u64> {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        get_owned_stakes(&env, &owner)
    }

    fn query_withdrawal(env: Env, withdrawal_id: u64) -> Withdrawal {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        get_withdrawal(&env, withdrawal_id).unwrap_or_else(|err| panic_with_error!(&env, err))
    }

    fn query_withdrawal_ids(env: Env, owner: Address) -> Vec<u64> {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        get_pending_withdrawals(&env, &owner)
    }

    fn query_round(env: Env, round_id: u64) -> YieldRound {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        get_round(&env, round_id).unwrap_or_else(|err| panic_with_error!(&env, err))
    }

    fn query_pending_rounds(env: Env) -> Vec<u64> {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let counters = get_counters(&env);
        let mut round_ids = Vec::new(&env);
        for round_id in 1..counters.rounds {
            if let Ok(round) = get_round(&env, round_id) {
                if round.till_time == 0 {
                    round_ids.push_back(round_id);
                }
            }
        }
        round_ids
    }

    fn query_ended_rounds(env: Env) -> Vec<u64> {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let counters = get_counters(&env);
        let mut round_ids = Vec::new(&env);
        for round_id in 1..counters.rounds {
            if let Ok(round) = get_round(&env, round_id) {
                if round.till_time != 0 {
                    round_ids.push_back(round_id);
                }
            }
        }
        round_ids
    }

    fn query_claimable(env: Env, stake_id: u64, round_id: u64) -> ClaimableResponse {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let (gross, net) = controller::rounds::claimable(&env, stake_id, round_id)
            .unwrap_or_else(|err| panic_with_error!(&env, err));
        ClaimableResponse { gross, net }
    }

    fn query_claimed(env: Env, stake_id: u64, round_id: u64) -> bool {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        is_claimed(&env, stake_id, round_id)
    }

    fn query_account(env: Env, owner: Address) -> Option<Account> {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        maybe_get_account(&env, &owner)
    }

    fn query_account_address(env: Env, account_id: u64) -> Option<Address> {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        get_account_address(&env, account_id)
    }

    fn query_token_balance(env: Env, token: Address, owner: Address) -> i128 {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        get_referral_balance(&env, &token, &owner)
    }

    fn query_profits(env: Env) -> i128 {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        get_base_profit(&env)
    }

    fn query_token_profits(env: Env, token: Address) -> i128 {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        get_token_profit(&env, &token)
    }
}

#[contractimpl]
impl Vault {
    pub fn update(env: Env, new_wasm_hash: BytesN<32>) {
        let admin = utils::get_admin(&env);
        admin.require_auth();

        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }
}
