use soroban_sdk::{Address, Env, Vec};

use crate::msg::{ClaimableResponse, ConfigResponse, TotalsResponse};
use crate::storage::{
    Account, ContractStatus, FeeKind, ReferralTier, Stake, Withdrawal, YieldRound,
};

pub trait VaultTrait {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(
        env: Env,
        admin: Address,
        base_token: Address,
        duration: u64,
        entry_fee_bps: i64,
        farming_fee_bps: i64,
    );

    fn change_status(env: Env, sender: Address, status: ContractStatus);

    fn change_fee(env: Env, sender: Address, fee_kind: FeeKind, bps: i64);

    fn change_duration(env: Env, sender: Address, duration: u64);

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
    );

    fn open_round(env: Env, sender: Address, since_time: u64, stake_snapshot: i128) -> u64;

    #[allow(clippy::too_many_arguments)]
    fn finalize_round(
        env: Env,
        sender: Address,
        round_id: u64,
        token: Option<Address>,
        amount: i128,
        since_time: Option<u64>,
        till_time: u64,
    );

    fn withdraw_profits(env: Env, sender: Address);

    fn rescue_tokens(env: Env, sender: Address, token: Address, amount: i128);

    fn transfer_ownership(env: Env, sender: Address, new_admin: Address);

    fn renounce_ownership(env: Env, sender: Address);

    // ################################################################
    //                             USER
    // ################################################################

    fn deposit(env: Env, sender: Address, referrer_id: u64, amount: i128) -> u64;

    fn submit_withdrawal(env: Env, sender: Address, stake_id: u64) -> u64;

    fn withdraw(env: Env, sender: Address, withdrawal_id: u64);

    fn claim(env: Env, sender: Address, stake_id: u64, round_id: u64);

    fn withdraw_token_profits(env: Env, sender: Address, token: Address);

    // ################################################################
    //                            QUERIES
    // ################################################################

    fn query_config(env: Env) -> ConfigResponse;

    fn query_admin(env: Env) -> Address;

    fn query_totals(env: Env) -> TotalsResponse;

    fn query_stake(env: Env, stake_id: u64) -> Stake;

    fn query_stake_ids(env: Env, owner: Address) -> Vec<u64>;

    fn query_withdrawal(env: Env, withdrawal_id: u64) -> Withdrawal;

    fn query_withdrawal_ids(env: Env, owner: Address) -> Vec<u64>;

    fn query_round(env: Env, round_id: u64) -> YieldRound;

    fn query_pending_rounds(env: Env) -> Vec<u64>;

    fn query_ended_rounds(env: Env) -> Vec<u64>;

    fn query_claimable(env: Env, stake_id: u64, round_id: u64) -> ClaimableResponse;

    fn query_claimed(env: Env, stake_id: u64, round_id: u64) -> bool;

    fn query_account(env: Env, owner: Address) -> Option<Account>;

    fn query_account_address(env: Env, account_id: u64) -> Option<Address>;

    fn query_token_balance(env: Env, token: Address, owner: Address) -> i128;

    fn query_profits(env: Env) -> i128;

    fn query_token_profits(env: Env, token: Address) -> i128;
}
