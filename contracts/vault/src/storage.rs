use harvest::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};
use harvest::error::{ErrorCode, HarvestResult};
use soroban_sdk::{contracttype, log, vec, Address, Env, Vec};

pub const SECONDS_PER_DAY: u64 = 86_400;

pub const DEFAULT_REFERRAL_FEE_BPS: i64 = 1_000;

/// Three whole tokens at the 7 decimal places of classic Stellar assets.
/// Admins of vaults holding differently scaled tokens are expected to adjust
/// the threshold through `update_referral_config`.
pub const DEFAULT_MIN_REFERRAL_DEPOSIT: i128 = 30_000_000;

// ################################################################
//                             Config
// ################################################################

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContractStatus {
    Inactive = 0,
    DepositInactive = 1,
    Active = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FeeKind {
    Entry = 0,
    Farming = 1,
    Referral = 2,
}

/// Bonus ladder rung: referrers with at least `min_count` actively staking
/// referees earn `rate_bps` of their level share.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralTier {
    pub min_count: u32,
    pub rate_bps: i64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralConfig {
    /// Share of every gross reward reserved for the upline cascade.
    pub referral_fee_bps: i64,
    /// Smallest deposit that may establish a new referral link.
    pub min_deposit: i128,
    /// Per-level splits of the reserve, index 0 being the direct referrer.
    pub level_bps: Vec<i64>,
    /// Ascending by `min_count`; the highest rung reached wins.
    pub tiers: Vec<ReferralTier>,
    /// When set, commissions additionally require recent referrer activity.
    pub only_reward_active: bool,
    /// How stale `last_active_time` may get before a referrer stops earning.
    pub inactivity_window: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub base_token: Address,
    pub status: ContractStatus,
    /// Time-lock between submitting a withdrawal and releasing it, in seconds.
    pub duration: u64,
    pub entry_fee_bps: i64,
    pub farming_fee_bps: i64,
    pub referral: ReferralConfig,
}

/// Next ids for every entity family. Ids start at 1 so that 0 stays free as
/// the "no referrer" sentinel in `deposit`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Counters {
    pub stakes: u64,
    pub withdrawals: u64,
    pub rounds: u64,
    pub accounts: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Totals {
    /// Sum of shares across open stakes; rounds snapshot this.
    pub total_shares: i128,
    /// Base tokens held for open stakes.
    pub total_staked: i128,
}

// ################################################################
//                     Stakes and Withdrawals
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    pub id: u64,
    pub account_id: u64,
    pub owner: Address,
    pub shares: i128,
    pub principal: i128,
    pub since_time: u64,
    /// 0 while open; closing stamps the submission time.
    pub till_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawal {
    pub id: u64,
    pub owner: Address,
    pub shares: i128,
    pub principal: i128,
    pub unlock_time: u64,
    pub released: bool,
}

// ################################################################
//                          Yield Rounds
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldRound {
    pub id: u64,
    pub since_time: u64,
    /// 0 while pending; finalizing stamps the round's end.
    pub till_time: u64,
    pub reward_amount: i128,
    pub reward_token: Option<Address>,
    /// Total shares captured when the round opened; the rate denominator.
    pub stake_snapshot: i128,
    /// Reward per share, scaled by `PRECISION`. 0 while pending.
    pub rate_per_unit: i128,
}

// ################################################################
//                      Affiliate Accounts
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub id: u64,
    pub referrer: Option<Address>,
    /// Linked referees currently holding at least one open stake.
    pub referred_count: u32,
    pub last_active_time: u64,
    pub has_active_stake: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Admin,
    Initialized,
    Config,
    Counters,
    Totals,
    Stake(u64),
    Withdrawal(u64),
    Round(u64),
    Account(Address),
    AccountAddr(u64),
    OwnedStakes(Address),
    PendingWithdrawals(Address),
    Claimed(u64, u64),
    BaseProfit,
    TokenProfit(Address),
    ReferralBalance(Address, Address),
}

pub fn default_referral_config(env: &Env) -> ReferralConfig {
    ReferralConfig {
        referral_fee_bps: DEFAULT_REFERRAL_FEE_BPS,
        min_deposit: DEFAULT_MIN_REFERRAL_DEPOSIT,
        level_bps: vec![env, 7_000, 3_000],
        tiers: vec![
            env,
            ReferralTier {
                min_count: 0,
                rate_bps: 10_000,
            },
        ],
        only_reward_active: false,
        inactivity_window: SECONDS_PER_DAY,
    }
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().persistent().set(&DataKey::Config, config);
    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .persistent()
        .get(&DataKey::Config)
        .expect("Vault: Config not set");
    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
    config
}

pub fn save_counters(env: &Env, counters: &Counters) {
    env.storage().persistent().set(&DataKey::Counters, counters);
    env.storage().persistent().extend_ttl(
        &DataKey::Counters,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_counters(env: &Env) -> Counters {
    let counters = env
        .storage()
        .persistent()
        .get(&DataKey::Counters)
        .expect("Vault: Counters not set");
    env.storage().persistent().extend_ttl(
        &DataKey::Counters,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
    counters
}

pub fn save_totals(env: &Env, totals: &Totals) {
    env.storage().persistent().set(&DataKey::Totals, totals);
    env.storage().persistent().extend_ttl(
        &DataKey::Totals,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_totals(env: &Env) -> Totals {
    let totals = env
        .storage()
        .persistent()
        .get(&DataKey::Totals)
        .expect("Vault: Totals not set");
    env.storage().persistent().extend_ttl(
        &DataKey::Totals,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
    totals
}

pub fn save_stake(env: &Env, stake: &Stake) {
    let key = DataKey::Stake(stake.id);
    env.storage().persistent().set(&key, stake);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_stake(env: &Env, stake_id: u64) -> HarvestResult<Stake> {
    let key = DataKey::Stake(stake_id);
    let stake = match env.storage().persistent().get(&key) {
        Some(stake) => stake,
        None => {
            log!(env, "Vault: Stake {} not found", stake_id);
            return Err(ErrorCode::StakeNotFound);
        }
    };
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    Ok(stake)
}

pub fn save_withdrawal(env: &Env, withdrawal: &Withdrawal) {
    let key = DataKey::Withdrawal(withdrawal.id);
    env.storage().persistent().set(&key, withdrawal);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_withdrawal(env: &Env, withdrawal_id: u64) -> HarvestResult<Withdrawal> {
    let key = DataKey::Withdrawal(withdrawal_id);
    let withdrawal = match env.storage().persistent().get(&key) {
        Some(withdrawal) => withdrawal,
        None => {
            log!(env, "Vault: Withdrawal {} not found", withdrawal_id);
            return Err(ErrorCode::WithdrawalNotFound);
        }
    };
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    Ok(withdrawal)
}

pub fn save_round(env: &Env, round: &YieldRound) {
    let key = DataKey::Round(round.id);
    env.storage().persistent().set(&key, round);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_round(env: &Env, round_id: u64) -> HarvestResult<YieldRound> {
    let key = DataKey::Round(round_id);
    let round = match env.storage().persistent().get(&key) {
        Some(round) => round,
        None => {
            log!(env, "Vault: Round {} not found", round_id);
            return Err(ErrorCode::RoundNotFound);
        }
    };
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    Ok(round)
}

pub fn save_account(env: &Env, owner: &Address, account: &Account) {
    let key = DataKey::Account(owner.clone());
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn maybe_get_account(env: &Env, owner: &Address) -> Option<Account> {
    let key = DataKey::Account(owner.clone());
    let account: Option<Account> = env.storage().persistent().get(&key);
    if account.is_some() {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    account
}

pub fn get_account(env: &Env, owner: &Address) -> HarvestResult<Account> {
    match maybe_get_account(env, owner) {
        Some(account) => Ok(account),
        None => {
            log!(env, "Vault: Account for {} not found", owner);
            Err(ErrorCode::AccountNotFound)
        }
    }
}

pub fn save_account_address(env: &Env, account_id: u64, owner: &Address) {
    let key = DataKey::AccountAddr(account_id);
    env.storage().persistent().set(&key, owner);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_account_address(env: &Env, account_id: u64) -> Option<Address> {
    let key = DataKey::AccountAddr(account_id);
    let owner: Option<Address> = env.storage().persistent().get(&key);
    if owner.is_some() {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    owner
}

pub fn save_owned_stakes(env: &Env, owner: &Address, stake_ids: &Vec<u64>) {
    let key = DataKey::OwnedStakes(owner.clone());
    env.storage().persistent().set(&key, stake_ids);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_owned_stakes(env: &Env, owner: &Address) -> Vec<u64> {
    let key = DataKey::OwnedStakes(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(stake_ids) => {
            env.storage().persistent().extend_ttl(
                &key,
                PERSISTENT_LIFETIME_THRESHOLD,
                PERSISTENT_BUMP_AMOUNT,
            );
            stake_ids
        }
        None => Vec::new(env),
    }
}

pub fn save_pending_withdrawals(env: &Env, owner: &Address, withdrawal_ids: &Vec<u64>) {
    let key = DataKey::PendingWithdrawals(owner.clone());
    env.storage().persistent().set(&key, withdrawal_ids);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_pending_withdrawals(env: &Env, owner: &Address) -> Vec<u64> {
    let key = DataKey::PendingWithdrawals(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(withdrawal_ids) => {
            env.storage().persistent().extend_ttl(
                &key,
                PERSISTENT_LIFETIME_THRESHOLD,
                PERSISTENT_BUMP_AMOUNT,
            );
            withdrawal_ids
        }
        None => Vec::new(env),
    }
}

// ################################################################
//                       Claims and Profits
// ################################################################

pub fn is_claimed(env: &Env, stake_id: u64, round_id: u64) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Claimed(stake_id, round_id))
        .unwrap_or(false)
}

pub fn set_claimed(env: &Env, stake_id: u64, round_id: u64) {
    let key = DataKey::Claimed(stake_id, round_id);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_base_profit(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::BaseProfit)
        .unwrap_or(0)
}

pub fn save_base_profit(env: &Env, amount: i128) {
    env.storage().persistent().set(&DataKey::BaseProfit, &amount);
    env.storage().persistent().extend_ttl(
        &DataKey::BaseProfit,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_token_profit(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::TokenProfit(token.clone()))
        .unwrap_or(0)
}

pub fn save_token_profit(env: &Env, token: &Address, amount: i128) {
    let key = DataKey::TokenProfit(token.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_referral_balance(env: &Env, token: &Address, owner: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::ReferralBalance(token.clone(), owner.clone()))
        .unwrap_or(0)
}

pub fn save_referral_balance(env: &Env, token: &Address, owner: &Address, amount: i128) {
    let key = DataKey::ReferralBalance(token.clone(), owner.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ################################################################
//                             Utils
// ################################################################

pub mod utils {
    use sep_41_token::TokenClient;
    use soroban_sdk::{log, panic_with_error, Address, Env};

    use super::*;

    pub fn transfer_token(env: &Env, token: &Address, from: &Address, to: &Address, amount: i128) {
        let token_client = TokenClient::new(env, token);
        token_client.transfer(from, to, &amount);
    }

    pub fn token_balance(env: &Env, token: &Address, owner: &Address) -> i128 {
        TokenClient::new(env, token).balance(owner)
    }

    pub fn is_initialized(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Initialized)
            .unwrap_or(false)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    pub fn save_admin(env: &Env, admin: &Address) {
        env.storage().persistent().set(&DataKey::Admin, admin);
        env.storage().persistent().extend_ttl(
            &DataKey::Admin,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }

    pub fn maybe_admin(env: &Env) -> Option<Address> {
        env.storage().persistent().get(&DataKey::Admin)
    }

    pub fn get_admin(env: &Env) -> Address {
        let admin: Address = maybe_admin(env).unwrap_or_else(|| {
            log!(env, "Vault: Admin not set");
            panic_with_error!(env, ErrorCode::AdminNotSet);
        });
        env.storage().persistent().extend_ttl(
            &DataKey::Admin,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
        admin
    }

    pub fn remove_admin(env: &Env) {
        env.storage().persistent().remove(&DataKey::Admin);
    }

    pub fn is_admin(env: &Env, sender: &Address) {
        let admin = get_admin(env);
        if admin != *sender {
            log!(env, "Vault: You are not authorized!");
            panic_with_error!(env, ErrorCode::NotAuthorized);
        }
    }
}
