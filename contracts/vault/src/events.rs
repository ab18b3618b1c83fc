use soroban_sdk::{Address, Env, Symbol};

use crate::storage::{ContractStatus, FeeKind};

pub struct VaultEvents {}

impl VaultEvents {
    /// Emitted when the vault is initialized
    ///
    /// - topics - `["initialized", admin: Address]`
    /// - data - `[base_token: Address]`
    pub fn initialize(env: &Env, admin: Address, base_token: Address) {
        let topics = (Symbol::new(env, "initialized"), admin);
        env.events().publish(topics, base_token);
    }

    /// Emitted when a deposit mints a new stake
    ///
    /// - topics - `["deposit", owner: Address]`
    /// - data - `[stake_id: u64, net_amount: i128]`
    pub fn deposit(env: &Env, owner: Address, stake_id: u64, net_amount: i128) {
        let topics = (Symbol::new(env, "deposit"), owner);
        env.events().publish(topics, (stake_id, net_amount));
    }

    /// Emitted when a deposit establishes a referral link
    ///
    /// - topics - `["referral_linked", referee: Address]`
    /// - data - `[referrer: Address]`
    pub fn referral_linked(env: &Env, referee: Address, referrer: Address) {
        let topics = (Symbol::new(env, "referral_linked"), referee);
        env.events().publish(topics, referrer);
    }

    /// Emitted when a requested referral link is skipped
    ///
    /// - topics - `["referral_link_failed", referee: Address]`
    /// - data - `[referrer_id: u64, reason: Symbol]`
    pub fn referral_link_failed(env: &Env, referee: Address, referrer_id: u64, reason: Symbol) {
        let topics = (Symbol::new(env, "referral_link_failed"), referee);
        env.events().publish(topics, (referrer_id, reason));
    }

    /// Emitted when a stake is closed into the withdrawal queue
    ///
    /// - topics - `["withdrawal_submitted", owner: Address]`
    /// - data - `[withdrawal_id: u64, stake_id: u64, amount: i128]`
    pub fn withdrawal_submitted(
        env: &Env,
        owner: Address,
        withdrawal_id: u64,
        stake_id: u64,
        amount: i128,
    ) {
        let topics = (Symbol::new(env, "withdrawal_submitted"), owner);
        env.events().publish(topics, (withdrawal_id, stake_id, amount));
    }

    /// Emitted when a matured withdrawal releases its principal
    ///
    /// - topics - `["withdrawn", owner: Address]`
    /// - data - `[withdrawal_id: u64, amount: i128]`
    pub fn withdrawn(env: &Env, owner: Address, withdrawal_id: u64, amount: i128) {
        let topics = (Symbol::new(env, "withdrawn"), owner);
        env.events().publish(topics, (withdrawal_id, amount));
    }

    /// Emitted when a yield round opens
    ///
    /// - topics - `["round_opened", round_id: u64]`
    /// - data - `[since_time: u64, stake_snapshot: i128]`
    pub fn round_opened(env: &Env, round_id: u64, since_time: u64, stake_snapshot: i128) {
        let topics = (Symbol::new(env, "round_opened"), round_id);
        env.events().publish(topics, (since_time, stake_snapshot));
    }

    /// Emitted when a pending round's start time is amended
    ///
    /// - topics - `["round_amended", round_id: u64]`
    /// - data - `[since_time: u64]`
    pub fn round_amended(env: &Env, round_id: u64, since_time: u64) {
        let topics = (Symbol::new(env, "round_amended"), round_id);
        env.events().publish(topics, since_time);
    }

    /// Emitted when a round is funded and closed for accrual
    ///
    /// - topics - `["round_finalized", round_id: u64]`
    /// - data - `[token: Address, amount: i128, till_time: u64, rate_per_unit: i128]`
    pub fn round_finalized(
        env: &Env,
        round_id: u64,
        token: Address,
        amount: i128,
        till_time: u64,
        rate_per_unit: i128,
    ) {
        let topics = (Symbol::new(env, "round_finalized"), round_id);
        env.events()
            .publish(topics, (token, amount, till_time, rate_per_unit));
    }

    /// Emitted when a stake claims its share of a finalized round
    ///
    /// - topics - `["claimed", owner: Address]`
    /// - data - `[round_id: u64, stake_id: u64, token: Address, net_amount: i128]`
    pub fn claimed(
        env: &Env,
        owner: Address,
        round_id: u64,
        stake_id: u64,
        token: Address,
        net_amount: i128,
    ) {
        let topics = (Symbol::new(env, "claimed"), owner);
        env.events()
            .publish(topics, (round_id, stake_id, token, net_amount));
    }

    /// Emitted for every upline commission credited during a claim
    ///
    /// - topics - `["referral_paid", referrer: Address]`
    /// - data - `[referee: Address, token: Address, amount: i128, level: u32]`
    pub fn referral_paid(
        env: &Env,
        referrer: Address,
        referee: Address,
        token: Address,
        amount: i128,
        level: u32,
    ) {
        let topics = (Symbol::new(env, "referral_paid"), referrer);
        env.events().publish(topics, (referee, token, amount, level));
    }

    /// Emitted when an accumulated profit or commission balance is swept
    ///
    /// - topics - `["profit_withdrawn", recipient: Address]`
    /// - data - `[fee_kind: FeeKind, token: Address, amount: i128]`
    pub fn profit_withdrawn(
        env: &Env,
        recipient: Address,
        fee_kind: FeeKind,
        token: Address,
        amount: i128,
    ) {
        let topics = (Symbol::new(env, "profit_withdrawn"), recipient);
        env.events().publish(topics, (fee_kind, token, amount));
    }

    /// Emitted when the admin switches the vault's status
    ///
    /// - topics - `["status_changed"]`
    /// - data - `[status: ContractStatus]`
    pub fn status_changed(env: &Env, status: ContractStatus) {
        let topics = (Symbol::new(env, "status_changed"),);
        env.events().publish(topics, status);
    }

    /// Emitted when the admin updates the entry or farming fee
    ///
    /// - topics - `["fee_changed"]`
    /// - data - `[fee_kind: FeeKind, bps: i64]`
    pub fn fee_changed(env: &Env, fee_kind: FeeKind, bps: i64) {
        let topics = (Symbol::new(env, "fee_changed"),);
        env.events().publish(topics, (fee_kind, bps));
    }

    /// Emitted when the admin updates the withdrawal time-lock
    ///
    /// - topics - `["duration_changed"]`
    /// - data - `[duration: u64]`
    pub fn duration_changed(env: &Env, duration: u64) {
        let topics = (Symbol::new(env, "duration_changed"),);
        env.events().publish(topics, duration);
    }

    /// Emitted when the admin reshapes the referral program
    ///
    /// - topics - `["referral_config_updated"]`
    /// - data - `[]`
    pub fn referral_config_updated(env: &Env) {
        let topics = (Symbol::new(env, "referral_config_updated"),);
        env.events().publish(topics, ());
    }

    /// Emitted when admin rights move to a new address
    ///
    /// - topics - `["ownership_transferred"]`
    /// - data - `[old_admin: Address, new_admin: Address]`
    pub fn ownership_transferred(env: &Env, old_admin: Address, new_admin: Address) {
        let topics = (Symbol::new(env, "ownership_transferred"),);
        env.events().publish(topics, (old_admin, new_admin));
    }

    /// Emitted when admin rights are renounced for good
    ///
    /// - topics - `["ownership_renounced"]`
    /// - data - `[old_admin: Address]`
    pub fn ownership_renounced(env: &Env, old_admin: Address) {
        let topics = (Symbol::new(env, "ownership_renounced"),);
        env.events().publish(topics, old_admin);
    }
}
