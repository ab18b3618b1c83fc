extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation, Ledger},
    vec, Address, Env, IntoVal, Symbol,
};

use super::setup::{deploy_token_contract, deploy_vault_contract, mint_tokens, ONE_DAY};
use crate::storage::{ContractStatus, Stake, Totals};

#[test]
fn deposit_mints_stake_and_collects_entry_fee() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = ONE_DAY);

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let vault = deploy_vault_contract(&env, &admin, &token.address);

    vault.change_status(&admin, &ContractStatus::Active);
    mint_tokens(&env, &token.address, &user, 1_000_000_000);

    let stake_id = vault.deposit(&user, &0, &100_000_000);
    assert_eq!(stake_id, 1);

    assert_eq!(
        vault.query_stake(&1),
        Stake {
            id: 1,
            account_id: 1,
            owner: user.clone(),
            shares: 95_000_000,
            principal: 95_000_000,
            since_time: ONE_DAY,
            till_time: 0,
        }
    );
    assert_eq!(vault.query_stake_ids(&user), vec![&env, 1]);
    assert_eq!(
        vault.query_totals().totals,
        Totals {
            total_shares: 95_000_000,
            total_staked: 95_000_000,
        }
    );
    assert_eq!(vault.query_profits(), 5_000_000);

    assert_eq!(token.balance(&user), 900_000_000);
    assert_eq!(token.balance(&vault.address), 100_000_000);

    let account = vault.query_account(&user).unwrap();
    assert_eq!(account.id, 1);
    assert_eq!(account.referrer, None);
    assert!(account.has_active_stake);
    assert_eq!(account.last_active_time, ONE_DAY);
    assert_eq!(vault.query_account_address(&1), Some(user));
}

#[test]
fn deposit_authorizes_sender_and_token_transfer() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = ONE_DAY);

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let vault = deploy_vault_contract(&env, &admin, &token.address);

    vault.change_status(&admin, &ContractStatus::Active);
    mint_tokens(&env, &token.address, &user, 100_000_000);

    vault.deposit(&user, &0, &100_000_000);

    assert_eq!(
        env.auths(),
        [(
            user.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    vault.address.clone(),
                    Symbol::new(&env, "deposit"),
                    (user.clone(), 0u64, 100_000_000i128).into_val(&env),
                )),
                sub_invocations: std::vec![AuthorizedInvocation {
                    function: AuthorizedFunction::Contract((
                        token.address.clone(),
                        Symbol::new(&env, "transfer"),
                        (user.clone(), vault.address.clone(), 100_000_000i128).into_val(&env),
                    )),
                    sub_invocations: std::vec![],
                }],
            }
        )]
    );
}

#[test]
#[should_panic(expected = "Vault: Deposit: contract is not active")]
fn deposit_requires_active_status() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let vault = deploy_vault_contract(&env, &admin, &token.address);

    mint_tokens(&env, &token.address, &user, 100_000_000);
    vault.deposit(&user, &0, &100_000_000);
}

#[test]
#[should_panic(expected = "Vault: Deposit: contract is not active")]
fn deposit_blocked_while_deposits_paused() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let vault = deploy_vault_contract(&env, &admin, &token.address);

    vault.change_status(&admin, &ContractStatus::DepositInactive);
    mint_tokens(&env, &token.address, &user, 100_000_000);
    vault.deposit(&user, &0, &100_000_000);
}

#[test]
#[should_panic(expected = "Vault: Deposit: amount must be positive")]
fn deposit_rejects_zero_amount() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let vault = deploy_vault_contract(&env, &admin, &token.address);

    vault.change_status(&admin, &ContractStatus::Active);
    vault.deposit(&user, &0, &0);
}

#[test]
fn repeat_deposits_reuse_the_account() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = ONE_DAY);

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let other = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let vault = deploy_vault_contract(&env, &admin, &token.address);

    vault.change_status(&admin, &ContractStatus::Active);
    mint_tokens(&env, &token.address, &user, 300_000_000);
    mint_tokens(&env, &token.address, &other, 100_000_000);

    assert_eq!(vault.deposit(&user, &0, &100_000_000), 1);
    assert_eq!(vault.deposit(&user, &0, &100_000_000), 2);
    assert_eq!(vault.deposit(&other, &0, &100_000_000), 3);

    assert_eq!(vault.query_stake_ids(&user), vec![&env, 1, 2]);
    assert_eq!(vault.query_stake(&1).account_id, 1);
    assert_eq!(vault.query_stake(&2).account_id, 1);
    assert_eq!(vault.query_stake(&3).account_id, 2);
    assert_eq!(vault.query_account_address(&1), Some(user));
    assert_eq!(vault.query_account_address(&2), Some(other));
    assert_eq!(vault.query_account_address(&3), None);
}

#[test]
fn entry_fee_floors_in_favor_of_the_staker() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = ONE_DAY);

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let vault = deploy_vault_contract(&env, &admin, &token.address);

    vault.change_status(&admin, &ContractStatus::Active);
    mint_tokens(&env, &token.address, &user, 99);

    vault.deposit(&user, &0, &99);

    // 4.95 floors to 4, the stake keeps the difference
    assert_eq!(vault.query_stake(&1).shares, 95);
    assert_eq!(vault.query_profits(), 4);
}
