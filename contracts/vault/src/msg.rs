use soroban_sdk::contracttype;

use crate::storage::{Config, Totals};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigResponse {
    pub config: Config,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TotalsResponse {
    pub totals: Totals,
}

/// What a `(stake, round)` pair would pay out right now, before any accrued
/// referral balance is added on top.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimableResponse {
    pub gross: i128,
    pub net: i128,
}
