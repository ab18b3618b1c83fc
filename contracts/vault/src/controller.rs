pub mod profits;
pub mod referral;
pub mod rounds;
pub mod stake;
