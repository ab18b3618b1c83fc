#![no_std]

mod contract;
mod controller;
mod events;
mod math;
mod msg;
mod storage;
mod vault;
