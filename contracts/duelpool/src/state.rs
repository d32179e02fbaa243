use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub payment_token: Addr,
    pub admin_address: Addr,
    pub operator_address: Addr,
    pub interval_seconds: u64,
    pub min_bet_amount: Uint128,
    pub treasury_fee: u64,
    pub oracle_address: Addr,
    pub token0_feed_id: String,
    pub token1_feed_id: String,
}

/// Which asset of the pair a wager backs. Token0 wins a round when token0
/// appreciated more than token1 between lock and close, and vice versa.
#[cw_serde]
#[derive(Copy)]
pub enum Side {
    Token0,
    Token1,
}

impl Side {
    pub fn index(&self) -> u8 {
        match self {
            Side::Token0 => 0,
            Side::Token1 => 1,
        }
    }

}

#[cw_serde]
#[derive(Copy)]
pub enum RoundStatus {
    Open,
    Locked,
    Resolved,
}

#[cw_serde]
#[derive(Copy)]
pub enum Outcome {
    Unresolved,
    Token0Wins,
    Token1Wins,
    Tie,
}

#[cw_serde]
pub struct Round {
    pub epoch: u64,
    pub start_timestamp: u64,
    pub lock_timestamp: u64,
    pub close_timestamp: u64,
    pub lock_price0: Uint128,
    pub lock_price1: Uint128,
    pub close_price0: Uint128,
    pub close_price1: Uint128,
    pub token0_amount: Uint128,
    pub token1_amount: Uint128,
    pub total_amount: Uint128,
    pub reward_base_amount: Uint128,
    pub reward_amount: Uint128,
    pub status: RoundStatus,
    pub outcome: Outcome,
}

impl Round {
    pub fn side_amount(&self, side: Side) -> Uint128 {
        match side {
            Side::Token0 => self.token0_amount,
            Side::Token1 => self.token1_amount,
        }
    }
}

#[cw_serde]
pub struct BetInfo {
    pub side: Side,
    pub amount: Uint128,
    pub claimed: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PAUSED: Item<bool> = Item::new("paused");
pub const GENESIS_STARTED: Item<bool> = Item::new("genesis_started");
pub const GENESIS_LOCKED: Item<bool> = Item::new("genesis_locked");
pub const CURRENT_EPOCH: Item<u64> = Item::new("current_epoch");
pub const ROUNDS: Map<u64, Round> = Map::new("rounds");
pub const LEDGER: Map<(u64, Addr, u8), BetInfo> = Map::new("ledger");
pub const USER_ROUNDS: Map<Addr, Vec<u64>> = Map::new("user_rounds");
pub const TREASURY: Item<Uint128> = Item::new("treasury");
