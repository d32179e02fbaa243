use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::{Outcome, RoundStatus, Side};

#[cw_serde]
pub struct InstantiateMsg {
    pub admin_address: String,
    pub operator_address: String,
    pub payment_token: String,
    pub interval_seconds: u64,
    pub min_bet_amount: Uint128,
    pub treasury_fee: u64,
    pub oracle_address: String,
    pub token0_feed_id: String,
    pub token1_feed_id: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    // User actions
    BetToken0 { epoch: u64, amount: Uint128 },
    BetToken1 { epoch: u64, amount: Uint128 },
    Claim { epochs: Vec<u64> },

    // Operator actions
    GenesisStartRound {},
    GenesisLockRound { price0: Uint128, price1: Uint128 },
    ExecuteRound { price0: Uint128, price1: Uint128 },

    // Admin actions
    Pause {},
    Unpause {},
    ClaimTreasury {},
    SetIntervalSeconds { interval_seconds: u64 },
    SetMinBetAmount { min_bet_amount: Uint128 },
    SetOperator { operator_address: String },
    SetTreasuryFee { treasury_fee: u64 },
    SetOracleInfo { oracle_address: String, token0_feed_id: String, token1_feed_id: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RoundResponse)]
    GetRound { epoch: u64 },

    #[returns(u64)]
    GetCurrentEpoch {},

    #[returns(UserRoundsResponse)]
    GetUserRounds { user: String, cursor: u64, size: u64 },

    #[returns(ClaimableResponse)]
    Claimable { epoch: u64, user: String },

    #[returns(RefundableResponse)]
    Refundable { epoch: u64, user: String },

    #[returns(OraclePricesResponse)]
    OraclePrices {},

    #[returns(ConfigResponse)]
    GetConfig {},
}

#[cw_serde]
pub struct RoundResponse {
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

#[cw_serde]
pub struct UserRoundsResponse {
    pub epochs: Vec<u64>,
    pub next_cursor: Option<u64>,
}

#[cw_serde]
pub struct BetResponse {
    pub side: Side,
    pub amount: Uint128,
    pub claimed: bool,
}

#[cw_serde]
pub struct ClaimableResponse {
    pub is_claimable: bool,
    pub bets: Vec<BetResponse>,
    pub expected_reward: Uint128,
}

#[cw_serde]
pub struct RefundableResponse {
    pub is_refundable: bool,
    pub amount: Option<Uint128>,
}

#[cw_serde]
pub struct OraclePricesResponse {
    pub price0: Uint128,
    pub price1: Uint128,
}

#[cw_serde]
pub struct ConfigResponse {
    pub payment_token: String,
    pub admin_address: String,
    pub operator_address: String,
    pub interval_seconds: u64,
    pub min_bet_amount: Uint128,
    pub treasury_fee: u64,
    pub oracle_address: String,
    pub token0_feed_id: String,
    pub token1_feed_id: String,
    pub paused: bool,
}
