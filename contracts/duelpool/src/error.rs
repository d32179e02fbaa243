use cosmwasm_std::{CheckedMultiplyRatioError, DivideByZeroError, OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    DivideByZero(#[from] DivideByZeroError),

    #[error("{0}")]
    MultiplyRatio(#[from] CheckedMultiplyRatioError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid interval seconds")]
    InvalidInterval {},

    #[error("Invalid minimum bet amount")]
    InvalidMinBetAmount {},

    #[error("Invalid treasury fee (must be <= 1000, representing max 10%)")]
    InvalidTreasuryFee {},

    #[error("Contract is paused")]
    Paused {},

    #[error("Contract is already paused")]
    AlreadyPaused {},

    #[error("Contract is already unpaused")]
    AlreadyUnpaused {},

    #[error("Genesis round has already been started")]
    AlreadyStarted {},

    #[error("Genesis round has not been started")]
    GenesisNotStarted {},

    #[error("Genesis round has already been locked")]
    GenesisAlreadyLocked {},

    #[error("Genesis round has not been locked")]
    GenesisNotLocked {},

    #[error("Too early for round transition at epoch {epoch}")]
    TooEarly { epoch: u64 },

    #[error("Round {epoch} is not open for betting")]
    RoundNotOpen { epoch: u64 },

    #[error("Bet amount must be positive")]
    InvalidAmount {},

    #[error("Bet amount is below the minimum")]
    BetTooSmall {},

    #[error("No oracle data: {0}")]
    NoOracleData(String),

    #[error("Round has not ended for epoch {epoch}")]
    RoundNotEnded { epoch: u64 },

    #[error("Nothing to claim for epoch {epoch}")]
    NothingToClaim { epoch: u64 },

    #[error("Already claimed rewards for epoch {epoch}")]
    AlreadyClaimed { epoch: u64 },

    #[error("No epochs provided")]
    EmptyEpochs {},

    #[error("No treasury funds to claim")]
    NoTreasury {},
}
