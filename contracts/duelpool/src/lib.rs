pub mod contract;
pub mod error;
pub mod msg;
pub mod oracle;
pub mod reward;
pub mod state;

#[cfg(test)]
mod tests;

pub use crate::error::ContractError;
