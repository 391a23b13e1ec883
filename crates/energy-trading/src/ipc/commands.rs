//! # Command Surface
//!
//! Invocations arrive as a function name plus positional string arguments.
//! `Command::parse` turns them into a closed enum so dispatch is exhaustive.
//!
//! | Function | Arguments |
//! |----------|-----------|
//! | `CreateEnergyRequest` | id, consumerId, energyAmount, timestamp |
//! | `CreateEnergyOffer` | id, producerId, energyAmount, timestamp |
//! | `MatchRequestWithOffer` | requestId, offerId |
//! | `ExecuteTransaction` | transactionId |
//! | `GetTransactionHistory` | participantId |
//! | `GetEnergyRequest` | id |
//! | `GetEnergyOffer` | id |
//! | `GetTransaction` | transactionId |

use crate::domain::TradingError;

/// A parsed contract invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateEnergyRequest {
        id: String,
        consumer_id: String,
        energy_amount: String,
        timestamp: String,
    },
    CreateEnergyOffer {
        id: String,
        producer_id: String,
        energy_amount: String,
        timestamp: String,
    },
    MatchRequestWithOffer {
        request_id: String,
        offer_id: String,
    },
    ExecuteTransaction {
        transaction_id: String,
    },
    GetTransactionHistory {
        participant_id: String,
    },
    GetEnergyRequest {
        id: String,
    },
    GetEnergyOffer {
        id: String,
    },
    GetTransaction {
        transaction_id: String,
    },
}

impl Command {
    /// Parse a function name and its arguments.
    ///
    /// The function name is checked before the argument count.
    pub fn parse(function: &str, args: &[String]) -> Result<Self, TradingError> {
        let command = match function {
            "CreateEnergyRequest" => {
                let [id, consumer_id, energy_amount, timestamp] = positional(args)?;
                Self::CreateEnergyRequest {
                    id,
                    consumer_id,
                    energy_amount,
                    timestamp,
                }
            }
            "CreateEnergyOffer" => {
                let [id, producer_id, energy_amount, timestamp] = positional(args)?;
                Self::CreateEnergyOffer {
                    id,
                    producer_id,
                    energy_amount,
                    timestamp,
                }
            }
            "MatchRequestWithOffer" => {
                let [request_id, offer_id] = positional(args)?;
                Self::MatchRequestWithOffer {
                    request_id,
                    offer_id,
                }
            }
            "ExecuteTransaction" => {
                let [transaction_id] = positional(args)?;
                Self::ExecuteTransaction { transaction_id }
            }
            "GetTransactionHistory" => {
                let [participant_id] = positional(args)?;
                Self::GetTransactionHistory { participant_id }
            }
            "GetEnergyRequest" => {
                let [id] = positional(args)?;
                Self::GetEnergyRequest { id }
            }
            "GetEnergyOffer" => {
                let [id] = positional(args)?;
                Self::GetEnergyOffer { id }
            }
            "GetTransaction" => {
                let [transaction_id] = positional(args)?;
                Self::GetTransaction { transaction_id }
            }
            _ => return Err(TradingError::Validation("Invalid function name".to_string())),
        };
        Ok(command)
    }

    /// Function name as it appears on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateEnergyRequest { .. } => "CreateEnergyRequest",
            Self::CreateEnergyOffer { .. } => "CreateEnergyOffer",
            Self::MatchRequestWithOffer { .. } => "MatchRequestWithOffer",
            Self::ExecuteTransaction { .. } => "ExecuteTransaction",
            Self::GetTransactionHistory { .. } => "GetTransactionHistory",
            Self::GetEnergyRequest { .. } => "GetEnergyRequest",
            Self::GetEnergyOffer { .. } => "GetEnergyOffer",
            Self::GetTransaction { .. } => "GetTransaction",
        }
    }

    /// True for queries that never write to the ledger.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::GetTransactionHistory { .. }
                | Self::GetEnergyRequest { .. }
                | Self::GetEnergyOffer { .. }
                | Self::GetTransaction { .. }
        )
    }
}

fn positional<const N: usize>(args: &[String]) -> Result<[String; N], TradingError> {
    <[String; N]>::try_from(args.to_vec()).map_err(|_| {
        TradingError::Validation(format!("Incorrect number of arguments. Expecting {N}"))
    })
}
