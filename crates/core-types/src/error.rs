use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Order '{0}' has a negative total value: {1}")]
    NegativeValue(String, Decimal),

    #[error("Duplicate {kind} id '{id}' in snapshot")]
    DuplicateId { kind: &'static str, id: String },
}
