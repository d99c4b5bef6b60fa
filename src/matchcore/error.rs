//! Matching core error types

use crate::model::{OrderId, OrderType};
use std::fmt;

/// Errors that can occur within the matching core
#[derive(Debug)]
#[non_exhaustive]
pub enum MatchingCoreError {
    /// A non-passive order type reached an operation that only accepts
    /// working orders. Signals a programming error in the caller or in
    /// upstream deserialization; the core's state is left untouched.
    InvalidOrderType {
        /// The offending order type
        order_type: OrderType,
    },

    /// An order with the same client order id is already working
    OrderAlreadyExists {
        /// The duplicate client order id
        client_order_id: OrderId,
    },

    /// Error while serializing snapshot data
    SerializationError {
        /// Underlying error message
        message: String,
    },

    /// Error while deserializing snapshot data
    DeserializationError {
        /// Underlying error message
        message: String,
    },

    /// Snapshot integrity check failed
    ChecksumMismatch {
        /// Expected checksum value
        expected: String,
        /// Actual checksum value
        actual: String,
    },
}

impl fmt::Display for MatchingCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingCoreError::InvalidOrderType { order_type } => {
                write!(f, "Invalid order type for matching: {order_type}")
            }
            MatchingCoreError::OrderAlreadyExists { client_order_id } => {
                write!(f, "Order already exists: {client_order_id}")
            }
            MatchingCoreError::SerializationError { message } => {
                write!(f, "Serialization error: {message}")
            }
            MatchingCoreError::DeserializationError { message } => {
                write!(f, "Deserialization error: {message}")
            }
            MatchingCoreError::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "Checksum mismatch: expected {expected}, but computed {actual}"
                )
            }
        }
    }
}

impl std::error::Error for MatchingCoreError {}
