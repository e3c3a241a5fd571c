use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Insert failed: {0}")]
    InsertFailed(String),
    #[error("Missing generated identifier for {0}")]
    MissingIdentifier(&'static str),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        DomainError::NotFound(format!("{} {}", entity, id))
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = DomainError::not_found("Order", "42");
        assert_eq!(err.to_string(), "Order 42 not found");
    }

    #[test]
    fn missing_identifier_display() {
        assert_eq!(
            DomainError::MissingIdentifier("order").to_string(),
            "Missing generated identifier for order"
        );
    }
}
