//! Domain services for topics, ideas and votes.
//!
//! Services validate inputs, assign identifiers and orchestrate repository
//! calls. They hold no state across requests and take no in-process locks;
//! for concurrent writes to the same entity the storage layer is the sole
//! arbiter — the last write observed by storage wins, and no optimistic
//! locking or retry is attempted here.

use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

pub mod ideas;
pub mod topics;
pub mod votes;

pub use ideas::IdeaService;
pub use topics::TopicService;
pub use votes::VoteService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Validation error")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

#[derive(Validate)]
struct IdentifierField<'a> {
    #[validate(length(equal = 36, message = "The identifier must be 36 characters long."))]
    value: &'a str,
}

/// Identifiers are UUID-shaped 36-character strings; anything else is a
/// validation failure, not a lookup miss.
pub fn validate_identifier(value: &str) -> Result<(), ServiceError> {
    IdentifierField { value }.validate()?;
    Ok(())
}

/// Fresh identifier for a newly created entity.
#[must_use]
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_shaped_identifiers_pass() {
        assert!(validate_identifier(&new_entity_id()).is_ok());
    }

    #[test]
    fn short_and_empty_identifiers_fail() {
        for value in ["", "abc", "123456789"] {
            assert!(matches!(
                validate_identifier(value),
                Err(ServiceError::Validation(_))
            ));
        }
    }
}
