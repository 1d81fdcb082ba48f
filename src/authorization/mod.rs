//! Resource-ownership authorization.
//!
//! Mutating or aggregating operations on a user-owned resource go through
//! [`check_authorization`]: the resource is resolved through a per-entity
//! [`FindResource`] strategy, then the [`Requirement`] decides over the
//! acting user and the resource owner. The two failure outcomes stay
//! distinguishable at the call site: a missing resource is
//! [`AuthorizationError::NotFound`], a failed ownership check is
//! [`AuthorizationError::Forbidden`].

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

use crate::database::models::{idea, topic, vote};

/// What the caller intends to do with the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Modify the resource in place. Owner only.
    Edit,
    /// Remove the resource. Owner only.
    Delete,
    /// Attach a sub-resource (an idea under a topic, a vote on an idea).
    /// Open to any authenticated user, owner or not.
    Aggregate,
}

impl Requirement {
    #[must_use]
    pub fn allows(self, acting_user_id: &str, owner_user_id: &str) -> bool {
        match self {
            Self::Edit | Self::Delete => acting_user_id == owner_user_id,
            Self::Aggregate => true,
        }
    }
}

/// Capability exposed by every resource that belongs to a user.
///
/// Concrete entities carry ownership as a plain `user_id` column; this trait
/// is the only shape the authorization check depends on.
pub trait Owned {
    /// Lower-case resource kind, used in error messages.
    const KIND: &'static str;

    fn owner_user_id(&self) -> &str;
}

impl Owned for topic::Model {
    const KIND: &'static str = "topic";

    fn owner_user_id(&self) -> &str {
        &self.user_id
    }
}

impl Owned for idea::Model {
    const KIND: &'static str = "idea";

    fn owner_user_id(&self) -> &str {
        &self.user_id
    }
}

impl Owned for vote::Model {
    const KIND: &'static str = "vote";

    fn owner_user_id(&self) -> &str {
        &self.user_id
    }
}

/// Per-entity resolution strategy.
///
/// Each repository decides how a resource key from the request maps to a
/// stored row. Topics and ideas resolve by their id; votes resolve by the
/// `(idea_id, acting_user_id)` natural key, which is why the acting user is
/// part of the resolution context.
#[async_trait]
pub trait FindResource: Send + Sync {
    type Resource: Owned + Send;

    async fn find_resource(
        &self,
        key: &str,
        acting_user_id: &str,
    ) -> Result<Option<Self::Resource>, DbErr>;
}

#[derive(Debug, Error)]
pub enum AuthorizationError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("You are not authorized to modify this {resource}")]
    Forbidden { resource: &'static str },
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Gate an operation on a user-owned resource.
///
/// Resolves the resource, then evaluates the requirement over the acting
/// user and the owner. Returns `Ok(())` on allow; the check itself has no
/// other observable effect.
pub async fn check_authorization<R>(
    resolver: &R,
    acting_user_id: &str,
    requirement: Requirement,
    resource_key: &str,
) -> Result<(), AuthorizationError>
where
    R: FindResource,
{
    let resource = resolver
        .find_resource(resource_key, acting_user_id)
        .await?
        .ok_or(AuthorizationError::NotFound {
            resource: R::Resource::KIND,
        })?;

    if requirement.allows(acting_user_id, resource.owner_user_id()) {
        Ok(())
    } else {
        Err(AuthorizationError::Forbidden {
            resource: R::Resource::KIND,
        })
    }
}
