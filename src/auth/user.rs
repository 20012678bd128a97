use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
}

impl User {
    pub fn new(id: Uuid, email: Option<String>) -> Self {
        Self { id, email }
    }

    /// Single local user for deployments without a hosted auth provider.
    pub fn local() -> Self {
        Self {
            id: Uuid::nil(),
            email: None,
        }
    }
}
