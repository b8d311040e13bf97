use serde::{Deserialize, Serialize};

use crate::schema::{self, CompositeSchema, OpenRecord};

/// The roles implied for a user, as reported to management clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationData {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Roles")]
    pub roles: Vec<String>,
}

impl OpenRecord for AuthorizationData {
    const SCHEMA: &'static CompositeSchema = &schema::AUTHORIZATION;
}

impl AuthorizationData {
    pub fn new(name: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            roles,
        }
    }

    /// Returns true if `role` is among the implied roles.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
