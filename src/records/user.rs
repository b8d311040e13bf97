use serde::{Deserialize, Serialize};

use super::role::{Role, RoleData};
use crate::codec::{Properties, PropertyTable, decode_table, encode_table};
use crate::error::CodecError;
use crate::schema::{self, CompositeSchema, OpenRecord};

/// Host-side view of a user: a role with credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub role: Role,
    pub credentials: Properties,
}

/// Encoded form of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(rename = "Role")]
    pub role: RoleData,
    #[serde(rename = "Credentials")]
    pub credentials: PropertyTable,
}

impl OpenRecord for UserData {
    const SCHEMA: &'static CompositeSchema = &schema::USER;
}

impl UserData {
    pub fn encode(user: &User) -> Result<Self, CodecError> {
        Ok(Self {
            role: RoleData::encode(&user.role)?,
            credentials: encode_table(&user.credentials)?,
        })
    }

    pub fn decode(&self) -> Result<User, CodecError> {
        Ok(User {
            role: self.role.decode()?,
            credentials: decode_table(&self.credentials)?,
        })
    }
}

/// Host-side view of a group: a user with basic and required members.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub user: User,
    pub members: Vec<String>,
    pub required_members: Vec<String>,
}

/// Encoded form of a [`Group`]. Members are carried by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupData {
    #[serde(rename = "User")]
    pub user: UserData,
    #[serde(rename = "Members")]
    pub members: Vec<String>,
    #[serde(rename = "RequiredMembers")]
    pub required_members: Vec<String>,
}

impl OpenRecord for GroupData {
    const SCHEMA: &'static CompositeSchema = &schema::GROUP;
}

impl GroupData {
    pub fn encode(group: &Group) -> Result<Self, CodecError> {
        Ok(Self {
            user: UserData::encode(&group.user)?,
            members: group.members.clone(),
            required_members: group.required_members.clone(),
        })
    }

    pub fn decode(&self) -> Result<Group, CodecError> {
        Ok(Group {
            user: self.user.decode()?,
            members: self.members.clone(),
            required_members: self.required_members.clone(),
        })
    }
}
