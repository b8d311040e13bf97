use serde::{Deserialize, Serialize};

use crate::codec::{Properties, PropertyTable, decode_table, encode_table};
use crate::error::CodecError;
use crate::schema::{self, CompositeSchema, OpenRecord};

/// The kind of a user admin role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Role,
    User,
    Group,
}

impl RoleKind {
    /// Integer code used on the wire: 0 = Role, 1 = User, 2 = Group.
    pub fn code(self) -> i32 {
        match self {
            RoleKind::Role => 0,
            RoleKind::User => 1,
            RoleKind::Group => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(RoleKind::Role),
            1 => Some(RoleKind::User),
            2 => Some(RoleKind::Group),
            _ => None,
        }
    }
}

/// Host-side view of a role.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub name: String,
    pub kind: RoleKind,
    pub properties: Properties,
}

impl Role {
    pub fn new(name: impl Into<String>, kind: RoleKind) -> Self {
        Self {
            name: name.into(),
            kind,
            properties: Properties::new(),
        }
    }
}

/// Encoded form of a [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleData {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub role_type: i32,
    #[serde(rename = "Properties")]
    pub properties: PropertyTable,
}

impl OpenRecord for RoleData {
    const SCHEMA: &'static CompositeSchema = &schema::ROLE;
}

impl RoleData {
    pub fn encode(role: &Role) -> Result<Self, CodecError> {
        Ok(Self {
            name: role.name.clone(),
            role_type: role.kind.code(),
            properties: encode_table(&role.properties)?,
        })
    }

    pub fn decode(&self) -> Result<Role, CodecError> {
        let kind = RoleKind::from_code(self.role_type).ok_or_else(|| CodecError::InvalidItem {
            item: schema::ROLE_TYPE,
            reason: format!("unknown role type {}", self.role_type),
        })?;
        Ok(Role {
            name: self.name.clone(),
            kind,
            properties: decode_table(&self.properties)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{PrimitiveArray, PropertyValue};

    #[test]
    fn test_role_roundtrip() {
        let mut role = Role::new("admins", RoleKind::Group);
        role.properties
            .insert("description".into(), PropertyValue::from("administrators"));
        role.properties.insert(
            "avatar".into(),
            PrimitiveArray::Byte(vec![-1, 0, 127]).into(),
        );

        let data = RoleData::encode(&role).unwrap();
        assert_eq!(data.role_type, 2);
        assert_eq!(data.properties.get("avatar").unwrap().type_tag, "Array of byte");
        assert_eq!(data.decode().unwrap(), role);
    }

    #[test]
    fn test_unknown_role_type_is_rejected() {
        let data = RoleData {
            name: "x".into(),
            role_type: 7,
            properties: PropertyTable::new(),
        };
        assert!(matches!(
            data.decode(),
            Err(CodecError::InvalidItem { item: "Type", .. })
        ));
    }

    #[test]
    fn test_item_names_match_schema() {
        let data = RoleData::encode(&Role::new("r", RoleKind::Role)).unwrap();
        let json = serde_json::to_value(&data).unwrap();
        for name in RoleData::SCHEMA.item_names() {
            assert!(json.get(name).is_some(), "missing item {name}");
        }
    }
}
