//! Open-type descriptors for the tables and composites exchanged with
//! management clients.
//!
//! The descriptors are process-wide statics, fixed at compile time. They
//! document the wire shape; the serde renames on the record types must agree
//! with the item names declared here.

/// Type of a single composite item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenType {
    String,
    Integer,
    Long,
    StringArray,
    Composite(&'static CompositeSchema),
    Tabular(&'static TabularSchema),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub open_type: OpenType,
}

/// A named record type with a fixed, ordered list of items.
#[derive(Debug, PartialEq, Eq)]
pub struct CompositeSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub items: &'static [ItemSchema],
}

impl CompositeSchema {
    pub fn item_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.items.iter().map(|item| item.name)
    }

    pub fn item(&self, name: &str) -> Option<&ItemSchema> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// A table of composite rows, unique on the index items.
#[derive(Debug, PartialEq, Eq)]
pub struct TabularSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub row: &'static CompositeSchema,
    pub index: &'static [&'static str],
}

/// Implemented by every encoded record to name its descriptor.
pub trait OpenRecord {
    const SCHEMA: &'static CompositeSchema;
}

pub const KEY: &str = "Key";
pub const VALUE: &str = "Value";
pub const TYPE: &str = "Type";

pub static PROPERTY: CompositeSchema = CompositeSchema {
    name: "Property",
    description: "This type encapsulates a key/value pair",
    items: &[
        ItemSchema {
            name: KEY,
            description: "The key of the property",
            open_type: OpenType::String,
        },
        ItemSchema {
            name: VALUE,
            description: "The value of the property",
            open_type: OpenType::String,
        },
        ItemSchema {
            name: TYPE,
            description: "The type of the value",
            open_type: OpenType::String,
        },
    ],
};

pub static PROPERTY_TABLE: TabularSchema = TabularSchema {
    name: "Properties",
    description: "The table of properties",
    row: &PROPERTY,
    index: &[KEY],
};

pub const ROLE_NAME: &str = "Name";
pub const ROLE_TYPE: &str = "Type";
pub const ROLE_PROPERTIES: &str = "Properties";

pub static ROLE: CompositeSchema = CompositeSchema {
    name: "Role",
    description: "Mapping of a user admin role for remote management purposes. User and Group extend Role",
    items: &[
        ItemSchema {
            name: ROLE_NAME,
            description: "The name of the role. Can be either a group or a user",
            open_type: OpenType::String,
        },
        ItemSchema {
            name: ROLE_TYPE,
            description: "An integer representing type of the role: {0=Role,1=user,2=group}",
            open_type: OpenType::Integer,
        },
        ItemSchema {
            name: ROLE_PROPERTIES,
            description: "The properties of the role",
            open_type: OpenType::Tabular(&PROPERTY_TABLE),
        },
    ],
};

pub const USER_ROLE: &str = "Role";
pub const USER_CREDENTIALS: &str = "Credentials";

pub static USER: CompositeSchema = CompositeSchema {
    name: "User",
    description: "Mapping of a user admin user for remote management purposes. User extends Role",
    items: &[
        ItemSchema {
            name: USER_ROLE,
            description: "The role object that is extended by this user object",
            open_type: OpenType::Composite(&ROLE),
        },
        ItemSchema {
            name: USER_CREDENTIALS,
            description: "The credentials for this user",
            open_type: OpenType::Tabular(&PROPERTY_TABLE),
        },
    ],
};

pub const GROUP_USER: &str = "User";
pub const GROUP_MEMBERS: &str = "Members";
pub const GROUP_REQUIRED_MEMBERS: &str = "RequiredMembers";

pub static GROUP: CompositeSchema = CompositeSchema {
    name: "Group",
    description: "Mapping of a user admin group for remote management purposes. Group extends User which in turn extends Role",
    items: &[
        ItemSchema {
            name: GROUP_USER,
            description: "The user object that is extended by this group object",
            open_type: OpenType::Composite(&USER),
        },
        ItemSchema {
            name: GROUP_MEMBERS,
            description: "The members of this group",
            open_type: OpenType::StringArray,
        },
        ItemSchema {
            name: GROUP_REQUIRED_MEMBERS,
            description: "The required members for this group",
            open_type: OpenType::StringArray,
        },
    ],
};

pub const AUTHORIZATION_NAME: &str = "Name";
pub const AUTHORIZATION_ROLES: &str = "Roles";

pub static AUTHORIZATION: CompositeSchema = CompositeSchema {
    name: "Authorization",
    description: "An authorization object defines which roles has a user got",
    items: &[
        ItemSchema {
            name: AUTHORIZATION_NAME,
            description: "The user name for this authorization object",
            open_type: OpenType::String,
        },
        ItemSchema {
            name: AUTHORIZATION_ROLES,
            description: "The names of the roles encapsulated by this auth object",
            open_type: OpenType::StringArray,
        },
    ],
};

pub const SERVICE_ID: &str = "Identifier";
pub const BUNDLE_IDENTIFIER: &str = "BundleIdentifier";
pub const BUNDLE_LOCATION: &str = "BundleLocation";
pub const OBJECT_CLASS: &str = "ObjectClass";
pub const EVENT_TYPE: &str = "EventType";

pub static SERVICE_EVENT: CompositeSchema = CompositeSchema {
    name: "ServiceEvent",
    description: "This type encapsulates OSGi service events",
    items: &[
        ItemSchema {
            name: SERVICE_ID,
            description: "The id of the service",
            open_type: OpenType::Long,
        },
        ItemSchema {
            name: BUNDLE_IDENTIFIER,
            description: "The id of the bundle which registered the service",
            open_type: OpenType::Long,
        },
        ItemSchema {
            name: BUNDLE_LOCATION,
            description: "The location of the bundle that registered the service",
            open_type: OpenType::String,
        },
        ItemSchema {
            name: OBJECT_CLASS,
            description: "The interfaces under which the service has been registered",
            open_type: OpenType::StringArray,
        },
        ItemSchema {
            name: EVENT_TYPE,
            description: "The type of the event: {REGISTERED=1, MODIFIED=2, UNREGISTERING=4, MODIFIED_ENDMATCH=8}",
            open_type: OpenType::Integer,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_table_indexed_by_key() {
        assert_eq!(PROPERTY_TABLE.index, &[KEY]);
        assert!(PROPERTY_TABLE.row.item(KEY).is_some());
        assert_eq!(
            PROPERTY.item_names().collect::<Vec<_>>(),
            vec!["Key", "Value", "Type"]
        );
    }

    #[test]
    fn test_nested_composites_link_to_parents() {
        let user = GROUP.item(GROUP_USER).unwrap();
        assert_eq!(user.open_type, OpenType::Composite(&USER));
        let role = USER.item(USER_ROLE).unwrap();
        assert_eq!(role.open_type, OpenType::Composite(&ROLE));
    }
}
