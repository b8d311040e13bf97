//! Management view of the user admin service.

use osgi_jmx::codec::{PropertyTable, PropertyValue, encode_table};
use osgi_jmx::records::{AuthorizationData, GroupData, RoleData, RoleKind, UserData};

use crate::error::MirrorError;
use crate::filter;
use crate::host::{RoleEntry, UserAdmin};

/// Exposes a [`UserAdmin`] by role name.
///
/// Credentials and properties are plain dictionaries; values are usually
/// strings or byte arrays (`PrimitiveArray::Byte`).
pub struct UserManager<U: UserAdmin> {
    admin: U,
}

impl<U: UserAdmin> UserManager<U> {
    pub fn new(admin: U) -> Self {
        Self { admin }
    }

    pub fn admin(&self) -> &U {
        &self.admin
    }

    fn entry(&self, name: &str) -> Result<RoleEntry, MirrorError> {
        self.admin
            .role(name)
            .ok_or_else(|| MirrorError::RoleNotFound(name.to_string()))
    }

    fn user_entry(&self, name: &str) -> Result<RoleEntry, MirrorError> {
        let entry = self.entry(name)?;
        if !entry.is_user() {
            return Err(MirrorError::NotAUser(name.to_string()));
        }
        Ok(entry)
    }

    fn group_entry(&self, name: &str) -> Result<RoleEntry, MirrorError> {
        let entry = self.entry(name)?;
        if !entry.is_group() {
            return Err(MirrorError::NotAGroup(name.to_string()));
        }
        Ok(entry)
    }

    fn names_of_kind(
        &self,
        filter: Option<&str>,
        kind: Option<RoleKind>,
    ) -> Result<Vec<String>, MirrorError> {
        let filter = filter.map(filter::parse_argument).transpose()?;
        Ok(self
            .admin
            .roles(filter.as_ref())
            .into_iter()
            .filter(|r| kind.is_none_or(|k| r.kind == k))
            .map(|r| r.name)
            .collect())
    }

    /// Applies `change` to role `name`, which is known to exist.
    fn modify(&self, name: &str, mut change: impl FnMut(&mut RoleEntry)) {
        self.admin.modify_role(name, &mut change);
    }

    pub fn add_credential(
        &self,
        key: &str,
        value: impl Into<PropertyValue>,
        username: &str,
    ) -> Result<(), MirrorError> {
        self.user_entry(username)?;
        let value = value.into();
        self.modify(username, |user| {
            user.credentials.insert(key.to_string(), value.clone());
        });

        #[cfg(feature = "logging")]
        log::debug!("Added credential {key} to {username}");

        Ok(())
    }

    /// Adds `role` as a basic member of `group`. Returns false if either
    /// role is missing or `role` was already a member.
    pub fn add_member(&self, group: &str, role: &str) -> Result<bool, MirrorError> {
        self.add_to_group(group, role, false)
    }

    /// Adds `role` as a required member of `group`.
    pub fn add_required_member(&self, group: &str, role: &str) -> Result<bool, MirrorError> {
        self.add_to_group(group, role, true)
    }

    fn add_to_group(&self, group: &str, role: &str, required: bool) -> Result<bool, MirrorError> {
        let entry = match self.admin.role(group) {
            Some(entry) => entry,
            None => return Ok(false),
        };
        if !entry.is_group() {
            return Err(MirrorError::NotAGroup(group.to_string()));
        }
        if self.admin.role(role).is_none() {
            return Ok(false);
        }
        let mut added = false;
        self.modify(group, |g| {
            let members = if required {
                &mut g.required_members
            } else {
                &mut g.members
            };
            if !members.iter().any(|m| m == role) {
                members.push(role.to_string());
                added = true;
            }
        });

        #[cfg(feature = "logging")]
        log::debug!("Adding {role} to group {group} (required: {required}): {added}");

        Ok(added)
    }

    pub fn add_property(
        &self,
        key: &str,
        value: impl Into<PropertyValue>,
        rolename: &str,
    ) -> Result<(), MirrorError> {
        self.entry(rolename)?;
        let value = value.into();
        self.modify(rolename, |role| {
            role.properties.insert(key.to_string(), value.clone());
        });
        Ok(())
    }

    /// Creates a group. Returns false if the name is taken.
    pub fn create_group(&self, name: &str) -> bool {
        #[cfg(feature = "logging")]
        log::debug!("Creating group {name}");

        self.admin.create_role(name, RoleKind::Group)
    }

    /// Creates a user. Returns false if the name is taken.
    pub fn create_user(&self, name: &str) -> bool {
        #[cfg(feature = "logging")]
        log::debug!("Creating user {name}");

        self.admin.create_role(name, RoleKind::User)
    }

    pub fn get_authorization(&self, username: &str) -> Result<AuthorizationData, MirrorError> {
        self.user_entry(username)?;
        let roles = self
            .admin
            .authorization(username)
            .ok_or_else(|| MirrorError::NotAUser(username.to_string()))?;
        Ok(AuthorizationData::new(username, roles))
    }

    pub fn get_credentials(&self, username: &str) -> Result<PropertyTable, MirrorError> {
        let user = self.user_entry(username)?;
        Ok(encode_table(&user.credentials)?)
    }

    /// `None` if there is no such role.
    pub fn get_group(&self, name: &str) -> Result<Option<GroupData>, MirrorError> {
        match self.admin.role(name) {
            None => Ok(None),
            Some(entry) if entry.is_group() => Ok(Some(GroupData::encode(&entry.to_group())?)),
            Some(_) => Err(MirrorError::NotAGroup(name.to_string())),
        }
    }

    /// Names of the groups matching `filter`, or of all groups.
    pub fn get_groups(&self, filter: Option<&str>) -> Result<Vec<String>, MirrorError> {
        self.names_of_kind(filter, Some(RoleKind::Group))
    }

    /// Roles implied for a user. Empty for roles that are not users.
    pub fn get_implied_roles(&self, username: &str) -> Result<Vec<String>, MirrorError> {
        self.entry(username)?;
        Ok(self.admin.authorization(username).unwrap_or_default())
    }

    pub fn get_members(&self, group: &str) -> Result<Vec<String>, MirrorError> {
        Ok(self.group_entry(group)?.members)
    }

    /// `None` if there is no such role.
    pub fn get_properties(&self, rolename: &str) -> Result<Option<PropertyTable>, MirrorError> {
        match self.admin.role(rolename) {
            Some(role) => Ok(Some(encode_table(&role.properties)?)),
            None => Ok(None),
        }
    }

    pub fn get_required_members(&self, group: &str) -> Result<Vec<String>, MirrorError> {
        Ok(self.group_entry(group)?.required_members)
    }

    pub fn get_role(&self, name: &str) -> Result<Option<RoleData>, MirrorError> {
        match self.admin.role(name) {
            Some(role) => Ok(Some(RoleData::encode(&role.to_role())?)),
            None => Ok(None),
        }
    }

    /// Names of the roles matching `filter`, or of all roles.
    pub fn get_roles(&self, filter: Option<&str>) -> Result<Vec<String>, MirrorError> {
        self.names_of_kind(filter, None)
    }

    /// `None` if there is no such role.
    pub fn get_user(&self, name: &str) -> Result<Option<UserData>, MirrorError> {
        match self.admin.role(name) {
            None => Ok(None),
            Some(entry) if entry.is_user() => Ok(Some(UserData::encode(&entry.to_user())?)),
            Some(_) => Err(MirrorError::NotAUser(name.to_string())),
        }
    }

    /// Name of the single user whose property `key` is `value`.
    pub fn get_user_with(&self, key: &str, value: &str) -> Option<String> {
        self.admin.user_with(key, value).map(|u| u.name)
    }

    /// Names of the users matching `filter`, or of all users. Groups are
    /// not listed.
    pub fn get_users(&self, filter: Option<&str>) -> Result<Vec<String>, MirrorError> {
        self.names_of_kind(filter, Some(RoleKind::User))
    }

    /// Removes credential `key`. A missing user is ignored.
    pub fn remove_credential(&self, key: &str, username: &str) -> Result<(), MirrorError> {
        match self.user_entry(username) {
            Ok(_) => {
                self.modify(username, |user| {
                    user.credentials.remove(key);
                });
                Ok(())
            }
            Err(MirrorError::RoleNotFound(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Removes `role` from the basic and required members of `group`.
    /// Returns false if nothing was removed.
    pub fn remove_member(&self, group: &str, role: &str) -> Result<bool, MirrorError> {
        match self.group_entry(group) {
            Ok(_) => {}
            Err(MirrorError::RoleNotFound(_)) => return Ok(false),
            Err(err) => return Err(err),
        }
        let mut removed = false;
        self.modify(group, |g| {
            let before = g.members.len() + g.required_members.len();
            g.members.retain(|m| m != role);
            g.required_members.retain(|m| m != role);
            removed = g.members.len() + g.required_members.len() < before;
        });
        Ok(removed)
    }

    /// Removes property `key`. A missing role is ignored.
    pub fn remove_property(&self, key: &str, rolename: &str) {
        self.admin.modify_role(rolename, &mut |role| {
            role.properties.remove(key);
        });
    }

    pub fn remove_role(&self, name: &str) -> bool {
        #[cfg(feature = "logging")]
        log::debug!("Removing role {name}");

        self.admin.remove_role(name)
    }
}
