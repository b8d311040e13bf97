use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock};

use osgi_jmx::codec::{Properties, PropertyValue, Scalar};
use osgi_jmx::records::{Group, Role, RoleKind, User};

use crate::filter::Filter;

/// The predefined role every user implicitly belongs to.
pub const USER_ANYONE: &str = "user.anyone";

/// A role as stored by a [`UserAdmin`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoleEntry {
    pub name: String,
    pub kind: RoleKind,
    pub properties: Properties,
    /// Only meaningful for users and groups.
    pub credentials: Properties,
    /// Only meaningful for groups.
    pub members: Vec<String>,
    /// Only meaningful for groups.
    pub required_members: Vec<String>,
}

impl RoleEntry {
    pub fn new(name: impl Into<String>, kind: RoleKind) -> Self {
        Self {
            name: name.into(),
            kind,
            properties: Properties::new(),
            credentials: Properties::new(),
            members: Vec::new(),
            required_members: Vec::new(),
        }
    }

    /// Groups are users too.
    pub fn is_user(&self) -> bool {
        matches!(self.kind, RoleKind::User | RoleKind::Group)
    }

    pub fn is_group(&self) -> bool {
        self.kind == RoleKind::Group
    }

    pub fn to_role(&self) -> Role {
        Role {
            name: self.name.clone(),
            kind: self.kind,
            properties: self.properties.clone(),
        }
    }

    pub fn to_user(&self) -> User {
        User {
            role: self.to_role(),
            credentials: self.credentials.clone(),
        }
    }

    pub fn to_group(&self) -> Group {
        Group {
            user: self.to_user(),
            members: self.members.clone(),
            required_members: self.required_members.clone(),
        }
    }
}

/// The role store managed by [`UserManager`](crate::UserManager).
pub trait UserAdmin: Send + Sync {
    /// Creates a role. Returns false if a role with this name already exists.
    fn create_role(&self, name: &str, kind: RoleKind) -> bool;

    fn role(&self, name: &str) -> Option<RoleEntry>;

    /// Roles whose properties match `filter`, or all roles.
    fn roles(&self, filter: Option<&Filter>) -> Vec<RoleEntry>;

    /// Removes a role and every group membership naming it.
    fn remove_role(&self, name: &str) -> bool;

    /// The single user with property `key` equal to the string `value`.
    /// `None` if no user or more than one user matches.
    fn user_with(&self, key: &str, value: &str) -> Option<RoleEntry>;

    /// Applies `change` to the stored role. Returns false if there is no such role.
    fn modify_role(&self, name: &str, change: &mut dyn FnMut(&mut RoleEntry)) -> bool;

    /// Names of the roles implied for user `name`, starting with the user
    /// itself. `None` if `name` is not a user.
    fn authorization(&self, name: &str) -> Option<Vec<String>>;
}

impl<T: UserAdmin + ?Sized> UserAdmin for Arc<T> {
    fn create_role(&self, name: &str, kind: RoleKind) -> bool {
        (**self).create_role(name, kind)
    }

    fn role(&self, name: &str) -> Option<RoleEntry> {
        (**self).role(name)
    }

    fn roles(&self, filter: Option<&Filter>) -> Vec<RoleEntry> {
        (**self).roles(filter)
    }

    fn remove_role(&self, name: &str) -> bool {
        (**self).remove_role(name)
    }

    fn user_with(&self, key: &str, value: &str) -> Option<RoleEntry> {
        (**self).user_with(key, value)
    }

    fn modify_role(&self, name: &str, change: &mut dyn FnMut(&mut RoleEntry)) -> bool {
        (**self).modify_role(name, change)
    }

    fn authorization(&self, name: &str) -> Option<Vec<String>> {
        (**self).authorization(name)
    }
}

/// A [`UserAdmin`] backed by an in-process map. `user.anyone` always exists.
#[derive(Debug)]
pub struct InMemoryUserAdmin {
    roles: RwLock<BTreeMap<String, RoleEntry>>,
}

impl Default for InMemoryUserAdmin {
    fn default() -> Self {
        let mut roles = BTreeMap::new();
        roles.insert(
            USER_ANYONE.to_string(),
            RoleEntry::new(USER_ANYONE, RoleKind::Role),
        );
        Self {
            roles: RwLock::new(roles),
        }
    }
}

impl InMemoryUserAdmin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserAdmin for InMemoryUserAdmin {
    fn create_role(&self, name: &str, kind: RoleKind) -> bool {
        let mut roles = self.roles.write().unwrap_or_else(PoisonError::into_inner);
        if roles.contains_key(name) {
            return false;
        }
        roles.insert(name.to_string(), RoleEntry::new(name, kind));
        true
    }

    fn role(&self, name: &str) -> Option<RoleEntry> {
        self.roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn roles(&self, filter: Option<&Filter>) -> Vec<RoleEntry> {
        self.roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|r| filter.is_none_or(|f| f.matches(&r.properties)))
            .cloned()
            .collect()
    }

    fn remove_role(&self, name: &str) -> bool {
        if name == USER_ANYONE {
            return false;
        }
        let mut roles = self.roles.write().unwrap_or_else(PoisonError::into_inner);
        if roles.remove(name).is_none() {
            return false;
        }
        for group in roles.values_mut().filter(|r| r.is_group()) {
            group.members.retain(|m| m != name);
            group.required_members.retain(|m| m != name);
        }
        true
    }

    fn user_with(&self, key: &str, value: &str) -> Option<RoleEntry> {
        let roles = self.roles.read().unwrap_or_else(PoisonError::into_inner);
        let mut matching = roles.values().filter(|r| {
            r.is_user()
                && matches!(
                    r.properties.get(key),
                    Some(PropertyValue::Scalar(Scalar::String(s))) if s == value
                )
        });
        let first = matching.next()?;
        match matching.next() {
            Some(_) => None,
            None => Some(first.clone()),
        }
    }

    fn modify_role(&self, name: &str, change: &mut dyn FnMut(&mut RoleEntry)) -> bool {
        let mut roles = self.roles.write().unwrap_or_else(PoisonError::into_inner);
        match roles.get_mut(name) {
            Some(role) => {
                change(role);
                true
            }
            None => false,
        }
    }

    fn authorization(&self, name: &str) -> Option<Vec<String>> {
        let roles = self.roles.read().unwrap_or_else(PoisonError::into_inner);
        if !roles.get(name)?.is_user() {
            return None;
        }
        Some(implied_roles(&roles, name))
    }
}

/// Groups implied for `user`, iterated to a fixed point. A group is implied
/// when all its required members and at least one basic member are implied.
fn implied_roles(roles: &BTreeMap<String, RoleEntry>, user: &str) -> Vec<String> {
    let mut implied: BTreeSet<&str> = BTreeSet::from([user, USER_ANYONE]);
    loop {
        let mut changed = false;
        for group in roles.values().filter(|r| r.is_group()) {
            if implied.contains(group.name.as_str()) {
                continue;
            }
            let required = group
                .required_members
                .iter()
                .all(|m| implied.contains(m.as_str()));
            let basic = group.members.iter().any(|m| implied.contains(m.as_str()));
            if required && basic {
                implied.insert(group.name.as_str());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let mut names = vec![user.to_string()];
    names.extend(
        implied
            .into_iter()
            .filter(|n| *n != user && *n != USER_ANYONE)
            .map(str::to_string),
    );
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_with(users: &[&str]) -> InMemoryUserAdmin {
        let admin = InMemoryUserAdmin::new();
        for user in users {
            admin.create_role(user, RoleKind::User);
        }
        admin
    }

    fn add_group(admin: &InMemoryUserAdmin, name: &str, members: &[&str], required: &[&str]) {
        admin.create_role(name, RoleKind::Group);
        admin.modify_role(name, &mut |g| {
            g.members = members.iter().map(|m| m.to_string()).collect();
            g.required_members = required.iter().map(|m| m.to_string()).collect();
        });
    }

    #[test]
    fn test_user_anyone_is_predefined() {
        let admin = InMemoryUserAdmin::new();
        assert_eq!(admin.role(USER_ANYONE).unwrap().kind, RoleKind::Role);
        assert!(!admin.remove_role(USER_ANYONE));
        assert!(!admin.create_role(USER_ANYONE, RoleKind::User));
    }

    #[test]
    fn test_implied_roles_follow_nested_groups() {
        let admin = admin_with(&["alice", "bob"]);
        add_group(&admin, "staff", &["alice"], &[]);
        add_group(&admin, "everyone-on-staff", &["staff"], &[]);
        assert_eq!(
            admin.authorization("alice").unwrap(),
            vec!["alice", "everyone-on-staff", "staff"]
        );
        assert_eq!(admin.authorization("bob").unwrap(), vec!["bob"]);
    }

    #[test]
    fn test_required_members_must_all_be_implied() {
        let admin = admin_with(&["alice", "bob"]);
        add_group(&admin, "employees", &["alice"], &[]);
        add_group(&admin, "admins", &["alice", "bob"], &["employees"]);
        assert!(admin.authorization("alice").unwrap().contains(&"admins".to_string()));
        assert!(!admin.authorization("bob").unwrap().contains(&"admins".to_string()));
    }

    #[test]
    fn test_user_anyone_membership() {
        let admin = admin_with(&["carol"]);
        add_group(&admin, "public", &[USER_ANYONE], &[]);
        assert_eq!(admin.authorization("carol").unwrap(), vec!["carol", "public"]);
    }

    #[test]
    fn test_authorization_requires_a_user() {
        let admin = admin_with(&[]);
        admin.create_role("plain", RoleKind::Role);
        assert!(admin.authorization("plain").is_none());
        assert!(admin.authorization("ghost").is_none());
    }

    #[test]
    fn test_user_with_requires_a_unique_match() {
        let admin = admin_with(&["alice", "bob"]);
        for name in ["alice", "bob"] {
            admin.modify_role(name, &mut |r| {
                r.properties
                    .insert("dept".into(), PropertyValue::from("eng"));
            });
        }
        admin.modify_role("alice", &mut |r| {
            r.properties
                .insert("mail".into(), PropertyValue::from("alice@example.org"));
        });
        assert_eq!(
            admin.user_with("mail", "alice@example.org").unwrap().name,
            "alice"
        );
        assert!(admin.user_with("dept", "eng").is_none());
        assert!(admin.user_with("mail", "nobody").is_none());
    }

    #[test]
    fn test_remove_role_drops_memberships() {
        let admin = admin_with(&["alice"]);
        add_group(&admin, "staff", &["alice"], &["alice"]);
        assert!(admin.remove_role("alice"));
        let staff = admin.role("staff").unwrap();
        assert!(staff.members.is_empty());
        assert!(staff.required_members.is_empty());
    }

    #[test]
    fn test_roles_filter_on_properties() {
        let admin = admin_with(&["alice", "bob"]);
        admin.modify_role("bob", &mut |r| {
            r.properties.insert("level".into(), PropertyValue::from(3));
        });
        let filter = Filter::parse("(level>=2)").unwrap();
        let names: Vec<String> = admin
            .roles(Some(&filter))
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["bob"]);
    }
}
