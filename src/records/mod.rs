//! Composite records built on the property codec.
//!
//! Each record has a host-side form and an encoded form. The encoded forms
//! carry their dictionaries as [`PropertyTable`](crate::codec::PropertyTable)s
//! and serialize with the item names of their [`schema`](crate::schema)
//! descriptor.

mod authorization;
mod role;
mod service_event;
mod user;

pub use authorization::AuthorizationData;
pub use role::{Role, RoleData, RoleKind};
pub use service_event::{ServiceEvent, ServiceEventData, ServiceEventType};
pub use user::{Group, GroupData, User, UserData};
