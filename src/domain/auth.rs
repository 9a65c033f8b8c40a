//! Session identity and role-based capabilities.
//!
//! The session is a plain value extracted per request and passed explicitly
//! to services. Capability checks are pure functions over the session and the
//! target entity so that templates never carry role conditionals.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::resource::Resource;
use crate::domain::types::{ClientId, WorkshopId};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Administrator of a single workshop.
    AdminTaller,
    /// Mechanic or clerk working inside a workshop.
    Trabajador,
    /// Customer using the portal.
    Cliente,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::AdminTaller => "Administrador de taller",
            Role::Trabajador => "Trabajador",
            Role::Cliente => "Cliente",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Signed-in user together with the bearer token issued by the backend.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub workshop_id: Option<WorkshopId>,
    pub client_id: Option<ClientId>,
    pub exp: i64,
    #[serde(skip)]
    pub token: String,
}

impl AuthenticatedUser {
    /// Bearer token attached to every backend request made for this user.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Ownership information used by [`can_edit`].
pub trait Scoped {
    fn workshop_id(&self) -> Option<WorkshopId> {
        None
    }

    fn client_id(&self) -> Option<ClientId> {
        None
    }
}

/// Whether the session carries the id its role is scoped by. Staff without a
/// workshop and clients without a client record see nothing.
fn has_scope(user: &AuthenticatedUser) -> bool {
    match user.role {
        Role::Admin => true,
        Role::AdminTaller | Role::Trabajador => user.workshop_id.is_some(),
        Role::Cliente => user.client_id.is_some(),
    }
}

/// Whether the user may browse the given resource at all.
pub fn can_view(user: &AuthenticatedUser, resource: Resource) -> bool {
    use Resource::*;

    if !has_scope(user) {
        return false;
    }
    match user.role {
        Role::Admin => true,
        Role::AdminTaller => !matches!(resource, Talleres),
        Role::Trabajador => matches!(
            resource,
            Vehiculos | Mantenimientos | Productos | Servicios | Alertas
        ),
        Role::Cliente => matches!(resource, Vehiculos | Mantenimientos | Facturas | Alertas),
    }
}

/// Whether a single fetched record falls inside the user's scope, the same
/// rule [`scope_filters`] applies to list queries.
pub fn in_scope<T: Scoped + ?Sized>(user: &AuthenticatedUser, resource: Resource, target: &T) -> bool {
    if !can_view(user, resource) {
        return false;
    }
    match user.role {
        Role::Admin => true,
        Role::AdminTaller | Role::Trabajador => target.workshop_id() == user.workshop_id,
        Role::Cliente => target.client_id() == user.client_id,
    }
}

/// Whether the user may create new records of the given resource.
pub fn can_create(user: &AuthenticatedUser, resource: Resource) -> bool {
    match user.role {
        Role::Admin => true,
        Role::AdminTaller => can_view(user, resource),
        Role::Trabajador => false,
        Role::Cliente => resource == Resource::Mantenimientos && has_scope(user),
    }
}

/// Whether the user may modify or delete the target entity.
pub fn can_edit<T: Scoped + ?Sized>(user: &AuthenticatedUser, target: &T) -> bool {
    match user.role {
        Role::Admin => true,
        Role::AdminTaller => user.workshop_id.is_some() && target.workshop_id() == user.workshop_id,
        Role::Trabajador => false,
        Role::Cliente => user.client_id.is_some() && target.client_id() == user.client_id,
    }
}

/// Filter keys forced into every list query issued for this user.
///
/// Returned pairs override anything the user typed in the filter panel.
pub fn scope_filters(user: &AuthenticatedUser, resource: Resource) -> Vec<(&'static str, String)> {
    match user.role {
        Role::Admin => Vec::new(),
        Role::AdminTaller | Role::Trabajador => match (resource, user.workshop_id) {
            (Resource::Talleres, _) | (_, None) => Vec::new(),
            (_, Some(workshop_id)) => vec![("tallerId", workshop_id.to_string())],
        },
        Role::Cliente => match (resource, user.client_id) {
            (_, None) => Vec::new(),
            (_, Some(client_id)) => vec![("clienteId", client_id.to_string())],
        },
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(role: Role, workshop: Option<i32>, client: Option<i32>) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "user@example.com".to_string(),
            name: "Usuario".to_string(),
            role,
            workshop_id: workshop.map(|id| WorkshopId::new(id).unwrap()),
            client_id: client.map(|id| ClientId::new(id).unwrap()),
            exp: 0,
            token: "token".to_string(),
        }
    }
}
