//! Session extraction: the identity cookie stores the backend token, whose
//! claims become the [`AuthenticatedUser`] handed to handlers.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::domain::types::{ClientId, WorkshopId};
use crate::models::config::ServerConfig;

/// Claims carried by tokens issued by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub nombre: String,
    pub rol: Role,
    #[serde(default)]
    pub taller_id: Option<WorkshopId>,
    #[serde(default)]
    pub cliente_id: Option<ClientId>,
    pub exp: i64,
}

impl Claims {
    pub fn into_user(self, token: impl Into<String>) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: self.sub,
            name: if self.nombre.is_empty() {
                self.email.clone()
            } else {
                self.nombre
            },
            email: self.email,
            role: self.rol,
            workshop_id: self.taller_id,
            client_id: self.cliente_id,
            exp: self.exp,
            token: token.into(),
        }
    }
}

/// Verifies the token signature and expiry and builds the session user.
pub fn decode_token(
    token: &str,
    secret: &str,
) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims.into_user(token))
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let token = req
        .get_identity()
        .and_then(|identity| identity.id())
        .map_err(|_| ErrorUnauthorized("not signed in"))?;

    let config = req.app_data::<web::Data<ServerConfig>>().ok_or_else(|| {
        log::error!("ServerConfig is not registered as app data");
        ErrorUnauthorized("server misconfigured")
    })?;

    decode_token(&token, &config.secret).map_err(|err| {
        log::warn!("Rejected session token: {err}");
        ErrorUnauthorized("invalid session")
    })
}
