//! Sign-in against the backend.

use validator::Validate;

use crate::api::store::TokenIssuer;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::SignInForm;
use crate::models::auth::decode_token;
use crate::services::{ServiceError, ServiceResult};

/// Exchanges the submitted credentials for a token and verifies it.
pub async fn sign_in<I>(issuer: &I, secret: &str, form: SignInForm) -> ServiceResult<AuthenticatedUser>
where
    I: TokenIssuer + ?Sized,
{
    let form = SignInForm {
        email: form.email.trim().to_lowercase(),
        ..form
    };
    if form.validate().is_err() {
        return Err(ServiceError::Form("Ingrese email y contraseña.".to_string()));
    }

    let token = issuer
        .issue_token(&form.email, &form.password)
        .await
        .map_err(|err| match ServiceError::from(err) {
            ServiceError::Unauthorized => {
                ServiceError::Form("Credenciales incorrectas.".to_string())
            }
            other => other,
        })?;

    decode_token(&token, secret).map_err(|err| {
        log::error!("Backend issued a token that does not verify: {err}");
        ServiceError::Unauthorized
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use reqwest::StatusCode;

    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockBackend;
    use crate::domain::auth::Role;
    use crate::models::auth::Claims;

    fn form(email: &str, password: &str) -> SignInForm {
        SignInForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn token(secret: &str) -> String {
        let claims = Claims {
            sub: "5".to_string(),
            email: "ana@example.com".to_string(),
            nombre: "Ana".to_string(),
            rol: Role::Cliente,
            taller_id: None,
            cliente_id: None,
            exp: Utc::now().timestamp() + 600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_credentials_yield_a_session() {
        let mut backend = MockBackend::new();
        backend
            .expect_issue_token()
            .withf(|email, password| email == "ana@example.com" && password == "pw")
            .returning(|_, _| Ok(token("secret")));

        let user = sign_in(&backend, "secret", form(" ana@example.com ", "pw"))
            .await
            .unwrap();

        assert_eq!(user.name, "Ana");
        assert_eq!(user.role, Role::Cliente);
    }

    #[tokio::test]
    async fn rejected_credentials_become_a_form_error() {
        let mut backend = MockBackend::new();
        backend.expect_issue_token().returning(|_, _| {
            Err(ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                message: "bad".to_string(),
            })
        });

        let result = sign_in(&backend, "secret", form("ana@example.com", "wrong")).await;
        assert!(matches!(result, Err(ServiceError::Form(message)) if message == "Credenciales incorrectas."));
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_refused() {
        let mut backend = MockBackend::new();
        backend
            .expect_issue_token()
            .returning(|_, _| Ok(token("other")));

        let result = sign_in(&backend, "secret", form("ana@example.com", "pw")).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn malformed_email_skips_the_backend() {
        let mut backend = MockBackend::new();
        backend.expect_issue_token().never();

        let result = sign_in(&backend, "secret", form("ana", "pw")).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
