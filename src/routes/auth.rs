use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::api::CollectionClient;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::SignInForm;
use crate::models::config::ServerConfig;
use crate::routes::{flash_alerts, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::sign_in;

#[get("/auth/signin")]
pub async fn signin_page(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }

    let mut context = Context::new();
    context.insert("alerts", &flash_alerts(&flash_messages));
    render_template(&tera, "auth/signin.html", &context)
}

#[post("/auth/signin")]
pub async fn signin(
    request: HttpRequest,
    client: web::Data<CollectionClient>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SignInForm>,
) -> impl Responder {
    let user = match sign_in(client.get_ref(), &server_config.secret, form).await {
        Ok(user) => user,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/auth/signin");
        }
        Err(err) => {
            log::error!("Sign-in failed: {err}");
            FlashMessage::error("No se pudo iniciar sesión.").send();
            return redirect("/auth/signin");
        }
    };

    if let Err(err) = Identity::login(&request.extensions(), user.token().to_string()) {
        log::error!("Failed to store session for {}: {err}", user.email);
        FlashMessage::error("No se pudo iniciar sesión.").send();
        return redirect("/auth/signin");
    }

    log::info!("{} signed in as {}", user.email, user.role.label());
    FlashMessage::success(format!("Bienvenido, {}.", user.name)).send();
    redirect("/")
}

#[post("/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect("/auth/signin")
}
