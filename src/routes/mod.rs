//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::auth::{AuthenticatedUser, can_view};
use crate::domain::resource::Resource;
use crate::notifications::PageAlert;

/// Runs `$body` with `$view` bound to the entity type listed under
/// `$resource`.
macro_rules! with_view {
    ($resource:expr, $view:ident => $body:expr) => {
        match $resource {
            $crate::domain::resource::Resource::Clientes => {
                type $view = $crate::domain::client::Client;
                $body
            }
            $crate::domain::resource::Resource::Talleres => {
                type $view = $crate::domain::workshop::Workshop;
                $body
            }
            $crate::domain::resource::Resource::Trabajadores => {
                type $view = $crate::domain::workshop::Worker;
                $body
            }
            $crate::domain::resource::Resource::Productos => {
                type $view = $crate::domain::catalog::Product;
                $body
            }
            $crate::domain::resource::Resource::Servicios => {
                type $view = $crate::domain::catalog::Service;
                $body
            }
            $crate::domain::resource::Resource::Mantenimientos => {
                type $view = $crate::domain::maintenance::Maintenance;
                $body
            }
            $crate::domain::resource::Resource::Facturas => {
                type $view = $crate::domain::invoice::Invoice;
                $body
            }
            $crate::domain::resource::Resource::Vehiculos => {
                type $view = $crate::domain::vehicle::Vehicle;
                $body
            }
            $crate::domain::resource::Resource::Alertas => {
                type $view = $crate::domain::alert::Alert;
                $body
            }
        }
    };
}

pub mod api;
pub mod auth;
pub mod entity;
pub mod forms;
pub mod list;
pub mod main;
pub mod maintenance;

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Flash messages carried over from the previous response.
pub fn flash_alerts(flash_messages: &IncomingFlashMessages) -> Vec<PageAlert> {
    flash_messages
        .iter()
        .map(|message| PageAlert {
            message: message.content().to_string(),
            level: alert_level_to_str(&message.level()),
        })
        .collect()
}

#[derive(Serialize)]
struct NavItem {
    path: &'static str,
    title: &'static str,
}

/// Context shared by every page: alerts, the session user and the menu.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
) -> Context {
    let nav: Vec<NavItem> = Resource::ALL
        .into_iter()
        .filter(|resource| can_view(user, *resource))
        .map(|resource| NavItem {
            path: resource.path(),
            title: resource.title(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &flash_alerts(flash_messages));
    context.insert("current_user", user);
    context.insert("role_label", user.role.label());
    context.insert("current_page", current_page);
    context.insert("nav", &nav);
    context
}

/// Appends alerts raised while building the current page.
pub fn extend_alerts(context: &mut Context, flash_messages: &IncomingFlashMessages, raised: Vec<PageAlert>) {
    let mut alerts = flash_alerts(flash_messages);
    alerts.extend(raised);
    context.insert("alerts", &alerts);
}
