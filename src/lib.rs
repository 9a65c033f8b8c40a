//! Workshop console: server-rendered pages over the workshop REST backend.

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::api::CollectionClient;
#[cfg(feature = "server")]
use crate::listing::debounce::SearchDebouncer;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::api::search;
#[cfg(feature = "server")]
use crate::routes::auth::{logout, signin, signin_page};
#[cfg(feature = "server")]
use crate::routes::entity::{delete, show_entity};
#[cfg(feature = "server")]
use crate::routes::forms::{
    create_maintenance, create_vehicle, create_workshop, edit_vehicle, edit_workshop,
    new_maintenance, new_vehicle, new_workshop, update_vehicle, update_workshop,
};
#[cfg(feature = "server")]
use crate::routes::list::show_list;
#[cfg(feature = "server")]
use crate::routes::main::show_index;
#[cfg(feature = "server")]
use crate::routes::maintenance::{show_maintenance, update_status};

pub mod domain;
pub mod listing;
pub mod views;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod notifications;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let client = CollectionClient::new(&server_config.api_base_url)
        .map_err(|e| std::io::Error::other(format!("Invalid backend URL: {e}")))?;
    let client = web::Data::new(client);

    let debouncer = web::Data::new(SearchDebouncer::new(server_config.quick_search_debounce()));

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        server_config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(signin_page)
            .service(signin)
            .service(
                web::scope("/api")
                    .wrap(RedirectUnauthorized)
                    .service(search),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(logout)
                    .service(new_vehicle)
                    .service(new_workshop)
                    .service(new_maintenance)
                    .service(create_vehicle)
                    .service(create_workshop)
                    .service(create_maintenance)
                    .service(edit_vehicle)
                    .service(edit_workshop)
                    .service(update_vehicle)
                    .service(update_workshop)
                    .service(show_maintenance)
                    .service(update_status)
                    .service(show_list)
                    .service(show_entity)
                    .service(delete),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(client.clone())
            .app_data(debouncer.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
