use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::CollectionClient;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::resource::Resource;
use crate::forms::list::ListParams;
use crate::models::config::ServerConfig;
use crate::notifications::AlertCollector;
use crate::routes::{base_context, extend_alerts, redirect, render_template};
use crate::services::ServiceError;
use crate::services::list::load_list_page;

#[get("/{resource}")]
pub async fn show_list(
    resource: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(resource) = resource.parse::<Resource>() else {
        return HttpResponse::NotFound().finish();
    };

    let client = client.with_token(user.token());
    let source = client.resource(resource);
    let params = ListParams::from_query(query.into_inner());
    let collector = AlertCollector::new();

    let result = with_view!(resource, V => {
        load_list_page::<V, _, _>(&source, &collector, &user, &params, server_config.get_ref()).await
    });

    match result {
        Ok(page) => {
            let mut context = base_context(&flash_messages, &user, resource.path());
            extend_alerts(&mut context, &flash_messages, collector.into_alerts());
            context.insert("page", &page);
            render_template(&tera, "list/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tiene acceso a esta sección.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load {resource} list: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
