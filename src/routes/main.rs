use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::CollectionClient;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::resource::Resource;
use crate::notifications::AlertCollector;
use crate::routes::{base_context, extend_alerts, render_template};
use crate::services::ServiceError;
use crate::services::dashboard::load_dashboard;

#[get("/")]
pub async fn show_index(
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let client = client.with_token(user.token());
    let collector = AlertCollector::new();

    let dashboard = match load_dashboard(
        &client.resource(Resource::Mantenimientos),
        &client.resource(Resource::Alertas),
        &collector,
        &user,
    )
    .await
    {
        Ok(dashboard) => Some(dashboard),
        Err(ServiceError::Unauthorized) => None,
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "index");
    extend_alerts(&mut context, &flash_messages, collector.into_alerts());
    context.insert("dashboard", &dashboard);
    render_template(&tera, "main/index.html", &context)
}
