use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use tera::Tera;

use crate::api::CollectionClient;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::maintenance::MaintenanceStatus;
use crate::domain::resource::Resource;
use crate::forms::maintenance::StatusForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::maintenance::{change_status, load_maintenance_page};

#[get("/mantenimientos/{id}")]
pub async fn show_maintenance(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let id = id.into_inner();
    let client = client.with_token(user.token());

    match load_maintenance_page(&client, &user, id, Utc::now().naive_utc()).await {
        Ok(page) => {
            let mut context = base_context(&flash_messages, &user, Resource::Mantenimientos.path());
            context.insert("page", &page);
            render_template(&tera, "maintenance/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Mantenimiento no encontrado.").send();
            redirect("/mantenimientos")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tiene acceso a este mantenimiento.").send();
            redirect("/mantenimientos")
        }
        Err(err) => {
            log::error!("Failed to load maintenance {id}: {err}");
            FlashMessage::error("No se pudo cargar el mantenimiento.").send();
            redirect("/mantenimientos")
        }
    }
}

#[post("/mantenimientos/{id}/estado")]
pub async fn update_status(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    let id = id.into_inner();
    let back = format!("/mantenimientos/{id}");

    let target = match MaintenanceStatus::try_from(form) {
        Ok(target) => target,
        Err(err) => {
            log::warn!("Rejected status form for maintenance {id}: {err}");
            FlashMessage::error("Estado no válido.").send();
            return redirect(&back);
        }
    };

    let client = client.with_token(user.token());
    match change_status(&client, &user, id, target).await {
        Ok(status) => {
            FlashMessage::success(format!("Estado actualizado a {}.", status.label())).send();
        }
        Err(ServiceError::InvalidTransition { from, to }) => {
            FlashMessage::error(format!(
                "No se puede pasar de {} a {}.",
                from.label(),
                to.label()
            ))
            .send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No puede cambiar el estado de este mantenimiento.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Mantenimiento no encontrado.").send();
            return redirect("/mantenimientos");
        }
        Err(err) => {
            log::error!("Failed to change status of maintenance {id}: {err}");
            FlashMessage::error(format!("Error al cambiar el estado: {err}")).send();
        }
    }
    redirect(&back)
}
