use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::CollectionClient;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::resource::Resource;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::entity::{delete_entity, load_entity_page};

#[get("/{resource}/{id}")]
pub async fn show_entity(
    path: web::Path<(String, i32)>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (resource, id) = path.into_inner();
    let Ok(resource) = resource.parse::<Resource>() else {
        return HttpResponse::NotFound().finish();
    };
    let client = client.with_token(user.token());

    let result = with_view!(resource, V => load_entity_page::<V, _>(&client, &user, id).await);

    match result {
        Ok(page) => {
            let mut context = base_context(&flash_messages, &user, resource.path());
            context.insert("page", &page);
            render_template(&tera, "entity/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Registro no encontrado.").send();
            redirect(&format!("/{resource}"))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tiene acceso a este registro.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load {resource}/{id}: {err}");
            FlashMessage::error("No se pudo cargar el registro.").send();
            redirect(&format!("/{resource}"))
        }
    }
}

#[post("/{resource}/{id}/delete")]
pub async fn delete(
    path: web::Path<(String, i32)>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
) -> impl Responder {
    let (resource, id) = path.into_inner();
    let Ok(resource) = resource.parse::<Resource>() else {
        return HttpResponse::NotFound().finish();
    };
    let client = client.with_token(user.token());

    let result = with_view!(resource, V => delete_entity::<V, _>(&client, &user, id).await);

    match result {
        Ok(()) => {
            FlashMessage::success("Registro eliminado.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Registro no encontrado.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No puede eliminar este registro.").send();
        }
        Err(err) => {
            log::error!("Failed to delete {resource}/{id}: {err}");
            FlashMessage::error(format!("Error al eliminar: {err}")).send();
        }
    }
    redirect(&format!("/{resource}"))
}
