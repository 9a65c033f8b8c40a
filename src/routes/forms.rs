//! Create and edit forms for vehicles, workshops and maintenance requests.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::{Deserialize, Serialize};
use tera::Tera;

use crate::api::CollectionClient;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::resource::Resource;
use crate::domain::vehicle::Vehicle;
use crate::domain::workshop::Workshop;
use crate::dto::entity::FormPageData;
use crate::forms::maintenance::MaintenanceRequestForm;
use crate::forms::vehicle::VehicleForm;
use crate::forms::workshop::WorkshopForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::entity::{ensure_can_create, fetch_for_edit};
use crate::services::{ServiceError, ServiceResult, maintenance, vehicles, workshops};

fn render_form<T: Serialize>(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    resource: Resource,
    template: &str,
    data: FormPageData<T>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, user, resource.path());
    context.insert("form", &data);
    render_template(tera, template, &context)
}

/// Maps a failed form load to a redirect with a flash message.
fn form_unavailable(resource: Resource, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("No tiene permisos para esta acción.").send();
        }
        ServiceError::NotFound => {
            FlashMessage::error("Registro no encontrado.").send();
        }
        err => {
            log::error!("Failed to open {resource} form: {err}");
            FlashMessage::error("No se pudo abrir el formulario.").send();
        }
    }
    redirect(&format!("/{resource}"))
}

/// Redirects after a submission: to the saved record on success, back to
/// the form otherwise.
fn after_save(resource: Resource, result: ServiceResult<i32>, back: &str) -> HttpResponse {
    match result {
        Ok(id) => {
            FlashMessage::success("Cambios guardados.").send();
            redirect(&format!("/{resource}/{id}"))
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("No tiene permisos para esta acción.").send();
            redirect(&format!("/{resource}"))
        }
        Err(err) => {
            log::error!("Failed to save {resource}: {err}");
            FlashMessage::error(format!("Error al guardar: {err}")).send();
            redirect(back)
        }
    }
}

#[get("/vehiculos/nuevo")]
pub async fn new_vehicle(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(err) = ensure_can_create(&user, Resource::Vehiculos) {
        return form_unavailable(Resource::Vehiculos, err);
    }
    let data = FormPageData::<Vehicle> {
        action: "/vehiculos".to_string(),
        title: "Nuevo vehículo".to_string(),
        values: None,
    };
    render_form(&tera, &flash_messages, &user, Resource::Vehiculos, "vehicle/form.html", data)
}

#[post("/vehiculos")]
pub async fn create_vehicle(
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    web::Form(form): web::Form<VehicleForm>,
) -> impl Responder {
    let client = client.with_token(user.token());
    let result = vehicles::create_vehicle(&client, &user, form).await;
    after_save(Resource::Vehiculos, result, "/vehiculos/nuevo")
}

#[get("/vehiculos/{id}/editar")]
pub async fn edit_vehicle(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let id = id.into_inner();
    let client = client.with_token(user.token());
    match fetch_for_edit::<Vehicle, _>(&client, &user, id).await {
        Ok(vehicle) => {
            let data = FormPageData {
                action: format!("/vehiculos/{id}"),
                title: format!("Editar {}", vehicle.placa),
                values: Some(vehicle),
            };
            render_form(&tera, &flash_messages, &user, Resource::Vehiculos, "vehicle/form.html", data)
        }
        Err(err) => form_unavailable(Resource::Vehiculos, err),
    }
}

#[post("/vehiculos/{id}")]
pub async fn update_vehicle(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    web::Form(form): web::Form<VehicleForm>,
) -> impl Responder {
    let id = id.into_inner();
    let client = client.with_token(user.token());
    let result = vehicles::update_vehicle(&client, &user, id, form)
        .await
        .map(|()| id);
    after_save(Resource::Vehiculos, result, &format!("/vehiculos/{id}/editar"))
}

#[get("/talleres/nuevo")]
pub async fn new_workshop(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(err) = ensure_can_create(&user, Resource::Talleres) {
        return form_unavailable(Resource::Talleres, err);
    }
    let data = FormPageData::<Workshop> {
        action: "/talleres".to_string(),
        title: "Nuevo taller".to_string(),
        values: None,
    };
    render_form(&tera, &flash_messages, &user, Resource::Talleres, "workshop/form.html", data)
}

#[post("/talleres")]
pub async fn create_workshop(
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    web::Form(form): web::Form<WorkshopForm>,
) -> impl Responder {
    let client = client.with_token(user.token());
    let result = workshops::create_workshop(&client, &user, form).await;
    after_save(Resource::Talleres, result, "/talleres/nuevo")
}

#[get("/talleres/{id}/editar")]
pub async fn edit_workshop(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let id = id.into_inner();
    let client = client.with_token(user.token());
    match fetch_for_edit::<Workshop, _>(&client, &user, id).await {
        Ok(workshop) => {
            let data = FormPageData {
                action: format!("/talleres/{id}"),
                title: format!("Editar {}", workshop.nombre),
                values: Some(workshop),
            };
            render_form(&tera, &flash_messages, &user, Resource::Talleres, "workshop/form.html", data)
        }
        Err(err) => form_unavailable(Resource::Talleres, err),
    }
}

#[post("/talleres/{id}")]
pub async fn update_workshop(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    web::Form(form): web::Form<WorkshopForm>,
) -> impl Responder {
    let id = id.into_inner();
    let client = client.with_token(user.token());
    let result = workshops::update_workshop(&client, &user, id, form)
        .await
        .map(|()| id);
    after_save(Resource::Talleres, result, &format!("/talleres/{id}/editar"))
}

#[derive(Deserialize)]
pub struct NewMaintenanceParams {
    pub vehiculo_id: Option<i32>,
}

/// Prefilled values of the maintenance request form.
#[derive(Serialize)]
struct RequestDefaults {
    vehiculo_id: Option<i32>,
}

#[get("/mantenimientos/nuevo")]
pub async fn new_maintenance(
    params: web::Query<NewMaintenanceParams>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(err) = ensure_can_create(&user, Resource::Mantenimientos) {
        return form_unavailable(Resource::Mantenimientos, err);
    }
    let data = FormPageData {
        action: "/mantenimientos".to_string(),
        title: "Solicitar mantenimiento".to_string(),
        values: Some(RequestDefaults {
            vehiculo_id: params.vehiculo_id,
        }),
    };
    render_form(
        &tera,
        &flash_messages,
        &user,
        Resource::Mantenimientos,
        "maintenance/form.html",
        data,
    )
}

#[post("/mantenimientos")]
pub async fn create_maintenance(
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    web::Form(form): web::Form<MaintenanceRequestForm>,
) -> impl Responder {
    let client = client.with_token(user.token());
    let back = format!("/mantenimientos/nuevo?vehiculo_id={}", form.vehiculo_id);
    let result = maintenance::create_request(&client, &user, form).await;
    after_save(Resource::Mantenimientos, result, &back)
}
