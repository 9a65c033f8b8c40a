use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::api::CollectionClient;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::resource::Resource;
use crate::listing::debounce::SearchDebouncer;
use crate::services::ServiceError;
use crate::services::search::{debounce_key, quick_search};

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Quick-search suggestions. Requests superseded by a newer keystroke from
/// the same user answer `204 No Content` without reaching the backend.
#[get("/{resource}/search")]
pub async fn search(
    resource: web::Path<String>,
    params: web::Query<SearchParams>,
    user: AuthenticatedUser,
    client: web::Data<CollectionClient>,
    debouncer: web::Data<SearchDebouncer>,
) -> impl Responder {
    let Ok(resource) = resource.parse::<Resource>() else {
        return HttpResponse::NotFound().finish();
    };

    let client = client.with_token(user.token());
    let source = client.resource(resource);

    let result = with_view!(resource, V => {
        if !debouncer.settle(&debounce_key::<V>(&user)).await {
            return HttpResponse::NoContent().finish();
        }
        quick_search::<V, _>(&source, &user, &params.q).await
    });

    match result {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(ServiceError::Unauthorized) => HttpResponse::Forbidden().finish(),
        Err(err) => {
            log::error!("Quick search on {resource} failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
