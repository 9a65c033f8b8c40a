use std::time::Duration;

use actix_web::{
    App, HttpResponse,
    http::{StatusCode, header},
    test, web,
};

use taller_console::api::CollectionClient;
use taller_console::listing::debounce::SearchDebouncer;
use taller_console::middleware::{RedirectUnauthorized, SIGNIN_PATH};
use taller_console::models::config::ServerConfig;
use taller_console::routes::api::search;

fn server_config() -> ServerConfig {
    serde_json::from_value(serde_json::json!({
        "domain": "localhost",
        "address": "127.0.0.1",
        "port": 8000,
        "templates_dir": "templates/**/*",
        "secret": "secret"
    }))
    .unwrap()
}

#[actix_web::test]
async fn anonymous_quick_search_redirects_to_signin() {
    let app = test::init_service(
        App::new()
            .service(web::scope("/api").wrap(RedirectUnauthorized).service(search))
            .app_data(web::Data::new(
                CollectionClient::new("http://localhost:8080/api").unwrap(),
            ))
            .app_data(web::Data::new(SearchDebouncer::new(Duration::from_millis(500))))
            .app_data(web::Data::new(server_config())),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/vehiculos/search?q=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), SIGNIN_PATH);
}

#[actix_web::test]
async fn superseded_search_answer_passes_through() {
    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(RedirectUnauthorized)
                .route("/vehiculos/search", web::get().to(|| async {
                    HttpResponse::NoContent().finish()
                })),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/vehiculos/search?q=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.headers().get(header::LOCATION).is_none());
}

#[actix_web::test]
async fn forbidden_is_not_rewritten() {
    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(RedirectUnauthorized)
                .route("/talleres/search", web::get().to(|| async {
                    HttpResponse::Forbidden().finish()
                })),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/talleres/search")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
