use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use tera::Tera;

use taller_console::api::CollectionClient;
use taller_console::middleware::RedirectUnauthorized;
use taller_console::models::config::ServerConfig;
use taller_console::routes::alert_level_to_str;
use taller_console::routes::auth::signin_page;
use taller_console::routes::list::show_list;
use taller_console::routes::main::show_index;

fn server_config() -> ServerConfig {
    serde_json::from_value(serde_json::json!({
        "domain": "localhost",
        "address": "127.0.0.1",
        "port": 8080,
        "templates_dir": "templates/**/*",
        "secret": "secret"
    }))
    .unwrap()
}

fn flash_framework() -> FlashMessagesFramework {
    FlashMessagesFramework::builder(CookieMessageStore::builder(Key::generate()).build()).build()
}

#[actix_web::test]
async fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn anonymous_pages_redirect_to_signin() {
    let app = test::init_service(
        App::new()
            .wrap(flash_framework())
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(show_list),
            )
            .app_data(web::Data::new(Tera::default()))
            .app_data(web::Data::new(
                CollectionClient::new("http://localhost:8081/api").unwrap(),
            ))
            .app_data(web::Data::new(server_config())),
    )
    .await;

    for path in ["/", "/vehiculos?page=2"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/auth/signin"
        );
    }
}

#[actix_web::test]
async fn signin_page_renders_for_anonymous_visitors() {
    let tera = Tera::new("templates/**/*").unwrap();
    let app = test::init_service(
        App::new()
            .wrap(flash_framework())
            .service(signin_page)
            .app_data(web::Data::new(tera))
            .app_data(web::Data::new(server_config())),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/auth/signin").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("action=\"/auth/signin\""));
    assert!(body.contains("name=\"password\""));
}

#[actix_web::test]
async fn list_forms_carry_each_others_state() {
    let tera = Tera::new("templates/**/*").unwrap();
    let context = tera::Context::from_value(serde_json::json!({
        "nav": [],
        "alerts": [],
        "page": {
            "path": "vehiculos",
            "title": "Vehículos",
            "search_term": "ABC",
            "page_size": 10,
            "sort": "placa,asc",
            "filters": [{"key": "marca", "label": "Marca", "kind": {"type": "text"}}],
            "filter_values": {"marca": "Kia"},
            "status": "loaded",
            "create_href": null,
            "table": {"headers": [], "rows": [], "has_actions": false, "footer": null}
        }
    }))
    .unwrap();

    let body = tera.render("list/index.html", &context).unwrap();

    assert!(body.contains(r#"<input type="hidden" name="marca" value="Kia">"#));
    assert!(body.contains(r#"<input type="hidden" name="q" value="ABC">"#));
    assert_eq!(
        body.matches(r#"<input type="hidden" name="sort" value="placa,asc">"#)
            .count(),
        2
    );
}
