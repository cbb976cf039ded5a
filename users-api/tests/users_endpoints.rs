//! End-to-end behaviour of the `/users` resource through the full router

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use users_api::config::Config;
use users_api::handlers::{PaginationHeader, PAGINATION_HEADER};
use users_api::service_builder::ServiceBuilder;

fn app() -> Router {
    ServiceBuilder::new()
        .with_config(Config::default())
        .without_tracing()
        .build()
        .router()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "users.test")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, "users.test")
        .body(Body::empty())
        .unwrap()
}

fn bare(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn pagination(response: &Response) -> PaginationHeader {
    let raw = response.headers().get(PAGINATION_HEADER).unwrap();
    serde_json::from_slice(raw.as_bytes()).unwrap()
}

async fn create(app: &Router, login: &str, first: &str, last: &str) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/users",
            json!({"login": login, "firstName": first, "lastName": last}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await.as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_then_fetch_returns_full_name() {
    let app = app();
    let response = send(
        &app,
        json_request(
            "POST",
            "/users",
            json!({"login": "ada", "firstName": "Ada", "lastName": "Lovelace"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let id = body_json(response).await.as_str().unwrap().to_string();
    assert_eq!(location, format!("http://users.test/users/{id}"));

    let response = send(&app, get(&format!("/users/{id}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["id"], id.as_str());
    assert_eq!(user["login"], "ada");
    assert_eq!(user["fullName"], "Lovelace Ada");
}

#[tokio::test]
async fn create_rejects_missing_or_null_body() {
    let app = app();

    let empty = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, empty).await.status(), StatusCode::BAD_REQUEST);

    let null = json_request("POST", "/users", Value::Null);
    assert_eq!(send(&app, null).await.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn array_bodies_are_malformed() {
    let app = app();

    let positional = json_request("POST", "/users", json!(["ada", "Ada", "Lovelace"]));
    assert_eq!(send(&app, positional).await.status(), StatusCode::BAD_REQUEST);

    let empty = json_request("POST", "/users", json!([]));
    assert_eq!(send(&app, empty).await.status(), StatusCode::BAD_REQUEST);

    let id = create(&app, "ada", "Ada", "Lovelace").await;
    let replace = json_request("PUT", &format!("/users/{id}"), json!(["grace", "Grace", "Hopper"]));
    assert_eq!(send(&app, replace).await.status(), StatusCode::BAD_REQUEST);

    let meta = pagination(&send(&app, get("/users")).await);
    assert_eq!(meta.total_count, 1);
}

#[tokio::test]
async fn create_reports_login_errors() {
    let app = app();
    let response = send(
        &app,
        json_request("POST", "/users", json!({"login": "ada lovelace"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["errors"]["login"].is_array());
    assert!(body["errors"].get("firstName").is_none());
}

#[tokio::test]
async fn login_punctuation_fails_on_every_endpoint() {
    let app = app();
    let id = create(&app, "ada", "Ada", "Lovelace").await;

    for login in ["a.b", "a b", "a-b", "a@b"] {
        let post = send(
            &app,
            json_request("POST", "/users", json!({"login": login, "firstName": "A", "lastName": "B"})),
        )
        .await;
        assert_eq!(post.status(), StatusCode::UNPROCESSABLE_ENTITY, "POST {login}");

        let put = send(
            &app,
            json_request(
                "PUT",
                &format!("/users/{id}"),
                json!({"login": login, "firstName": "A", "lastName": "B"}),
            ),
        )
        .await;
        assert_eq!(put.status(), StatusCode::UNPROCESSABLE_ENTITY, "PUT {login}");

        let patch = send(
            &app,
            json_request(
                "PATCH",
                &format!("/users/{id}"),
                json!([{"op": "replace", "path": "/login", "value": login}]),
            ),
        )
        .await;
        assert_eq!(patch.status(), StatusCode::UNPROCESSABLE_ENTITY, "PATCH {login}");
    }
}

#[tokio::test]
async fn put_creates_then_replaces() {
    let app = app();
    let id = "3f0d7c52-4b0b-4e49-9a8e-2a7f0f6f1c11";

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/users/{id}"),
            json!({"login": "ada", "firstName": "Ada", "lastName": "Lovelace"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(header::LOCATION));
    assert_eq!(body_json(response).await, json!(id));

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/users/{id}"),
            json!({"login": "countess", "firstName": "Augusta", "lastName": "King"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let user = body_json(send(&app, get(&format!("/users/{id}"))).await).await;
    assert_eq!(user["login"], "countess");
    assert_eq!(user["fullName"], "King Augusta");
}

#[tokio::test]
async fn put_requires_all_fields_and_a_real_id() {
    let app = app();

    let response = send(
        &app,
        json_request(
            "PUT",
            "/users/00000000-0000-0000-0000-000000000000",
            json!({"login": "ada", "firstName": "Ada", "lastName": "Lovelace"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        json_request(
            "PUT",
            "/users/3f0d7c52-4b0b-4e49-9a8e-2a7f0f6f1c11",
            json!({"login": "ada"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["errors"]["firstName"].is_array());
    assert!(body["errors"]["lastName"].is_array());
}

#[tokio::test]
async fn patch_unknown_id_is_not_found() {
    let app = app();
    let response = send(
        &app,
        json_request(
            "PATCH",
            "/users/3f0d7c52-4b0b-4e49-9a8e-2a7f0f6f1c11",
            json!([{"op": "replace", "path": "/login", "value": "x"}]),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_clearing_login_is_rejected_and_not_persisted() {
    let app = app();
    let id = create(&app, "ada", "Ada", "Lovelace").await;

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/users/{id}"),
            json!([
                {"op": "replace", "path": "/lastName", "value": "King"},
                {"op": "replace", "path": "/login", "value": ""}
            ]),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["errors"]["login"].is_array());

    let user = body_json(send(&app, get(&format!("/users/{id}"))).await).await;
    assert_eq!(user["login"], "ada");
    assert_eq!(user["fullName"], "Lovelace Ada");
}

#[tokio::test]
async fn patch_applies_valid_document() {
    let app = app();
    let id = create(&app, "ada", "Ada", "Lovelace").await;

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/users/{id}"))
        .header(header::CONTENT_TYPE, "application/json-patch+json")
        .body(Body::from(
            json!([{"op": "replace", "path": "/firstName", "value": "Augusta"}]).to_string(),
        ))
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::NO_CONTENT);

    let user = body_json(send(&app, get(&format!("/users/{id}"))).await).await;
    assert_eq!(user["fullName"], "Lovelace Augusta");
}

#[tokio::test]
async fn delete_twice_reports_not_found() {
    let app = app();
    let id = create(&app, "ada", "Ada", "Lovelace").await;

    let first = send(&app, bare("DELETE", &format!("/users/{id}"))).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = send(&app, bare("DELETE", &format!("/users/{id}"))).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let fetch = send(&app, get(&format!("/users/{id}"))).await;
    assert_eq!(fetch.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_store_first_page() {
    let app = app();
    let response = send(&app, get("/users?pageNumber=1&pageSize=10")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let meta = pagination(&response);
    assert_eq!(meta.total_count, 0);
    assert_eq!(meta.total_pages, 0);
    assert_eq!(meta.previous_page_link, None);
    assert_eq!(meta.next_page_link, None);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn paging_over_twenty_five_users() {
    let app = app();
    for i in 0..25 {
        create(&app, &format!("user{i}"), "First", "Last").await;
    }

    let response = send(&app, get("/users?pageNumber=1&pageSize=100")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let meta = pagination(&response);
    assert_eq!(meta.page_size, 20);
    assert_eq!(meta.total_pages, 2);
    assert_eq!(meta.previous_page_link, None);
    assert_eq!(
        meta.next_page_link.as_deref(),
        Some("http://users.test/users?pageNumber=2&pageSize=20")
    );
    let items = body_json(response).await;
    assert_eq!(items.as_array().unwrap().len(), 20);
    assert_eq!(items[0]["login"], "user0");

    let response = send(&app, get("/users?pageNumber=2&pageSize=20")).await;
    let meta = pagination(&response);
    assert_eq!(meta.current_page, 2);
    assert_eq!(
        meta.previous_page_link.as_deref(),
        Some("http://users.test/users?pageNumber=1&pageSize=20")
    );
    assert_eq!(meta.next_page_link, None);
    let items = body_json(response).await;
    assert_eq!(items.as_array().unwrap().len(), 5);
    assert_eq!(items[0]["login"], "user20");

    let response = send(&app, get("/users?pageNumber=3&pageSize=20")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_defaults_and_clamps() {
    let app = app();
    for i in 0..12 {
        create(&app, &format!("user{i}"), "First", "Last").await;
    }

    let response = send(&app, get("/users")).await;
    let meta = pagination(&response);
    assert_eq!(meta.current_page, 1);
    assert_eq!(meta.page_size, 10);
    assert_eq!(meta.total_pages, 2);

    let response = send(&app, get("/users?pageNumber=-2&pageSize=0")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let meta = pagination(&response);
    assert_eq!(meta.current_page, 1);
    assert_eq!(meta.page_size, 1);

    let response = send(&app, get("/users?pageSize=ten")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn xml_representation_on_request() {
    let app = app();
    let id = create(&app, "ada", "Ada", "Lovelace").await;

    let request = Request::builder()
        .uri(format!("/users/{id}"))
        .header(header::ACCEPT, "application/xml")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/xml"
    );
    let xml = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(xml.contains("<login>ada</login>"));
    assert!(xml.contains("<fullName>Lovelace Ada</fullName>"));

    let request = Request::builder()
        .uri("/users")
        .header(header::ACCEPT, "text/xml")
        .body(Body::empty())
        .unwrap();
    let xml = String::from_utf8(body_bytes(send(&app, request).await).await).unwrap();
    assert!(xml.starts_with("<users>"));
    assert!(xml.contains("<user>"));
}

#[tokio::test]
async fn xml_request_body_accepted() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/xml")
        .body(Body::from(
            "<user><login>grace</login><firstName>Grace</firstName><lastName>Hopper</lastName></user>",
        ))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await.as_str().unwrap().to_string();

    let user = body_json(send(&app, get(&format!("/users/{id}"))).await).await;
    assert_eq!(user["fullName"], "Hopper Grace");
}

#[tokio::test]
async fn unsupported_accept_is_not_acceptable() {
    let app = app();
    let request = Request::builder()
        .uri("/users")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn empty_accept_defaults_to_json() {
    let app = app();
    let request = Request::builder()
        .uri("/users")
        .header(header::ACCEPT, "")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn unsupported_accept_does_not_create() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::ACCEPT, "image/png")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"login": "ada"}).to_string()))
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::NOT_ACCEPTABLE);

    let meta = pagination(&send(&app, get("/users")).await);
    assert_eq!(meta.total_count, 0);
}

#[tokio::test]
async fn options_and_readiness() {
    let app = app();

    let response = send(&app, bare("OPTIONS", "/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ALLOW).unwrap(),
        "GET,OPTIONS,POST"
    );

    create(&app, "ada", "Ada", "Lovelace").await;
    let ready = body_json(send(&app, get("/ready")).await).await;
    assert_eq!(ready["ready"], true);
    assert_eq!(ready["dependencies"]["store"]["message"], "1 user record(s)");
}
