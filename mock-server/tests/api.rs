use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Product, Status, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn delete(uri: &str) -> Request<String> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const USER: &str = r#"{"name":"Ana","email":"ana@example.com","password":"pw","registrationDate":"2025-03-01T10:00:00Z"}"#;

// --- list ---

#[tokio::test]
async fn list_products_empty() {
    let resp = app().oneshot(get("/products")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn list_users_empty() {
    let resp = app().oneshot(get("/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_product_returns_201_with_server_fields() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/products",
            r#"{"name":"Drill","description":"cordless","status":"new","userId":7,"recaptchaToken":"tok"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Product = body_json(resp).await;
    assert_eq!(product.name, "Drill");
    assert_eq!(product.status, Status::New);
    assert_eq!(product.id, 1);
    assert!(product.user.is_none());
}

#[tokio::test]
async fn create_product_with_blank_token_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/products",
            r#"{"name":"Drill","description":"d","status":"new","userId":7,"recaptchaToken":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_product_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/products", r#"{"name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_user_returns_201() {
    let resp = app().oneshot(json_request("POST", "/users", USER)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.email, "ana@example.com");
}

// --- get ---

#[tokio::test]
async fn get_product_not_found() {
    let resp = app().oneshot(get("/products/99")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_product_bad_id_returns_400() {
    let resp = app().oneshot(get("/products/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update / delete ---

#[tokio::test]
async fn update_user_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/users/5", USER))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_product_not_found() {
    let resp = app().oneshot(delete("/products/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn product_lifecycle_with_owner() {
    use tower::Service;

    let mut app = app().into_service();

    // owner
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/users", USER))
        .await
        .unwrap();
    let owner: User = body_json(resp).await;

    // create
    let body = format!(
        r#"{{"name":"Lamp","description":"desk lamp","status":"used","userId":{},"recaptchaToken":"tok"}}"#,
        owner.id
    );
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/products", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Product = body_json(resp).await;
    assert_eq!(created.user.as_ref().map(|u| u.name.as_str()), Some("Ana"));
    let id = created.id;

    // user detail nests the product
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/users/{}", owner.id)))
        .await
        .unwrap();
    let detail: User = body_json(resp).await;
    assert_eq!(detail.products.unwrap().len(), 1);

    // list users does not nest products
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/users"))
        .await
        .unwrap();
    let users: Vec<User> = body_json(resp).await;
    assert!(users[0].products.is_none());

    // update without status keeps it
    let body = format!(r#"{{"name":"Lamp","description":"floor lamp","userId":{}}}"#, owner.id);
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/products/{id}"), &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Product = body_json(resp).await;
    assert_eq!(updated.description, "floor lamp");
    assert_eq!(updated.status, Status::Used);
    assert_eq!(updated.acquisition_date, created.acquisition_date);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(delete(&format!("/products/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // list after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/products"))
        .await
        .unwrap();
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}
