use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    New,
    Used,
    Defective,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Owner {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: Status,
    pub user_id: i64,
    pub acquisition_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Owner>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub registration_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub status: Status,
    pub user_id: i64,
    pub recaptcha_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: String,
    pub description: String,
    pub status: Option<Status>,
    pub user_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub registration_date: DateTime<Utc>,
}

#[derive(Default)]
pub struct Store {
    last_id: i64,
    products: BTreeMap<i64, Product>,
    users: BTreeMap<i64, User>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// Product as served: owner nested when the user exists.
    fn resolved(&self, product: &Product) -> Product {
        let mut product = product.clone();
        product.user = self.users.get(&product.user_id).map(|u| Owner {
            id: u.id,
            name: u.name.clone(),
        });
        product
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let store = db.read().await;
    Json(store.products.values().map(|p| store.resolved(p)).collect())
}

async fn get_product(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Product>, StatusCode> {
    let store = db.read().await;
    store
        .products
        .get(&id)
        .map(|p| Json(store.resolved(p)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<CreateProduct>,
) -> Result<(StatusCode, Json<Product>), StatusCode> {
    if input.recaptcha_token.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    let product = Product {
        id: store.next_id(),
        name: input.name,
        description: input.description,
        status: input.status,
        user_id: input.user_id,
        acquisition_date: Utc::now(),
        user: None,
    };
    store.products.insert(product.id, product.clone());
    info!(id = product.id, "product created");
    Ok((StatusCode::CREATED, Json(store.resolved(&product))))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    let product = store.products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    product.name = input.name;
    product.description = input.description;
    if let Some(status) = input.status {
        product.status = status;
    }
    product.user_id = input.user_id;
    let product = product.clone();
    Ok(Json(store.resolved(&product)))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    match store.products.remove(&id) {
        Some(_) => {
            info!(id, "product deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(store.users.values().cloned().collect())
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, StatusCode> {
    let store = db.read().await;
    let mut user = store.users.get(&id).cloned().ok_or(StatusCode::NOT_FOUND)?;
    user.products = Some(
        store
            .products
            .values()
            .filter(|p| p.user_id == id)
            .cloned()
            .collect(),
    );
    Ok(Json(user))
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<UserInput>,
) -> (StatusCode, Json<User>) {
    let mut store = db.write().await;
    let user = User {
        id: store.next_id(),
        name: input.name,
        email: input.email,
        password: input.password,
        registration_date: input.registration_date,
        products: None,
    };
    store.users.insert(user.id, user.clone());
    info!(id = user.id, "user created");
    (StatusCode::CREATED, Json(user))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UserInput>,
) -> Result<Json<User>, StatusCode> {
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    user.name = input.name;
    user.email = input.email;
    user.password = input.password;
    user.registration_date = input.registration_date;
    Ok(Json(user.clone()))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    match store.users.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
