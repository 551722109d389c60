//! Access to the REST collections: one call per operation, failures logged
//! and handed back unchanged.
//!
//! # Design
//! A `Resource` names a collection path and the record and payload types
//! that travel over it. The five operations are written once, generically,
//! on `ApiClient`; `Products` and `Users` are the two collections the admin
//! backend exposes. No operation validates its input.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::client::{encode_body, ApiClient};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{NewProduct, Product, ProductId, ProductUpdate, User, UserId, UserPayload};

pub trait Resource {
    /// Collection path, e.g. `/products`.
    const PATH: &'static str;
    /// Singular name used in log events.
    const NAME: &'static str;

    type Id: std::fmt::Display + Copy + PartialEq;
    type Record: DeserializeOwned + Clone;
    type Create: Serialize;
    type Update: Serialize;
}

#[derive(Debug, Clone, Copy)]
pub struct Products;

impl Resource for Products {
    const PATH: &'static str = "/products";
    const NAME: &'static str = "product";

    type Id = ProductId;
    type Record = Product;
    type Create = NewProduct;
    type Update = ProductUpdate;
}

#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Resource for Users {
    const PATH: &'static str = "/users";
    const NAME: &'static str = "user";

    type Id = UserId;
    type Record = User;
    type Create = UserPayload;
    type Update = UserPayload;
}

fn logged<T>(resource: &str, operation: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        error!(resource, operation, error = %e, "request failed");
    }
    result
}

fn item_path<R: Resource>(id: R::Id) -> String {
    format!("{}/{id}", R::PATH)
}

impl<T: Transport> ApiClient<T> {
    /// `GET /{resource}`; the records come back in server order.
    pub fn list_all<R: Resource>(&self) -> Result<Vec<R::Record>, ApiError> {
        logged(R::NAME, "list", self.send(HttpMethod::Get, R::PATH, None))
    }

    /// `GET /{resource}/{id}`
    pub fn get_one<R: Resource>(&self, id: R::Id) -> Result<R::Record, ApiError> {
        logged(R::NAME, "get", self.send(HttpMethod::Get, &item_path::<R>(id), None))
    }

    /// `POST /{resource}`; returns the record as the server stored it.
    pub fn create<R: Resource>(&self, payload: &R::Create) -> Result<R::Record, ApiError> {
        let result = encode_body(payload)
            .and_then(|body| self.send(HttpMethod::Post, R::PATH, Some(body)));
        logged(R::NAME, "create", result)
    }

    /// `PUT /{resource}/{id}`; like `delete`, the body is passed through
    /// undecoded, so a 204 or a partial record still counts as success.
    pub fn update<R: Resource>(&self, id: R::Id, payload: &R::Update) -> Result<Value, ApiError> {
        let result = encode_body(payload)
            .and_then(|body| self.send(HttpMethod::Put, &item_path::<R>(id), Some(body)));
        logged(R::NAME, "update", result)
    }

    /// `DELETE /{resource}/{id}`; the body is passed through, `Null` when
    /// empty.
    pub fn delete<R: Resource>(&self, id: R::Id) -> Result<Value, ApiError> {
        logged(R::NAME, "delete", self.send(HttpMethod::Delete, &item_path::<R>(id), None))
    }
}
