//! Data access and view state for the Sysne products/users admin.
//!
//! # Overview
//! The admin talks to a REST backend exposing `/products` and `/users`. This
//! crate holds everything between the rendered page and the wire: the
//! configured HTTP client, the five CRUD operations per resource, form drafts
//! and their validation, and one state structure per admin page that
//! sequences those calls and folds the results back into a cached list.
//!
//! # Design
//! - Requests and responses are plain data (`http`); a `Transport` performs
//!   the I/O. `UreqTransport` is the blocking production transport.
//! - Access failures are logged with `tracing` and returned; the page turns
//!   them into one fixed Spanish message and discards the detail.
//! - Product status has an exhaustive wire/label mapping in `status`.
//! - Rendering is left to the host; `view` only projects page state into
//!   the texts a host shows.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod page;
pub mod resource;
pub mod status;
pub mod transport;
pub mod types;
pub mod view;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ValidationError};
pub use form::{ProductDraft, ProductField, UserDraft, UserField};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use page::{Deletable, Overlay, Page, PageResource, ProductPage, UserPage};
pub use resource::{Products, Resource, Users};
pub use status::{ProductStatus, StatusLabel};
pub use transport::{Transport, UreqTransport};
pub use types::{NewProduct, Password, Product, ProductOwner, ProductUpdate, User, UserPayload};
pub use view::{ListView, Projection};
