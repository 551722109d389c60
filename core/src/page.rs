//! Per-page view state and the actions that drive it.
//!
//! # Design
//! A `Page` owns everything one admin page shows: the cached collection, the
//! loading flag, the single error message, the form draft, the verification
//! token and which overlay is open. Overlays are one enum, so "form open
//! while the delete confirmation is open" cannot be represented.
//!
//! Reconciliation after mutations is deliberately uneven:
//! - create appends the record the server returned;
//! - update patches the cached record with the submitted fields, without
//!   re-fetching it;
//! - delete re-fetches the whole collection.
//!
//! Every failure ends up as one static Spanish message in `error_message`.
//! The underlying `ApiError` has already been logged by the access layer and
//! is dropped here.
//!
//! Calls are synchronous and one action runs at a time per page.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ValidationError;
use crate::form::{ProductDraft, ProductField, UserDraft, UserField};
use crate::resource::{Products, Resource, Users};
use crate::transport::Transport;
use crate::types::{Product, User};

/// Fixed user-facing text for each failing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub load_failed: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub details_failed: &'static str,
    pub empty: &'static str,
}

/// A resource that has an admin page: how its form works and how an update
/// is folded back into the cache.
pub trait PageResource: Resource {
    type Draft: Default + Clone;
    type Field;

    const MESSAGES: Messages;

    fn id_of(record: &Self::Record) -> Self::Id;
    fn draft_from(record: &Self::Record) -> Self::Draft;
    fn set_field(draft: &mut Self::Draft, field: Self::Field);
    fn validate_create(
        draft: &Self::Draft,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self::Create, ValidationError>;
    fn validate_update(
        draft: &Self::Draft,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self::Update, ValidationError>;
    fn merge(record: &mut Self::Record, update: &Self::Update);
}

/// Pages whose records can be deleted from the UI.
pub trait Deletable: PageResource {
    const DELETE_FAILED: &'static str;
}

impl PageResource for Products {
    type Draft = ProductDraft;
    type Field = ProductField;

    const MESSAGES: Messages = Messages {
        load_failed: "Fallo la carga de los productos. Por favor reinicia.",
        create_failed: "Fallo la creación del producto. Por favor, inténtelo de nuevo.",
        update_failed: "Fallo la actualización del producto. Por favor, inténtelo de nuevo.",
        details_failed: "Fallo la carga de los detalles del producto.",
        empty: "No hay productos en estos momentos",
    };

    fn id_of(record: &Product) -> i64 {
        record.id
    }

    fn draft_from(record: &Product) -> ProductDraft {
        ProductDraft::from_record(record)
    }

    fn set_field(draft: &mut ProductDraft, field: ProductField) {
        draft.set(field);
    }

    fn validate_create(
        draft: &ProductDraft,
        token: Option<&str>,
        _now: DateTime<Utc>,
    ) -> Result<Self::Create, ValidationError> {
        draft.to_create(token)
    }

    fn validate_update(
        draft: &ProductDraft,
        token: Option<&str>,
        _now: DateTime<Utc>,
    ) -> Result<Self::Update, ValidationError> {
        draft.to_update(token)
    }

    fn merge(record: &mut Product, update: &Self::Update) {
        record.apply(update);
    }
}

impl Deletable for Products {
    const DELETE_FAILED: &'static str = "Fallo la eliminación del producto. Por favor, inténtelo de nuevo.";
}

impl PageResource for Users {
    type Draft = UserDraft;
    type Field = UserField;

    const MESSAGES: Messages = Messages {
        load_failed: "Fallo la carga de los usuarios. Por favor reinicia.",
        create_failed: "Fallo la creación del usuario. Por favor, inténtelo de nuevo.",
        update_failed: "Fallo la actualización del usuario. Por favor, inténtelo de nuevo.",
        details_failed: "Fallo la carga de los detalles del usuario.",
        empty: "No hay usuarios registrados en estos momentos.",
    };

    fn id_of(record: &User) -> i64 {
        record.id
    }

    fn draft_from(record: &User) -> UserDraft {
        UserDraft::from_record(record)
    }

    fn set_field(draft: &mut UserDraft, field: UserField) {
        draft.set(field);
    }

    fn validate_create(
        draft: &UserDraft,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self::Create, ValidationError> {
        draft.to_payload(token, now)
    }

    fn validate_update(
        draft: &UserDraft,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self::Update, ValidationError> {
        draft.to_payload(token, now)
    }

    fn merge(record: &mut User, update: &Self::Update) {
        record.apply(update);
    }
}

/// Which modal, if any, is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay<R> {
    None,
    /// Create form when `editing` is `None`, edit form otherwise.
    Form { editing: Option<R> },
    Detail(R),
    DeleteConfirm(R),
}

pub struct Page<R: PageResource, T> {
    client: ApiClient<T>,
    collection: Vec<R::Record>,
    loading: bool,
    error: Option<String>,
    draft: R::Draft,
    token: Option<String>,
    overlay: Overlay<R::Record>,
}

pub type ProductPage<T> = Page<Products, T>;
pub type UserPage<T> = Page<Users, T>;

impl<R: PageResource, T: Transport> Page<R, T> {
    /// A page that has not loaded yet: empty collection, loading.
    pub fn new(client: ApiClient<T>) -> Self {
        Self {
            client,
            collection: Vec::new(),
            loading: true,
            error: None,
            draft: R::Draft::default(),
            token: None,
            overlay: Overlay::None,
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn collection(&self) -> &[R::Record] {
        &self.collection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn verification_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn overlay(&self) -> &Overlay<R::Record> {
        &self.overlay
    }

    pub fn is_form_open(&self) -> bool {
        matches!(self.overlay, Overlay::Form { .. })
    }

    pub fn is_detail_open(&self) -> bool {
        matches!(self.overlay, Overlay::Detail(_))
    }

    pub fn is_delete_confirm_open(&self) -> bool {
        matches!(self.overlay, Overlay::DeleteConfirm(_))
    }

    /// The record under edit; `None` in create mode or with the form closed.
    pub fn editing(&self) -> Option<&R::Record> {
        match &self.overlay {
            Overlay::Form { editing } => editing.as_ref(),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&R::Record> {
        match &self.overlay {
            Overlay::Detail(record) => Some(record),
            _ => None,
        }
    }

    pub fn delete_target(&self) -> Option<&R::Record> {
        match &self.overlay {
            Overlay::DeleteConfirm(record) => Some(record),
            _ => None,
        }
    }

    /// Initial load. On failure the collection stays empty and is not
    /// retried.
    pub fn mount(&mut self) {
        self.loading = true;
        match self.client.list_all::<R>() {
            Ok(records) => self.collection = records,
            Err(_) => self.error = Some(R::MESSAGES.load_failed.to_string()),
        }
        self.loading = false;
    }

    pub fn open_create(&mut self) {
        self.draft = R::Draft::default();
        self.overlay = Overlay::Form { editing: None };
    }

    pub fn open_edit(&mut self, record: &R::Record) {
        self.draft = R::draft_from(record);
        self.overlay = Overlay::Form {
            editing: Some(record.clone()),
        };
    }

    /// Any edit is a fresh attempt, so the error is cleared.
    pub fn edit_field(&mut self, field: R::Field) {
        R::set_field(&mut self.draft, field);
        self.error = None;
    }

    pub fn complete_verification(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
        self.error = None;
    }

    /// The challenge expired; submissions are blocked until it is completed
    /// again.
    pub fn expire_verification(&mut self) {
        self.token = None;
        self.error = None;
    }

    /// Cancel, or the tail of a successful submit. Always resets the draft
    /// and the edit target.
    pub fn close_form(&mut self) {
        if self.is_form_open() {
            self.overlay = Overlay::None;
        }
        self.draft = R::Draft::default();
    }

    /// Submit the open form: create when no record is under edit, update
    /// otherwise. Does nothing if the form is closed.
    pub fn submit(&mut self) {
        let editing = match &self.overlay {
            Overlay::Form { editing } => editing.as_ref().map(R::id_of),
            _ => {
                debug!(resource = R::NAME, "submit ignored: form is not open");
                return;
            }
        };
        match editing {
            None => self.submit_create(),
            Some(id) => self.submit_update(id),
        }
    }

    fn submit_create(&mut self) {
        let payload = match R::validate_create(&self.draft, self.token.as_deref(), Utc::now()) {
            Ok(payload) => payload,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };
        match self.client.create::<R>(&payload) {
            Ok(record) => {
                self.collection.push(record);
                self.close_form();
            }
            Err(_) => self.error = Some(R::MESSAGES.create_failed.to_string()),
        }
    }

    fn submit_update(&mut self, id: R::Id) {
        let payload = match R::validate_update(&self.draft, self.token.as_deref(), Utc::now()) {
            Ok(payload) => payload,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };
        match self.client.update::<R>(id, &payload) {
            Ok(_) => {
                for record in self.collection.iter_mut().filter(|r| R::id_of(r) == id) {
                    R::merge(record, &payload);
                }
                self.close_form();
            }
            Err(_) => self.error = Some(R::MESSAGES.update_failed.to_string()),
        }
    }

    /// Fetch one record and open the detail view. On failure the view stays
    /// closed.
    pub fn show_details(&mut self, id: R::Id) {
        match self.client.get_one::<R>(id) {
            Ok(record) => self.overlay = Overlay::Detail(record),
            Err(_) => self.error = Some(R::MESSAGES.details_failed.to_string()),
        }
    }

    pub fn close_details(&mut self) {
        if self.is_detail_open() {
            self.overlay = Overlay::None;
        }
    }
}

impl<R: Deletable, T: Transport> Page<R, T> {
    pub fn request_delete(&mut self, record: &R::Record) {
        self.overlay = Overlay::DeleteConfirm(record.clone());
    }

    pub fn cancel_delete(&mut self) {
        if self.is_delete_confirm_open() {
            self.overlay = Overlay::None;
        }
    }

    /// Delete the confirmed record, then replace the collection with a fresh
    /// listing. On failure the confirmation stays open.
    pub fn confirm_delete(&mut self) {
        let Some(id) = self.delete_target().map(R::id_of) else {
            return;
        };
        let refreshed = self
            .client
            .delete::<R>(id)
            .and_then(|_| self.client.list_all::<R>());
        match refreshed {
            Ok(records) => {
                self.collection = records;
                self.overlay = Overlay::None;
            }
            Err(_) => self.error = Some(R::DELETE_FAILED.to_string()),
        }
    }
}
