//! Form drafts: what the admin has typed so far, and the checks that turn a
//! draft into a request payload.
//!
//! Text stays text until submission; `user_id` in particular is kept as
//! entered so a non-numeric value can be reported instead of silently lost.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::status::StatusLabel;
use crate::types::{NewProduct, Password, Product, ProductUpdate, User, UserId, UserPayload};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub status: Option<StatusLabel>,
    pub user_id: String,
}

/// One edit to a product form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductField {
    Name(String),
    Description(String),
    Status(StatusLabel),
    UserId(String),
}

impl ProductDraft {
    pub fn from_record(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            status: Some(product.status.label()),
            user_id: product.user_id.to_string(),
        }
    }

    pub fn set(&mut self, field: ProductField) {
        match field {
            ProductField::Name(v) => self.name = v,
            ProductField::Description(v) => self.description = v,
            ProductField::Status(v) => self.status = Some(v),
            ProductField::UserId(v) => self.user_id = v,
        }
    }

    /// Checks, in order: every field filled, numeric owner id, completed
    /// verification.
    pub fn to_create(&self, token: Option<&str>) -> Result<NewProduct, ValidationError> {
        let status = match self.status {
            Some(status) if filled(&self.name) && filled(&self.description) && filled(&self.user_id) => status,
            _ => return Err(ValidationError::MissingFields),
        };
        let user_id = parse_user_id(&self.user_id)?;
        let token = verified(token)?;
        Ok(NewProduct {
            name: self.name.clone(),
            description: self.description.clone(),
            status: status.into(),
            user_id,
            recaptcha_token: token.to_string(),
        })
    }

    /// Updates only re-check the owner id and the verification.
    pub fn to_update(&self, token: Option<&str>) -> Result<ProductUpdate, ValidationError> {
        let user_id = parse_user_id(&self.user_id)?;
        verified(token)?;
        Ok(ProductUpdate {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status.map(Into::into),
            user_id,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserField {
    Name(String),
    Email(String),
    Password(String),
}

impl UserDraft {
    pub fn from_record(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
        }
    }

    pub fn set(&mut self, field: UserField) {
        match field {
            UserField::Name(v) => self.name = v,
            UserField::Email(v) => self.email = v,
            UserField::Password(v) => self.password = Password::new(v),
        }
    }

    /// Create and update share the same checks and payload;
    /// `registered_at` is stamped by the caller at submission time.
    pub fn to_payload(
        &self,
        token: Option<&str>,
        registered_at: DateTime<Utc>,
    ) -> Result<UserPayload, ValidationError> {
        if !filled(&self.name) || !filled(&self.email) || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        verified(token)?;
        Ok(UserPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            registration_date: registered_at,
        })
    }
}

fn filled(value: &str) -> bool {
    !value.is_empty()
}

fn parse_user_id(value: &str) -> Result<UserId, ValidationError> {
    value
        .trim()
        .parse::<UserId>()
        .map_err(|_| ValidationError::InvalidUserId)
}

fn verified(token: Option<&str>) -> Result<&str, ValidationError> {
    token
        .filter(|t| !t.is_empty())
        .ok_or(ValidationError::MissingVerification)
}
