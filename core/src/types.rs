//! Records and payloads exchanged with the admin backend.
//!
//! # Design
//! Field names follow the backend's camelCase JSON. Records decode leniently
//! (`#[serde(default)]` on fields the backend may omit in list responses);
//! payloads are strict and always fully populated by form validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::ProductStatus;

/// Record ids are integers: the backend assigns them from a counter and the
/// owner field of a product form is parsed as a number. A record whose id is
/// a JSON string fails to decode.
pub type ProductId = i64;
pub type UserId = i64;

/// Backend timestamps: RFC 3339, or a bare `YYYY-MM-DDTHH:MM:SS[.fff]`
/// read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    const WITHOUT_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(text: &str) -> Option<DateTime<Utc>> {
        match DateTime::parse_from_rfc3339(text) {
            Ok(at) => Some(at.with_timezone(&Utc)),
            Err(_) => NaiveDateTime::parse_from_str(text, WITHOUT_OFFSET)
                .ok()
                .map(|at| at.and_utc()),
        }
    }

    pub fn option<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) => parse(&text)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp `{text}`"))),
        }
    }
}

/// A product as returned by `/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProductStatus,
    pub user_id: UserId,
    #[serde(
        default,
        deserialize_with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub acquisition_date: Option<DateTime<Utc>>,
    /// Owner as nested by the backend; absent until the backend resolves it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ProductOwner>,
}

impl Product {
    /// Overwrite the fields an update submits. Server-derived fields
    /// (`acquisition_date`, `user`) are left as they were.
    pub fn apply(&mut self, update: &ProductUpdate) {
        self.name = update.name.clone();
        self.description = update.description.clone();
        if let Some(status) = update.status {
            self.status = status;
        }
        self.user_id = update.user_id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOwner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
}

/// A user as returned by `/users`. `products` is only present on the
/// single-user fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Password,
    #[serde(
        default,
        deserialize_with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
}

impl User {
    pub fn apply(&mut self, update: &UserPayload) {
        self.name = update.name.clone();
        self.email = update.email.clone();
        self.password = update.password.clone();
        self.registration_date = Some(update.registration_date);
    }
}

/// Password text. The backend takes it in clear, so it serializes as a plain
/// string, but `Debug` never prints it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub status: ProductStatus,
    pub user_id: UserId,
    pub recaptcha_token: String,
}

/// Body of `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    pub user_id: UserId,
}

/// Body of both `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub password: Password,
    pub registration_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    use super::*;

    #[test]
    fn product_decodes_from_list_entry() {
        let product: Product =
            serde_json::from_str(r#"{"id":1,"name":"Drill","status":"new","userId":7}"#).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.status, ProductStatus::New);
        assert_eq!(product.user_id, 7);
        assert!(product.description.is_empty());
        assert!(product.acquisition_date.is_none());
        assert!(product.user.is_none());
    }

    #[test]
    fn product_decodes_nested_owner_and_date() {
        let product: Product = serde_json::from_value(json!({
            "id": 4,
            "name": "Saw",
            "description": "hand saw",
            "status": "defective",
            "userId": 2,
            "acquisitionDate": "2025-01-05T10:30:00.000Z",
            "user": {"id": 2, "name": "Ana", "email": "ana@example.com"}
        }))
        .unwrap();
        assert_eq!(
            product.acquisition_date,
            Some(Utc.with_ymd_and_hms(2025, 1, 5, 10, 30, 0).unwrap())
        );
        assert_eq!(product.user.unwrap().name, "Ana");
    }

    #[test]
    fn timestamp_without_offset_reads_as_utc() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"name":"Drill","status":"new","userId":7,"acquisitionDate":"2025-01-05T10:30:00"}"#,
        )
        .unwrap();
        assert_eq!(
            product.acquisition_date,
            Some(Utc.with_ymd_and_hms(2025, 1, 5, 10, 30, 0).unwrap())
        );

        let user: User = serde_json::from_str(
            r#"{"id":2,"name":"Ana","registrationDate":"2025-03-01T08:15:00.250"}"#,
        )
        .unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 8, 15, 0).unwrap() + Duration::milliseconds(250);
        assert_eq!(user.registration_date, Some(expected));
    }

    #[test]
    fn offset_timestamp_is_normalized_and_null_is_absent() {
        let user: User = serde_json::from_str(
            r#"{"id":2,"name":"Ana","registrationDate":"2025-03-01T10:00:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(
            user.registration_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap())
        );

        let user: User =
            serde_json::from_str(r#"{"id":2,"name":"Ana","registrationDate":null}"#).unwrap();
        assert!(user.registration_date.is_none());
    }

    #[test]
    fn unreadable_timestamp_is_a_decode_error() {
        let result = serde_json::from_str::<Product>(
            r#"{"id":1,"name":"Drill","status":"new","userId":7,"acquisitionDate":"yesterday"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn ids_are_numeric() {
        let result = serde_json::from_str::<Product>(
            r#"{"id":"a1","name":"Drill","status":"new","userId":7}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_product_uses_camel_case() {
        let body = serde_json::to_value(NewProduct {
            name: "Drill".to_string(),
            description: "cordless".to_string(),
            status: ProductStatus::Used,
            user_id: 7,
            recaptcha_token: "tok".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Drill",
                "description": "cordless",
                "status": "used",
                "userId": 7,
                "recaptchaToken": "tok"
            })
        );
    }

    #[test]
    fn product_update_has_no_token() {
        let body = serde_json::to_value(ProductUpdate {
            name: "Drill".to_string(),
            description: "d".to_string(),
            status: Some(ProductStatus::New),
            user_id: 1,
        })
        .unwrap();
        assert!(body.get("recaptchaToken").is_none());
        assert_eq!(body["userId"], 1);
    }

    #[test]
    fn password_is_redacted_in_debug_only() {
        let payload = UserPayload {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: Password::new("hunter2"),
            registration_date: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        };
        assert!(!format!("{payload:?}").contains("hunter2"));
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["password"], "hunter2");
        assert_eq!(body["registrationDate"], "2025-03-01T00:00:00Z");
    }

    #[test]
    fn apply_update_keeps_server_fields() {
        let mut product: Product = serde_json::from_value(json!({
            "id": 1, "name": "Old", "description": "old", "status": "new", "userId": 1,
            "acquisitionDate": "2025-01-01T00:00:00Z", "user": {"name": "Ana"}
        }))
        .unwrap();
        product.apply(&ProductUpdate {
            name: "New".to_string(),
            description: "new".to_string(),
            status: Some(ProductStatus::Used),
            user_id: 9,
        });
        assert_eq!(product.name, "New");
        assert_eq!(product.status, ProductStatus::Used);
        assert_eq!(product.user_id, 9);
        assert!(product.acquisition_date.is_some());
        assert_eq!(product.user.as_ref().map(|u| u.name.as_str()), Some("Ana"));
    }
}
