//! Product status in its two forms: the lowercase wire value the backend
//! exchanges, and the Spanish label the admin form shows.
//!
//! Both directions are plain `match` expressions over closed enums, so a new
//! variant on either side fails to compile until it is mapped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wire form: `"new"`, `"used"`, `"defective"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    New,
    Used,
    Defective,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [ProductStatus::New, ProductStatus::Used, ProductStatus::Defective];

    pub fn as_wire(self) -> &'static str {
        match self {
            ProductStatus::New => "new",
            ProductStatus::Used => "used",
            ProductStatus::Defective => "defective",
        }
    }

    pub fn label(self) -> StatusLabel {
        StatusLabel::from(self)
    }
}

/// Display form shown in the product form and detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Nuevo,
    Usado,
    Deteriorado,
}

impl StatusLabel {
    /// Options in the order the form select lists them.
    pub const ALL: [StatusLabel; 3] = [StatusLabel::Nuevo, StatusLabel::Usado, StatusLabel::Deteriorado];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Nuevo => "Nuevo",
            StatusLabel::Usado => "Usado",
            StatusLabel::Deteriorado => "Deteriorado",
        }
    }
}

impl From<ProductStatus> for StatusLabel {
    fn from(status: ProductStatus) -> Self {
        match status {
            ProductStatus::New => StatusLabel::Nuevo,
            ProductStatus::Used => StatusLabel::Usado,
            ProductStatus::Defective => StatusLabel::Deteriorado,
        }
    }
}

impl From<StatusLabel> for ProductStatus {
    fn from(label: StatusLabel) -> Self {
        match label {
            StatusLabel::Nuevo => ProductStatus::New,
            StatusLabel::Usado => ProductStatus::Used,
            StatusLabel::Deteriorado => ProductStatus::Defective,
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for StatusLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}
