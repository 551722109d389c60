//! What a host renders from a page: the list area and the detail modal, as
//! plain text-bearing structs. No markup, no styling.

use chrono::{DateTime, Utc};

use crate::page::{Page, PageResource};
use crate::resource::{Products, Users};
use crate::status::StatusLabel;
use crate::transport::Transport;
use crate::types::{Product, ProductId, User, UserId};

const MISSING_DATE: &str = "Fecha no disponible";
const OWNER_PENDING: &str = "Usuario cargando";
const NO_PRODUCTS: &str = "No hay productos disponibles para este usuario.";

/// The list area of a page. Loading wins over everything; an error hides
/// the list entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<C> {
    Loading,
    Failed(String),
    Empty(&'static str),
    Cards(Vec<C>),
}

/// How a record is summarized in the list and expanded in the detail modal.
pub trait Projection: PageResource {
    type Card;
    type Details;

    fn card(record: &Self::Record) -> Self::Card;
    fn details(record: &Self::Record) -> Self::Details;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub acquired: String,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub status: StatusLabel,
    pub acquired: String,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    pub id: UserId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub name: String,
    pub email: String,
    pub registered: String,
    pub products: OwnedProducts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedProducts {
    None(&'static str),
    Listed(Vec<ProductDetails>),
}

/// `dd/MM/yyyy HH:mm:ss`, in UTC.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M:%S").to_string()
}

fn format_optional(at: Option<&DateTime<Utc>>) -> String {
    at.map(format_timestamp)
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

fn product_details(product: &Product) -> ProductDetails {
    ProductDetails {
        name: product.name.clone(),
        description: product.description.clone(),
        status: product.status.label(),
        acquired: format_optional(product.acquisition_date.as_ref()),
        owner: product.user.as_ref().map(|u| u.name.clone()),
    }
}

impl Projection for Products {
    type Card = ProductCard;
    type Details = ProductDetails;

    fn card(product: &Product) -> ProductCard {
        ProductCard {
            id: product.id,
            title: product.name.clone(),
            acquired: format_optional(product.acquisition_date.as_ref()),
            owner: match &product.user {
                Some(owner) if !owner.name.is_empty() => format!("Usuario: {}", owner.name),
                _ => OWNER_PENDING.to_string(),
            },
        }
    }

    fn details(product: &Product) -> ProductDetails {
        product_details(product)
    }
}

impl Projection for Users {
    type Card = UserCard;
    type Details = UserDetails;

    fn card(user: &User) -> UserCard {
        UserCard {
            id: user.id,
            title: user.name.clone(),
        }
    }

    fn details(user: &User) -> UserDetails {
        let products = match user.products.as_deref() {
            Some(products) if !products.is_empty() => {
                OwnedProducts::Listed(products.iter().map(product_details).collect())
            }
            _ => OwnedProducts::None(NO_PRODUCTS),
        };
        UserDetails {
            name: user.name.clone(),
            email: user.email.clone(),
            registered: format_optional(user.registration_date.as_ref()),
            products,
        }
    }
}

impl<R: Projection, T: Transport> Page<R, T> {
    pub fn list_view(&self) -> ListView<R::Card> {
        if self.is_loading() {
            return ListView::Loading;
        }
        if let Some(message) = self.error_message() {
            return ListView::Failed(message.to_string());
        }
        if self.collection().is_empty() {
            return ListView::Empty(R::MESSAGES.empty);
        }
        ListView::Cards(self.collection().iter().map(R::card).collect())
    }

    /// Contents of the detail modal, when it is open.
    pub fn detail_view(&self) -> Option<R::Details> {
        self.detail().map(R::details)
    }
}
