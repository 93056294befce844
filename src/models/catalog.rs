use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three catalog resources. Each maps to its own table and upload folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    News,
    Promotions,
    Sets,
}

impl CatalogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::News => "news",
            CatalogKind::Promotions => "promotions",
            CatalogKind::Sets => "sets",
        }
    }
}

/// A row of `news` or `promotions`; both tables share this layout.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    pub name: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ProductSet {
    pub id: Uuid,
    pub name: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub popular: bool,
    pub ready: bool,
    pub wedding: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Submitted fields for a create or update. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discount_price: Option<f64>,
    pub popular: Option<bool>,
    pub ready: Option<bool>,
    pub wedding: Option<bool>,
    pub images: Vec<String>,
}
