mod catalog;
mod password_reset_code;
mod user;

pub use catalog::{CatalogItem, CatalogKind, ItemDraft, ProductSet};
pub use password_reset_code::PasswordResetCode;
pub use user::{User, UserProfile};
