//! Request parsing and image storage for news, promotions and sets.

pub mod form;
pub mod storage;

use crate::models::ItemDraft;
use form::CatalogForm;

fn text(form: &CatalogForm, key: &str) -> Option<String> {
    form.fields
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn money(form: &CatalogForm, key: &str) -> Result<Option<f64>, String> {
    let Some(raw) = text(form, key) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
        _ => Err(format!("Invalid {key}: {raw}")),
    }
}

fn flag(form: &CatalogForm, key: &str) -> Result<Option<bool>, String> {
    let Some(raw) = text(form, key) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "f" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(format!("Invalid {key}: {raw}")),
    }
}

/// Typed view of the submitted text fields. Image paths are filled in after storage.
pub fn draft_from_form(form: &CatalogForm) -> Result<ItemDraft, String> {
    Ok(ItemDraft {
        name: text(form, "name"),
        short_description: text(form, "short_description"),
        description: text(form, "description"),
        price: money(form, "price")?,
        discount_price: money(form, "discount_price")?,
        popular: flag(form, "popular")?,
        ready: flag(form, "ready")?,
        wedding: flag(form, "wedding")?,
        images: Vec::new(),
    })
}

/// A new item needs at least a name and a price.
pub fn ensure_creatable(draft: &ItemDraft) -> Result<(), String> {
    if draft.name.is_none() {
        return Err("name is required".to_string());
    }
    if draft.price.is_none() {
        return Err("price is required".to_string());
    }
    Ok(())
}
