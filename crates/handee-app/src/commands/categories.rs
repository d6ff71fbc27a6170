use handee_shared::CategoryId;
use handee_store::Category;

use crate::commands::blank_fields;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn list_categories(state: &AppState) -> Vec<Category> {
    state.store.categories()
}

/// `"Home Services"` becomes `home-services`.
fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn add_category(state: &AppState, name: &str, icon: Option<String>) -> AppResult<Category> {
    state.require_admin("manage categories")?;

    let missing = blank_fields(&[("name", name)]);
    let id = slug(name);
    if !missing.is_empty() || id.is_empty() {
        return state.fail(AppError::MissingFields(vec!["name"]));
    }

    let category = Category {
        id: CategoryId::from(id),
        name: name.trim().to_string(),
        icon,
    };
    state.store.add_category(category.clone());
    state.notifier.success("Category added");
    Ok(category)
}

pub fn delete_category(state: &AppState, id: &CategoryId) -> AppResult<()> {
    state.require_admin("manage categories")?;

    if !state.store.delete_category(id) {
        return state.fail(AppError::NotFound("Category"));
    }
    state.notifier.success("Category deleted");
    Ok(())
}
