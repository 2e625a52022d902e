use crate::error::{AppError, Result};
use crate::models::Category;
use crate::store::Store;

/// Look up a category by exact title, creating it on first use.
pub(crate) fn find_or_create_category<S: Store>(store: &mut S, title: &str) -> Result<Category> {
    let existing = store.categories()?;
    if let Some(cat) = Category::find_by_title(&existing, title) {
        return Ok(cat.clone());
    }

    let created = store.insert_categories(&[Category::new(title.to_string())])?;
    let cat = created.into_iter().next().ok_or_else(|| {
        AppError::Inconsistent(format!("category '{title}' was inserted but not returned"))
    })?;
    tracing::info!(id = ?cat.id, title, "category created");
    Ok(cat)
}
