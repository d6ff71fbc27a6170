use handee_shared::constants::KEY_CATEGORIES;
use handee_shared::CategoryId;

use crate::models::Category;
use crate::store::RecordStore;

impl RecordStore {
    /// Stored categories.  Reading never seeds; see
    /// [`seed::ensure_default_categories`](crate::seed::ensure_default_categories).
    pub fn categories(&self) -> Vec<Category> {
        self.read_collection(KEY_CATEGORIES)
    }

    pub fn category_by_id(&self, id: &CategoryId) -> Option<Category> {
        self.categories().into_iter().find(|c| &c.id == id)
    }

    pub fn add_category(&self, category: Category) {
        self.modify(KEY_CATEGORIES, |categories: &mut Vec<Category>| {
            categories.push(category);
            Some(())
        });
    }

    pub fn delete_category(&self, id: &CategoryId) -> bool {
        self.modify(KEY_CATEGORIES, |categories: &mut Vec<Category>| {
            let before = categories.len();
            categories.retain(|c| &c.id != id);
            Some(categories.len() != before)
        })
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: CategoryId::from(id),
            name: name.to_string(),
            icon: None,
        }
    }

    #[test]
    fn reading_empty_store_does_not_seed() {
        let store = RecordStore::in_memory();
        assert!(store.categories().is_empty());
        assert!(store.categories().is_empty());
    }

    #[test]
    fn add_and_delete() {
        let store = RecordStore::in_memory();
        store.add_category(category("design", "Design"));
        store.add_category(category("music", "Music"));

        assert!(store.delete_category(&CategoryId::from("design")));
        assert!(!store.delete_category(&CategoryId::from("design")));

        let names: Vec<_> = store.categories().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Music"]);
        assert!(store.category_by_id(&CategoryId::from("music")).is_some());
    }
}
