//! In-memory store for the two collections.
//!
//! Both sequences live for the process lifetime and use positional identity:
//! an element's address is its index, deleting shifts every later element
//! down by one. Construction happens once in `main` and the store is shared
//! behind an `Arc`.

use crate::models::{coerce_int, is_truthy, Category, Toy};
use serde_json::{Map, Number, Value};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Fields a toy creation payload must carry.
const TOY_FIELD_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Creation payload carries fewer fields than the entity requires. This
    /// is a count check only; field names are not inspected.
    #[error("payload has {got} fields, expected at least {want}")]
    IncompletePayload { got: usize, want: usize },
}

pub struct Store {
    toys: RwLock<Vec<Toy>>,
    categories: RwLock<Vec<Category>>,
}

impl Store {
    /// Store pre-populated with the fixed seed set.
    pub fn seeded() -> Self {
        Self::new(seed_toys(), seed_categories())
    }

    pub fn new(toys: Vec<Toy>, categories: Vec<Category>) -> Self {
        Self {
            toys: RwLock::new(toys),
            categories: RwLock::new(categories),
        }
    }

    pub fn toys(&self) -> Vec<Toy> {
        self.read_toys().clone()
    }

    pub fn toy(&self, index: usize) -> Option<Toy> {
        self.read_toys().get(index).cloned()
    }

    /// Appends a toy built from the payload. Rejects payloads with fewer
    /// than four fields; `category_id` and `price` are best-effort coerced
    /// to integers, never rejected.
    pub fn create_toy(&self, payload: &Map<String, Value>) -> Result<Toy, StoreError> {
        if payload.len() < TOY_FIELD_COUNT {
            return Err(StoreError::IncompletePayload {
                got: payload.len(),
                want: TOY_FIELD_COUNT,
            });
        }
        let toy = Toy {
            category_id: payload.get("category_id").and_then(coerce_int),
            description: string_field(payload, "description"),
            name: string_field(payload, "name"),
            price: payload.get("price").and_then(coerce_int).map(Number::from),
        };
        let mut toys = self.write_toys();
        toys.push(toy);
        Ok(toys[toys.len() - 1].clone())
    }

    /// Replaces the toy at `index` in place. Each payload field is applied
    /// only if present and truthy; otherwise the stored value is kept.
    /// `category_id` and `price` are re-coerced to integers either way, so
    /// a kept fractional price is truncated.
    pub fn update_toy(&self, index: usize, payload: &Map<String, Value>) -> Option<Toy> {
        let mut toys = self.write_toys();
        let current = toys.get(index)?;
        let updated = Toy {
            category_id: match truthy_field(payload, "category_id") {
                Some(value) => coerce_int(value),
                None => current.category_id,
            },
            description: updated_string(payload, "description", &current.description),
            name: updated_string(payload, "name", &current.name),
            price: match truthy_field(payload, "price") {
                Some(value) => coerce_int(value),
                None => current
                    .price
                    .clone()
                    .and_then(|n| coerce_int(&Value::Number(n))),
            }
            .map(Number::from),
        };
        toys[index] = updated.clone();
        Some(updated)
    }

    /// Removes and returns the toy at `index`; later toys shift down one.
    pub fn delete_toy(&self, index: usize) -> Option<Toy> {
        let mut toys = self.write_toys();
        if index < toys.len() {
            Some(toys.remove(index))
        } else {
            None
        }
    }

    pub fn clear_toys(&self) -> Vec<Toy> {
        self.write_toys().clear();
        Vec::new()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.read_categories().clone()
    }

    pub fn category(&self, index: usize) -> Option<Category> {
        self.read_categories().get(index).cloned()
    }

    /// Appends a category built from the payload. Any non-empty payload
    /// passes validation, whatever its field names.
    pub fn create_category(&self, payload: &Map<String, Value>) -> Result<Category, StoreError> {
        if payload.is_empty() {
            return Err(StoreError::IncompletePayload { got: 0, want: 1 });
        }
        let category = Category {
            name: string_field(payload, "name"),
        };
        let mut categories = self.write_categories();
        categories.push(category);
        Ok(categories[categories.len() - 1].clone())
    }

    pub fn update_category(&self, index: usize, payload: &Map<String, Value>) -> Option<Category> {
        let mut categories = self.write_categories();
        let current = categories.get(index)?;
        let updated = Category {
            name: updated_string(payload, "name", &current.name),
        };
        categories[index] = updated.clone();
        Some(updated)
    }

    pub fn delete_category(&self, index: usize) -> Option<Category> {
        let mut categories = self.write_categories();
        if index < categories.len() {
            Some(categories.remove(index))
        } else {
            None
        }
    }

    pub fn clear_categories(&self) -> Vec<Category> {
        self.write_categories().clear();
        Vec::new()
    }

    /// Toys whose `category_id` equals the index of the first category named
    /// `name`, in original order. `None` when no category has that name; an
    /// empty vec when the category exists but owns no toys.
    pub fn toys_in_category(&self, name: &str) -> Option<Vec<Toy>> {
        let index = self
            .read_categories()
            .iter()
            .position(|c| c.name.as_deref() == Some(name))? as i64;
        Some(
            self.read_toys()
                .iter()
                .filter(|toy| toy.category_id == Some(index))
                .cloned()
                .collect(),
        )
    }

    // A poisoned lock still guards usable data; recover the guard.
    fn read_toys(&self) -> RwLockReadGuard<'_, Vec<Toy>> {
        self.toys.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_toys(&self) -> RwLockWriteGuard<'_, Vec<Toy>> {
        self.toys.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_categories(&self) -> RwLockReadGuard<'_, Vec<Category>> {
        self.categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_categories(&self) -> RwLockWriteGuard<'_, Vec<Category>> {
        self.categories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn string_field(payload: &Map<String, Value>, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn truthy_field<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|value| is_truthy(value))
}

fn updated_string(payload: &Map<String, Value>, key: &str, current: &Option<String>) -> Option<String> {
    match truthy_field(payload, key).and_then(Value::as_str) {
        Some(value) => Some(value.to_owned()),
        None => current.clone(),
    }
}

fn seed_toys() -> Vec<Toy> {
    vec![
        Toy {
            category_id: Some(0),
            description: Some("Famous video game platform".to_owned()),
            name: Some("Playstation 4".to_owned()),
            price: Some(Number::from(499)),
        },
        Toy {
            category_id: None,
            description: Some("Pink doll".to_owned()),
            name: Some("Barbie".to_owned()),
            price: Number::from_f64(29.99),
        },
        Toy {
            category_id: Some(1),
            description: Some("Board game $$$".to_owned()),
            name: Some("Monopoly".to_owned()),
            price: Number::from_f64(59.99),
        },
        Toy {
            category_id: Some(2),
            description: Some("A ball to play outside".to_owned()),
            name: Some("Football ball".to_owned()),
            price: Some(Number::from(25)),
        },
        Toy {
            category_id: Some(1),
            description: Some("Board game for smart children".to_owned()),
            name: Some("Chess".to_owned()),
            price: Some(Number::from(25)),
        },
    ]
}

fn seed_categories() -> Vec<Category> {
    ["Video Games", "Board Games", "Outdoor Games"]
        .into_iter()
        .map(|name| Category {
            name: Some(name.to_owned()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().expect("test payload is an object").clone()
    }

    #[test]
    fn create_then_get_returns_the_new_toy() {
        let store = Store::seeded();
        let before = store.toys().len();
        let created = store
            .create_toy(&payload(json!({
                "name": "Minesweeper",
                "description": "Home computer classic",
                "price": "0",
                "category_id": "0"
            })))
            .unwrap();
        assert_eq!(store.toy(before), Some(created.clone()));
        assert_eq!(created.price, Some(Number::from(0)));
        assert_eq!(created.category_id, Some(0));
    }

    #[test]
    fn create_requires_four_fields_by_count_only() {
        let store = Store::seeded();
        let err = store.create_toy(&payload(json!({
            "name": "Mario",
            "description": "Plumber Guy",
            "price": 100
        })));
        assert!(matches!(
            err,
            Err(StoreError::IncompletePayload { got: 3, want: 4 })
        ));

        // Four unrelated fields still pass the count check.
        let created = store
            .create_toy(&payload(json!({ "a": 1, "b": 2, "c": 3, "d": 4 })))
            .unwrap();
        assert_eq!(created.category_id, None);
        assert_eq!(created.name, None);
        assert_eq!(created.price, None);
    }

    #[test]
    fn delete_shifts_later_indices_down() {
        let store = Store::seeded();
        let shifted = store.toy(3).unwrap();
        let removed = store.delete_toy(2).unwrap();
        assert_eq!(removed.name.as_deref(), Some("Monopoly"));
        assert_eq!(store.toy(2), Some(shifted));
        assert_eq!(store.toys().len(), 4);
    }

    #[test]
    fn delete_out_of_bounds_is_none() {
        let store = Store::seeded();
        assert_eq!(store.delete_toy(99), None);
        assert_eq!(store.toys().len(), 5);
    }

    #[test]
    fn clear_then_create_lands_at_index_zero() {
        let store = Store::seeded();
        assert!(store.clear_toys().is_empty());
        assert!(store.toys().is_empty());
        let created = store
            .create_toy(&payload(json!({
                "name": "Yo-yo",
                "description": "Up and down",
                "price": 5,
                "category_id": 2
            })))
            .unwrap();
        assert_eq!(store.toy(0), Some(created));
    }

    #[test]
    fn update_keeps_omitted_and_falsy_fields() {
        let store = Store::seeded();
        // Chess: price 25, category 1.
        let updated = store
            .update_toy(4, &payload(json!({ "name": "Checkers", "price": 0 })))
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Checkers"));
        // price 0 is falsy, so the stored value survives.
        assert_eq!(updated.price, Some(Number::from(25)));
        assert_eq!(
            updated.description.as_deref(),
            Some("Board game for smart children")
        );
        assert_eq!(updated.category_id, Some(1));
    }

    #[test]
    fn update_recoerces_a_kept_fractional_price() {
        let store = Store::seeded();
        // Barbie: price 29.99, category null.
        let updated = store
            .update_toy(1, &payload(json!({ "name": "Ken" })))
            .unwrap();
        assert_eq!(updated.price, Some(Number::from(29)));
        assert_eq!(updated.category_id, None);
    }

    #[test]
    fn update_out_of_bounds_is_none() {
        let store = Store::seeded();
        assert_eq!(store.update_toy(5, &payload(json!({ "name": "X" }))), None);
    }

    #[test]
    fn toys_in_category_returns_matches_in_order() {
        let store = Store::seeded();
        let toys = store.toys_in_category("Board Games").unwrap();
        assert_eq!(
            toys.iter()
                .map(|t| t.name.as_deref().unwrap())
                .collect::<Vec<_>>(),
            ["Monopoly", "Chess"]
        );
    }

    #[test]
    fn toys_in_category_distinguishes_unknown_from_empty() {
        let store = Store::seeded();
        assert_eq!(store.toys_in_category("Dolls"), None);

        store
            .create_category(&payload(json!({ "name": "Puzzles" })))
            .unwrap();
        assert_eq!(store.toys_in_category("Puzzles"), Some(Vec::new()));
    }

    #[test]
    fn category_create_rejects_empty_payload_only() {
        let store = Store::seeded();
        assert!(store.create_category(&Map::new()).is_err());

        // Any single field passes, even an unrelated one.
        let created = store
            .create_category(&payload(json!({ "colour": "red" })))
            .unwrap();
        assert_eq!(created.name, None);
    }

    #[test]
    fn category_update_falls_back_on_falsy_name() {
        let store = Store::seeded();
        let updated = store.update_category(1, &payload(json!({ "name": "" }))).unwrap();
        assert_eq!(updated.name.as_deref(), Some("Board Games"));

        let renamed = store
            .update_category(1, &payload(json!({ "name": "Tabletop" })))
            .unwrap();
        assert_eq!(renamed.name.as_deref(), Some("Tabletop"));
    }

    #[test]
    fn category_delete_shifts_indices_without_cascading() {
        let store = Store::seeded();
        let removed = store.delete_category(0).unwrap();
        assert_eq!(removed.name.as_deref(), Some("Video Games"));
        // "Board Games" is now index 0, so it picks up the toys that still
        // point there; its old toys now answer to "Outdoor Games".
        assert_eq!(
            store
                .toys_in_category("Board Games")
                .unwrap()
                .iter()
                .map(|t| t.name.as_deref().unwrap())
                .collect::<Vec<_>>(),
            ["Playstation 4"]
        );
        assert_eq!(
            store
                .toys_in_category("Outdoor Games")
                .unwrap()
                .iter()
                .map(|t| t.name.as_deref().unwrap())
                .collect::<Vec<_>>(),
            ["Monopoly", "Chess"]
        );
    }
}
