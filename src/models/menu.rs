//! Menu catalog
//!
//! Predefined items that can be logged as an expense by name alone.

use super::category::Category;
use super::money::Money;
use crate::error::{PennywiseError, PennywiseResult};

/// A predefined purchase template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub description: &'static str,
    pub price: Money,
    pub category: Category,
}

const fn item(description: &'static str, cents: i64) -> MenuItem {
    MenuItem {
        description,
        price: Money::from_cents(cents),
        category: Category::Food,
    }
}

const ITEMS: [MenuItem; 12] = [
    item("Chicken Rice", 350),
    item("Duck Rice", 400),
    item("Char Kway Teow", 450),
    item("Nasi Lemak", 380),
    item("Laksa", 500),
    item("Fish Soup", 550),
    item("Mee Goreng", 420),
    item("Roti Prata", 200),
    item("Yong Tau Foo", 480),
    item("Economic Rice", 390),
    item("Kopi", 140),
    item("Teh", 140),
];

/// Read-only catalog of menu items
pub struct MenuCatalog;

impl MenuCatalog {
    /// All items, in catalog order
    pub fn items() -> &'static [MenuItem] {
        &ITEMS
    }

    /// Look up an item by description, ignoring case and surrounding spaces
    pub fn find(description: &str) -> PennywiseResult<MenuItem> {
        let needle = description.trim();
        ITEMS
            .iter()
            .find(|item| item.description.eq_ignore_ascii_case(needle))
            .copied()
            .ok_or_else(|| PennywiseError::menu_item_not_found(needle))
    }
}
