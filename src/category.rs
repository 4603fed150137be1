//! The fixed lists of expense and income categories.
//!
//! Categories are looked up by ID for display only. A transaction may refer to
//! an ID that is not in either list, in which case the placeholder returned by
//! [Category::unknown] is used.

use crate::transaction::TransactionType;

/// The colour used for categories that are not in the registry.
pub const UNKNOWN_CATEGORY_COLOR: &str = "#F8FAFC";
/// The Font Awesome icon used for categories that are not in the registry.
pub const UNKNOWN_CATEGORY_ICON: &str = "fa-question";

/// How a category is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category<'a> {
    /// The ID stored on transactions, e.g. "food".
    pub id: &'a str,
    /// The display name, prefixed with an emoji.
    pub name: &'a str,
    /// The Font Awesome icon class, e.g. "fa-utensils".
    pub icon: &'a str,
    /// The background colour as a hex string.
    pub color: &'a str,
}

impl<'a> Category<'a> {
    /// The placeholder for an ID that is not in the registry. The ID doubles as the name.
    pub fn unknown(id: &'a str) -> Self {
        Self {
            id,
            name: id,
            icon: UNKNOWN_CATEGORY_ICON,
            color: UNKNOWN_CATEGORY_COLOR,
        }
    }
}

pub const EXPENSE_CATEGORIES: [Category<'static>; 7] = [
    Category {
        id: "food",
        name: "🍽️ Food",
        icon: "fa-utensils",
        color: "#FFD6EC",
    },
    Category {
        id: "transport",
        name: "🚗 Transport",
        icon: "fa-car",
        color: "#D0E8FF",
    },
    Category {
        id: "shopping",
        name: "🛍️ Shopping",
        icon: "fa-bag-shopping",
        color: "#FFF2CC",
    },
    Category {
        id: "home",
        name: "🏠 Home",
        icon: "fa-house",
        color: "#EADCF8",
    },
    Category {
        id: "health",
        name: "💚 Health",
        icon: "fa-heart-pulse",
        color: "#B9F3E4",
    },
    Category {
        id: "entertainment",
        name: "🎮 Entertainment",
        icon: "fa-film",
        color: "#FFE0B5",
    },
    Category {
        id: "other",
        name: "📌 Other",
        icon: "fa-ellipsis",
        color: "#F8FAFC",
    },
];

pub const INCOME_CATEGORIES: [Category<'static>; 5] = [
    Category {
        id: "salary",
        name: "💼 Salary",
        icon: "fa-money-bill-wave",
        color: "#B9F3E4",
    },
    Category {
        id: "bonus",
        name: "🎁 Bonus",
        icon: "fa-gift",
        color: "#FFD6EC",
    },
    Category {
        id: "investment",
        name: "📈 Investment",
        icon: "fa-chart-line",
        color: "#D0E8FF",
    },
    Category {
        id: "freelance",
        name: "💻 Freelance",
        icon: "fa-laptop",
        color: "#EADCF8",
    },
    Category {
        id: "other-income",
        name: "💰 Other",
        icon: "fa-coins",
        color: "#FFF2CC",
    },
];

/// The categories a user may choose from for a transaction of type `kind`.
pub fn categories_for(kind: TransactionType) -> &'static [Category<'static>] {
    match kind {
        TransactionType::Expense => &EXPENSE_CATEGORIES,
        TransactionType::Income => &INCOME_CATEGORIES,
    }
}

/// Find the category with `id` in the list for `kind`.
pub fn find_category(kind: TransactionType, id: &str) -> Option<Category<'static>> {
    categories_for(kind)
        .iter()
        .find(|category| category.id == id)
        .copied()
}

/// Find the category with `id` in either list, expense categories first.
pub fn find_any_category(id: &str) -> Option<Category<'static>> {
    find_category(TransactionType::Expense, id)
        .or_else(|| find_category(TransactionType::Income, id))
}

/// The display details for `id`, or the placeholder if `id` is not in either list.
pub fn display_category(id: &str) -> Category<'_> {
    match find_any_category(id) {
        Some(category) => category,
        None => Category::unknown(id),
    }
}
