//! The fixed set of expense categories and their display colors.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Expense categories accepted by the ledger.
///
/// Declaration order matches [`CATEGORY_DEFINITIONS`] and is the order of every aggregate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[default]
    #[serde(rename = "Еда")]
    Food,
    #[serde(rename = "Транспорт")]
    Transport,
    #[serde(rename = "Развлечения")]
    Entertainment,
    #[serde(rename = "Счета")]
    Bills,
    #[serde(rename = "Покупки")]
    Shopping,
    #[serde(rename = "Другое")]
    Other,
}

/// Display metadata for a category.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CategoryDefinition {
    pub category: Category,
    pub name: &'static str,
    pub color: &'static str,
}

pub const CATEGORY_DEFINITIONS: [CategoryDefinition; 6] = [
    CategoryDefinition {
        category: Category::Food,
        name: "Еда",
        color: "#FF6384",
    },
    CategoryDefinition {
        category: Category::Transport,
        name: "Транспорт",
        color: "#36A2EB",
    },
    CategoryDefinition {
        category: Category::Entertainment,
        name: "Развлечения",
        color: "#FFCE56",
    },
    CategoryDefinition {
        category: Category::Bills,
        name: "Счета",
        color: "#4BC0C0",
    },
    CategoryDefinition {
        category: Category::Shopping,
        name: "Покупки",
        color: "#9966FF",
    },
    CategoryDefinition {
        category: Category::Other,
        name: "Другое",
        color: "#FF9F40",
    },
];

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Bills,
        Category::Shopping,
        Category::Other,
    ];

    /// Position of the category in the definition table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn definition(self) -> &'static CategoryDefinition {
        &CATEGORY_DEFINITIONS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn color(self) -> &'static str {
        self.definition().color
    }

    /// Looks a category up by its display name, ignoring surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim();
        CATEGORY_DEFINITIONS
            .iter()
            .find(|definition| definition.name == needle)
            .map(|definition| definition.category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::from_name(value).ok_or_else(|| LedgerError::UnknownCategory(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_align_with_declaration_order() {
        for (idx, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), idx);
            assert_eq!(CATEGORY_DEFINITIONS[idx].category, *category);
        }
    }

    #[test]
    fn parses_display_names_and_rejects_unknown() {
        assert_eq!(" Счета ".parse::<Category>().unwrap(), Category::Bills);
        let err = "Groceries".parse::<Category>().expect_err("unknown category");
        assert!(matches!(err, LedgerError::UnknownCategory(name) if name == "Groceries"));
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Category::Shopping).unwrap();
        assert_eq!(json, "\"Покупки\"");
        let parsed: Category = serde_json::from_str("\"Другое\"").unwrap();
        assert_eq!(parsed, Category::Other);
        assert!(serde_json::from_str::<Category>("\"Misc\"").is_err());
    }

    #[test]
    fn default_category_is_first_definition() {
        assert_eq!(Category::default(), CATEGORY_DEFINITIONS[0].category);
        assert_eq!(Category::Food.color(), "#FF6384");
    }
}
