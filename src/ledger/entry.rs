use serde::{Deserialize, Deserializer, Serialize};

use super::category::Category;

/// A categorized expense recorded in a month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseEntry {
    pub amount: f64,
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl ExpenseEntry {
    pub fn new(amount: f64, category: Category, description: impl Into<String>) -> Self {
        Self {
            amount,
            category,
            description: description.into(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }
}

/// An income event recorded in a month. Kept for detail listings only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeEntry {
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl IncomeEntry {
    pub fn new(amount: f64, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_null_description_reads_as_empty() {
        let entry: ExpenseEntry =
            serde_json::from_str(r#"{"amount":12.5,"category":"Еда"}"#).unwrap();
        assert_eq!(entry.description(), None);
        let entry: ExpenseEntry =
            serde_json::from_str(r#"{"amount":1,"category":"Счета","description":null}"#).unwrap();
        assert_eq!(entry.description, "");
        let income: IncomeEntry =
            serde_json::from_str(r#"{"amount":1000,"description":" salary "}"#).unwrap();
        assert_eq!(income.description(), Some("salary"));
    }
}
