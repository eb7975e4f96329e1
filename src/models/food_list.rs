//! Food list model
//!
//! The session's ordered list of foods to analyze.

use serde::Serialize;
use thiserror::Error;

/// Reasons a food cannot be added to the list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoodListError {
    #[error("Please type a food name.")]
    EmptyName,

    #[error("Food already in list!")]
    Duplicate(String),
}

/// Ordered, case-insensitively unique list of food names
///
/// Names keep the casing they were entered with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FoodList {
    foods: Vec<String>,
}

impl FoodList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a food, rejecting blank names and case-insensitive duplicates
    pub fn add(&mut self, name: &str) -> Result<&str, FoodListError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FoodListError::EmptyName);
        }
        if self.contains(trimmed) {
            return Err(FoodListError::Duplicate(trimmed.to_string()));
        }
        self.foods.push(trimmed.to_string());
        Ok(self.foods[self.foods.len() - 1].as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.foods.iter().any(|f| f.to_lowercase() == needle)
    }

    pub fn clear(&mut self) {
        self.foods.clear();
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.foods.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order_and_casing() {
        let mut list = FoodList::new();
        list.add("Banana").unwrap();
        list.add("greek Yogurt").unwrap();
        list.add("Spinach").unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Banana", "greek Yogurt", "Spinach"]);
    }

    #[test]
    fn test_duplicate_is_case_insensitive() {
        let mut list = FoodList::new();
        list.add("Banana").unwrap();
        let err = list.add("BANANA").unwrap_err();
        assert_eq!(err, FoodListError::Duplicate("BANANA".to_string()));
        assert_eq!(err.to_string(), "Food already in list!");
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Banana"]);
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut list = FoodList::new();
        assert_eq!(list.add(""), Err(FoodListError::EmptyName));
        assert_eq!(list.add("   "), Err(FoodListError::EmptyName));
        assert!(list.is_empty());
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let mut list = FoodList::new();
        assert_eq!(list.add("  Lentils "), Ok("Lentils"));
        assert!(list.contains("lentils"));
        assert!(list.add("lentils  ").is_err());
    }

    #[test]
    fn test_clear() {
        let mut list = FoodList::new();
        list.add("Egg").unwrap();
        list.add("Milk").unwrap();
        list.clear();
        assert!(list.is_empty());
        list.add("Egg").unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut list = FoodList::new();
        list.add("Egg").unwrap();
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["Egg"]"#);
    }
}
