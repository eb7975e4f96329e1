//! Food list tools
//!
//! Add, list and clear the foods queued for analysis.

use serde::Serialize;

use crate::models::FoodList;

/// Response for add_food
#[derive(Debug, Serialize)]
pub struct AddFoodResponse {
    pub success: bool,
    pub message: String,
    pub foods: Vec<FoodListEntry>,
}

/// Response for list_foods and clear_foods
#[derive(Debug, Serialize)]
pub struct ListFoodsResponse {
    pub foods: Vec<FoodListEntry>,
    pub total: usize,
}

/// A queued food with its 1-based position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodListEntry {
    pub position: usize,
    pub name: String,
}

fn entries(list: &FoodList) -> Vec<FoodListEntry> {
    list.iter()
        .enumerate()
        .map(|(i, name)| FoodListEntry {
            position: i + 1,
            name: name.to_string(),
        })
        .collect()
}

/// Queue a food; blank names and duplicates are reported, not added
pub fn add_food(list: &mut FoodList, name: &str) -> AddFoodResponse {
    let (success, message) = match list.add(name) {
        Ok(added) => (true, format!("Added '{}'", added)),
        Err(e) => {
            tracing::debug!("Rejected food '{}': {}", name, e);
            (false, e.to_string())
        }
    };
    AddFoodResponse {
        success,
        message,
        foods: entries(list),
    }
}

pub fn list_foods(list: &FoodList) -> ListFoodsResponse {
    ListFoodsResponse {
        foods: entries(list),
        total: list.len(),
    }
}

pub fn clear_foods(list: &mut FoodList) -> ListFoodsResponse {
    list.clear();
    list_foods(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_list() {
        let mut list = FoodList::new();
        let resp = add_food(&mut list, "Banana");
        assert!(resp.success);
        assert_eq!(resp.message, "Added 'Banana'");

        add_food(&mut list, "Spinach");
        let listed = list_foods(&list);
        assert_eq!(listed.total, 2);
        assert_eq!(
            listed.foods,
            vec![
                FoodListEntry { position: 1, name: "Banana".to_string() },
                FoodListEntry { position: 2, name: "Spinach".to_string() },
            ]
        );
    }

    #[test]
    fn test_duplicate_and_blank_rejected() {
        let mut list = FoodList::new();
        add_food(&mut list, "Banana");

        let dup = add_food(&mut list, "banana");
        assert!(!dup.success);
        assert_eq!(dup.message, "Food already in list!");
        assert_eq!(dup.foods.len(), 1);

        let blank = add_food(&mut list, "  ");
        assert!(!blank.success);
        assert_eq!(blank.message, "Please type a food name.");
    }

    #[test]
    fn test_clear() {
        let mut list = FoodList::new();
        add_food(&mut list, "Banana");
        let resp = clear_foods(&mut list);
        assert_eq!(resp.total, 0);
        assert!(resp.foods.is_empty());
        assert!(list.is_empty());
    }
}
