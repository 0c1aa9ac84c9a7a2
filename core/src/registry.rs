use std::cmp::Ordering;

use chrono::NaiveDate;
use feruca::Collator;

use crate::models::{DEFAULT_MEALS, MealRecord, QUICK_ADD_MEALS, name_key};

/// Why an `add` did or didn't change the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum AddOutcome {
    Added(String),
    Empty,
    Duplicate(String),
}

impl AddOutcome {
    #[must_use]
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}

/// The user's meal list. Names are unique ignoring case and surrounding
/// whitespace; insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealRegistry {
    meals: Vec<MealRecord>,
}

impl MealRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::from_records(default_records())
    }

    /// Install records verbatim. Callers are responsible for uniqueness.
    #[must_use]
    pub fn from_records(meals: Vec<MealRecord>) -> Self {
        Self { meals }
    }

    #[must_use]
    pub fn records(&self) -> &[MealRecord] {
        &self.meals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MealRecord> {
        self.meals.iter().find(|m| m.name == name)
    }

    /// Case-insensitive lookup, ignoring surrounding whitespace.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&MealRecord> {
        let key = name_key(name);
        self.meals.iter().find(|m| name_key(&m.name) == key)
    }

    pub fn add(&mut self, raw_name: &str) -> AddOutcome {
        let name = raw_name.trim();
        if name.is_empty() {
            return AddOutcome::Empty;
        }
        if let Some(existing) = self.find(name) {
            return AddOutcome::Duplicate(existing.name.clone());
        }
        self.meals.push(MealRecord::new(name));
        AddOutcome::Added(name.to_string())
    }

    /// Remove the meal whose name matches exactly. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.meals.len();
        self.meals.retain(|m| m.name != name);
        self.meals.len() != before
    }

    pub fn replace_all(&mut self, records: Vec<MealRecord>) {
        self.meals = records;
    }

    pub fn clear(&mut self) {
        self.meals.clear();
    }

    pub fn restore_defaults(&mut self) {
        self.meals = default_records();
    }

    /// Records ordered for display by Unicode collation (root locale), exact
    /// name as tie-break.
    #[must_use]
    pub fn sorted_view(&self) -> Vec<&MealRecord> {
        let mut collator = Collator::default();
        let mut view: Vec<&MealRecord> = self.meals.iter().collect();
        view.sort_by(|a, b| compare_names(&mut collator, &a.name, &b.name));
        view
    }

    /// Stamp a pick onto the named meal. Returns `false` if no such meal exists.
    pub fn record_pick(&mut self, name: &str, today: NaiveDate) -> bool {
        match self.meals.iter_mut().find(|m| m.name == name) {
            Some(meal) => {
                meal.last_picked = Some(today);
                meal.pick_count = meal.pick_count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Quick-add suggestions that aren't already on the list.
    #[must_use]
    pub fn quick_add_options(&self) -> Vec<&'static str> {
        QUICK_ADD_MEALS
            .iter()
            .copied()
            .filter(|name| self.find(name).is_none())
            .collect()
    }
}

fn default_records() -> Vec<MealRecord> {
    DEFAULT_MEALS.iter().map(|n| MealRecord::new(*n)).collect()
}

fn compare_names(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(registry: &MealRegistry) -> Vec<&str> {
        registry.records().iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_add_trims_and_appends() {
        let mut registry = MealRegistry::new();
        assert_eq!(
            registry.add("  Butter chicken "),
            AddOutcome::Added("Butter chicken".to_string())
        );
        let meal = registry.get("Butter chicken").unwrap();
        assert_eq!(meal.pick_count, 0);
        assert!(meal.last_picked.is_none());
    }

    #[test]
    fn test_add_rejects_empty() {
        let mut registry = MealRegistry::new();
        assert_eq!(registry.add(""), AddOutcome::Empty);
        assert_eq!(registry.add("   \t"), AddOutcome::Empty);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut registry = MealRegistry::new();
        assert!(registry.add("Tacos").is_added());
        assert_eq!(
            registry.add("tacos "),
            AddOutcome::Duplicate("Tacos".to_string())
        );
        assert_eq!(names(&registry), vec!["Tacos"]);
    }

    #[test]
    fn test_names_stay_unique_after_many_adds() {
        let mut registry = MealRegistry::new();
        for name in ["Pho", "PHO", " pho", "Ramen", "ramen", "Udon", "", "UDON  "] {
            let _ = registry.add(name);
        }
        let mut keys: Vec<String> = registry.records().iter().map(|m| name_key(&m.name)).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert_eq!(names(&registry), vec!["Pho", "Ramen", "Udon"]);
    }

    #[test]
    fn test_remove_exact_match_only() {
        let mut registry = MealRegistry::with_defaults();
        assert!(!registry.remove("tacos"));
        assert!(!registry.remove("Lasagne"));
        assert_eq!(registry.len(), 7);

        assert!(registry.remove("Tacos"));
        assert!(registry.get("Tacos").is_none());
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_replace_all_and_clear() {
        let mut registry = MealRegistry::with_defaults();
        registry.replace_all(vec![MealRecord::new("Soup")]);
        assert_eq!(names(&registry), vec!["Soup"]);

        registry.clear();
        assert!(registry.is_empty());

        registry.restore_defaults();
        assert_eq!(registry.records()[0].name, "Tacos");
        assert_eq!(registry.len(), DEFAULT_MEALS.len());
    }

    #[test]
    fn test_sorted_view_ignores_case_and_keeps_insertion_order() {
        let mut registry = MealRegistry::new();
        for name in ["pizza", "Curry", "burgers", "Arancini"] {
            let _ = registry.add(name);
        }
        let view: Vec<&str> = registry.sorted_view().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(view, vec!["Arancini", "burgers", "Curry", "pizza"]);
        assert_eq!(names(&registry), vec!["pizza", "Curry", "burgers", "Arancini"]);
    }

    #[test]
    fn test_sorted_view_places_accented_names_alphabetically() {
        let mut registry = MealRegistry::new();
        for name in ["Pizza", "Éclair", "Arancini", "Zucchini fritters", "crêpes", "Cacio e pepe"] {
            let _ = registry.add(name);
        }
        let view: Vec<&str> = registry.sorted_view().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            view,
            vec!["Arancini", "Cacio e pepe", "crêpes", "Éclair", "Pizza", "Zucchini fritters"]
        );
    }

    #[test]
    fn test_record_pick() {
        let mut registry = MealRegistry::with_defaults();
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        assert!(registry.record_pick("Curry", today));
        assert!(registry.record_pick("Curry", today));

        let curry = registry.get("Curry").unwrap();
        assert_eq!(curry.pick_count, 2);
        assert_eq!(curry.last_picked, Some(today));
        assert!(
            registry
                .records()
                .iter()
                .filter(|m| m.name != "Curry")
                .all(|m| m.pick_count == 0 && m.last_picked.is_none())
        );

        assert!(!registry.record_pick("Lasagne", today));
    }

    #[test]
    fn test_quick_add_options() {
        let registry = MealRegistry::with_defaults();
        assert_eq!(registry.quick_add_options(), vec!["Salad", "Soup", "Sushi"]);

        let mut registry = MealRegistry::new();
        assert_eq!(registry.quick_add_options().len(), QUICK_ADD_MEALS.len());
        let _ = registry.add("SUSHI");
        assert!(!registry.quick_add_options().contains(&"Sushi"));

        for name in QUICK_ADD_MEALS {
            let _ = registry.add(name);
        }
        assert!(registry.quick_add_options().is_empty());
    }
}
