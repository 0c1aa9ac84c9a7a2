use crate::models::{MealRecord, MealStats};

/// Summarize pick history.
///
/// Only meals picked at least once count towards `most_picked` and
/// `longest_avoided`. Both scans keep the first record that reaches the
/// extreme, so ties resolve to iteration order rather than name. A picked
/// meal with no date sorts as older than any dated one.
#[must_use]
pub fn compute_stats(meals: &[MealRecord]) -> MealStats {
    let total_picks = meals.iter().map(|m| u64::from(m.pick_count)).sum();

    let mut most_picked: Option<&MealRecord> = None;
    let mut longest_avoided: Option<&MealRecord> = None;

    for meal in meals.iter().filter(|m| m.was_picked()) {
        if most_picked.is_none_or(|best| meal.pick_count > best.pick_count) {
            most_picked = Some(meal);
        }
        // Option orders None before Some, which is the "missing date is oldest" rule.
        if longest_avoided.is_none_or(|oldest| meal.last_picked < oldest.last_picked) {
            longest_avoided = Some(meal);
        }
    }

    MealStats {
        total_picks,
        most_picked: most_picked.cloned(),
        longest_avoided: longest_avoided.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meal(name: &str, last: Option<NaiveDate>, count: u32) -> MealRecord {
        MealRecord {
            name: name.to_string(),
            last_picked: last,
            pick_count: count,
        }
    }

    fn name_of(record: Option<&MealRecord>) -> Option<&str> {
        record.map(|m| m.name.as_str())
    }

    #[test]
    fn test_total_picks() {
        let meals = vec![
            meal("A", Some(date(2024, 1, 1)), 3),
            meal("B", None, 0),
            meal("C", Some(date(2024, 1, 5)), 2),
        ];
        assert_eq!(compute_stats(&meals).total_picks, 5);
    }

    #[test]
    fn test_nothing_picked() {
        let meals = vec![meal("A", None, 0), meal("B", None, 0)];
        let stats = compute_stats(&meals);
        assert_eq!(stats.total_picks, 0);
        assert!(stats.most_picked.is_none());
        assert!(stats.longest_avoided.is_none());
        assert!(stats.is_empty());

        assert!(compute_stats(&[]).is_empty());
    }

    #[test]
    fn test_most_picked() {
        let meals = vec![
            meal("A", Some(date(2024, 1, 1)), 1),
            meal("B", Some(date(2024, 1, 2)), 5),
            meal("C", Some(date(2024, 1, 3)), 2),
        ];
        assert_eq!(name_of(compute_stats(&meals).most_picked.as_ref()), Some("B"));
    }

    #[test]
    fn test_most_picked_tie_goes_to_first_in_list_order() {
        let meals = vec![
            meal("Ziti", Some(date(2024, 1, 1)), 2),
            meal("Apple pie", Some(date(2024, 1, 2)), 2),
        ];
        assert_eq!(
            name_of(compute_stats(&meals).most_picked.as_ref()),
            Some("Ziti")
        );

        let reversed: Vec<MealRecord> = meals.into_iter().rev().collect();
        assert_eq!(
            name_of(compute_stats(&reversed).most_picked.as_ref()),
            Some("Apple pie")
        );
    }

    #[test]
    fn test_longest_avoided_is_oldest_pick() {
        let meals = vec![
            meal("A", Some(date(2024, 3, 1)), 1),
            meal("Never", None, 0),
            meal("B", Some(date(2024, 1, 15)), 4),
            meal("C", Some(date(2024, 2, 1)), 1),
        ];
        let stats = compute_stats(&meals);
        assert_eq!(name_of(stats.longest_avoided.as_ref()), Some("B"));
    }

    #[test]
    fn test_longest_avoided_tie_goes_to_first() {
        let meals = vec![
            meal("A", Some(date(2024, 1, 1)), 1),
            meal("B", Some(date(2024, 1, 1)), 1),
        ];
        assert_eq!(
            name_of(compute_stats(&meals).longest_avoided.as_ref()),
            Some("A")
        );
    }

    #[test]
    fn test_longest_avoided_undated_pick_wins_regardless_of_position() {
        // Undated but picked: sorts as oldest whether it comes first or last.
        let dated_first = vec![
            meal("Dated", Some(date(2020, 1, 1)), 1),
            meal("Undated", None, 3),
        ];
        let undated_first = vec![
            meal("Undated", None, 3),
            meal("Dated", Some(date(2020, 1, 1)), 1),
        ];
        assert_eq!(
            name_of(compute_stats(&dated_first).longest_avoided.as_ref()),
            Some("Undated")
        );
        assert_eq!(
            name_of(compute_stats(&undated_first).longest_avoided.as_ref()),
            Some("Undated")
        );
    }

    #[test]
    fn test_longest_avoided_two_undated_first_wins() {
        let meals = vec![
            meal("First", None, 1),
            meal("Second", None, 1),
            meal("Dated", Some(date(2019, 6, 1)), 1),
        ];
        assert_eq!(
            name_of(compute_stats(&meals).longest_avoided.as_ref()),
            Some("First")
        );
    }
}
