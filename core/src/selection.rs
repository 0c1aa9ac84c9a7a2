use chrono::{Local, NaiveDate};
use rand::Rng;

use crate::models::{MealRecord, SelectionPolicy, SelectionResult};
use crate::registry::MealRegistry;

/// Source of "today" as a local calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The system clock, in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Uniform random index in `[0, n)`. Never called with `n == 0`.
pub trait RandomIndex {
    fn pick(&mut self, n: usize) -> usize;
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngIndex<R>(pub R);

impl RngIndex<rand::rngs::ThreadRng> {
    #[must_use]
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> RandomIndex for RngIndex<R> {
    fn pick(&mut self, n: usize) -> usize {
        self.0.random_range(0..n)
    }
}

/// Replays a fixed list of indices, wrapping around. Values are reduced modulo `n`.
#[derive(Debug, Clone)]
pub struct SequenceIndex {
    values: Vec<usize>,
    next: usize,
}

impl SequenceIndex {
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, next: 0 }
    }
}

impl RandomIndex for SequenceIndex {
    fn pick(&mut self, n: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value % n
    }
}

/// Meals eligible for today's draw.
///
/// With avoid-recent on, anything picked on or after the cutoff is skipped.
/// If that leaves nothing, every meal is eligible again so a non-empty list
/// always yields a suggestion.
#[must_use]
pub fn candidate_pool<'a>(
    meals: &'a [MealRecord],
    policy: &SelectionPolicy,
    today: NaiveDate,
) -> Vec<&'a MealRecord> {
    if !policy.avoid_recent {
        return meals.iter().collect();
    }

    let cutoff = policy.cutoff(today);
    let fresh: Vec<&MealRecord> = meals
        .iter()
        .filter(|m| m.last_picked.is_none_or(|d| d < cutoff))
        .collect();

    if fresh.is_empty() {
        tracing::debug!(%cutoff, "every meal picked recently, falling back to the full list");
        meals.iter().collect()
    } else {
        fresh
    }
}

/// Draw a meal without touching the registry. `None` for an empty list.
pub fn choose_meal(
    meals: &[MealRecord],
    policy: &SelectionPolicy,
    today: NaiveDate,
    rng: &mut dyn RandomIndex,
) -> Option<SelectionResult> {
    if meals.is_empty() {
        return None;
    }
    let pool = candidate_pool(meals, policy, today);
    // Clamp so a misbehaving picker can't index past the pool.
    let index = rng.pick(pool.len()).min(pool.len() - 1);
    let chosen = pool[index];
    Some(SelectionResult {
        chosen_name: chosen.name.clone(),
        as_of_date: today,
    })
}

/// Draw a meal and stamp it as picked today.
pub fn select_meal(
    registry: &mut MealRegistry,
    policy: &SelectionPolicy,
    today: NaiveDate,
    rng: &mut dyn RandomIndex,
) -> Option<SelectionResult> {
    let result = choose_meal(registry.records(), policy, today, rng)?;
    registry.record_pick(&result.chosen_name, result.as_of_date);
    tracing::debug!(meal = %result.chosen_name, date = %result.as_of_date, "meal selected");
    Some(result)
}
