use crate::models::{MealStats, SelectionPolicy, SelectionResult, StoredState};
use crate::registry::{AddOutcome, MealRegistry};
use crate::selection::{Clock, RandomIndex, select_meal};
use crate::stats::compute_stats;
use crate::storage::MealStore;

/// Yes/no gate in front of destructive operations.
///
/// The CLI answers from stdin; tests and `--yes` pass a closure.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub const CLEAR_ALL_PROMPT: &str = "Clear all meals? This cannot be undone.";
pub const RESET_PROMPT: &str = "Reset all meals and settings? This cannot be undone.";

/// One running session: the meal list, the selection policy, and the last
/// suggestion. Every mutation is written through to the store; a failed write
/// is logged and the in-memory state stays authoritative.
pub struct Session<S: MealStore> {
    registry: MealRegistry,
    policy: SelectionPolicy,
    suggestion: Option<SelectionResult>,
    store: S,
}

impl<S: MealStore> Session<S> {
    /// Start from whatever the store holds, or the built-in defaults.
    pub fn open(store: S) -> Self {
        let state = store.load().unwrap_or_else(|| {
            tracing::debug!("no stored meals, starting from defaults");
            StoredState::defaults()
        });
        Self {
            registry: MealRegistry::from_records(state.meals),
            policy: SelectionPolicy::with_avoid_recent(state.avoid_recent),
            suggestion: None,
            store,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &MealRegistry {
        &self.registry
    }

    #[must_use]
    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&SelectionResult> {
        self.suggestion.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn state(&self) -> StoredState {
        StoredState {
            meals: self.registry.records().to_vec(),
            avoid_recent: self.policy.avoid_recent,
        }
    }

    #[must_use]
    pub fn stats(&self) -> MealStats {
        compute_stats(self.registry.records())
    }

    pub fn add_meal(&mut self, raw_name: &str) -> AddOutcome {
        let outcome = self.registry.add(raw_name);
        if outcome.is_added() {
            self.persist();
        }
        outcome
    }

    pub fn remove_meal(&mut self, name: &str) -> bool {
        if !self.registry.remove(name) {
            return false;
        }
        if self
            .suggestion
            .as_ref()
            .is_some_and(|s| s.chosen_name == name)
        {
            self.suggestion = None;
        }
        self.persist();
        true
    }

    pub fn set_avoid_recent(&mut self, avoid_recent: bool) {
        self.policy.avoid_recent = avoid_recent;
        self.persist();
    }

    /// Pick tonight's meal. `None` only when the list is empty.
    pub fn suggest(
        &mut self,
        clock: &dyn Clock,
        rng: &mut dyn RandomIndex,
    ) -> Option<SelectionResult> {
        let today = clock.today();
        let result = select_meal(&mut self.registry, &self.policy, today, rng)?;
        self.suggestion = Some(result.clone());
        self.persist();
        Some(result)
    }

    pub fn clear_suggestion(&mut self) {
        self.suggestion = None;
    }

    /// Remove every meal, after confirmation. Returns whether it happened.
    pub fn clear_all(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(CLEAR_ALL_PROMPT) {
            return false;
        }
        self.registry.clear();
        self.suggestion = None;
        self.persist();
        true
    }

    /// Put the default meals back, keeping the current policy.
    pub fn restore_defaults(&mut self) {
        self.registry.restore_defaults();
        self.suggestion = None;
        self.persist();
    }

    /// Default meals and default policy, after confirmation.
    pub fn reset(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            return false;
        }
        self.registry.restore_defaults();
        self.policy = SelectionPolicy::default();
        self.suggestion = None;
        self.persist();
        true
    }

    /// Replace meals and policy wholesale, e.g. from an export file.
    pub fn replace_state(&mut self, state: StoredState) {
        self.registry.replace_all(state.meals);
        self.policy = SelectionPolicy::with_avoid_recent(state.avoid_recent);
        self.suggestion = None;
        self.persist();
    }

    fn persist(&mut self) {
        let state = self.state();
        if let Err(e) = self.store.save(&state) {
            tracing::warn!("failed to save meals, keeping changes in memory: {e:#}");
        }
    }
}
