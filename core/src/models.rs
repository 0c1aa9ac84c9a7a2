use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// Number of calendar days a picked meal stays "recent".
pub const RECENCY_WINDOW_DAYS: i64 = 7;

/// Meals a fresh install starts with, in insertion order.
pub const DEFAULT_MEALS: &[&str] = &[
    "Tacos",
    "Stir-fry",
    "Pasta",
    "Curry",
    "Pizza",
    "Burgers",
    "Roast chicken",
];

/// One-tap suggestions offered for meals not yet in the list.
pub const QUICK_ADD_MEALS: &[&str] = &[
    "Tacos",
    "Stir-fry",
    "Pasta",
    "Curry",
    "Pizza",
    "Burgers",
    "Salad",
    "Soup",
    "Sushi",
    "Roast chicken",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_picked: Option<NaiveDate>,
    pub pick_count: u32,
}

impl MealRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_picked: None,
            pick_count: 0,
        }
    }

    #[must_use]
    pub fn was_picked(&self) -> bool {
        self.pick_count > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPolicy {
    pub avoid_recent: bool,
    pub window_days: i64,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            avoid_recent: true,
            window_days: RECENCY_WINDOW_DAYS,
        }
    }
}

impl SelectionPolicy {
    #[must_use]
    pub fn with_avoid_recent(avoid_recent: bool) -> Self {
        Self {
            avoid_recent,
            ..Self::default()
        }
    }

    /// First day that still counts as "recent". Anything picked strictly
    /// before this date is eligible again.
    #[must_use]
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        today - chrono::Duration::days(self.window_days)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub chosen_name: String,
    pub as_of_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealStats {
    pub total_picks: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_picked: Option<MealRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_avoided: Option<MealRecord>,
}

impl MealStats {
    /// Stats are only worth showing once something has been picked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_picks == 0
    }
}

/// Everything that survives between runs: the meal list and the avoid-recent toggle.
///
/// Only serialized directly; reading goes through [`StoredState::parse`] so
/// stored data is always sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub meals: Vec<MealRecord>,
    pub avoid_recent: bool,
}

impl StoredState {
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            meals: DEFAULT_MEALS.iter().map(|n| MealRecord::new(*n)).collect(),
            avoid_recent: SelectionPolicy::default().avoid_recent,
        }
    }

    /// Parse a stored payload, sanitizing each meal.
    ///
    /// Returns `None` when the payload is not JSON or does not have the
    /// `{ meals: [...], avoidRecent: bool }` shape. Individual bad meals or
    /// fields are dropped rather than failing the whole payload.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        Self::from_value(&value)
    }

    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let meals = obj.get("meals")?.as_array()?;
        let avoid_recent = obj.get("avoidRecent")?.as_bool()?;

        let mut sanitized: Vec<MealRecord> = Vec::with_capacity(meals.len());
        for raw in meals {
            let Some(meal) = sanitize_meal(raw) else {
                tracing::debug!(?raw, "dropping stored meal without a usable name");
                continue;
            };
            let key = name_key(&meal.name);
            if sanitized.iter().any(|m| name_key(&m.name) == key) {
                tracing::debug!(name = %meal.name, "dropping duplicate stored meal");
                continue;
            }
            sanitized.push(meal);
        }

        Some(Self {
            meals: sanitized,
            avoid_recent,
        })
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn sanitize_meal(raw: &Value) -> Option<MealRecord> {
    let obj = raw.as_object()?;
    let name = obj.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let last_picked = obj
        .get("lastPicked")
        .and_then(Value::as_str)
        .and_then(parse_stored_date);
    let pick_count = obj.get("pickCount").and_then(parse_pick_count).unwrap_or(0);
    Some(MealRecord {
        name: name.to_string(),
        last_picked,
        pick_count,
    })
}

/// Case-insensitive identity used for uniqueness checks.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Parse a stored `YYYY-MM-DD` or `YYYY/MM/DD` date. Rejects anything that is
/// not exactly that shape or that names a day the calendar doesn't have.
#[must_use]
pub fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let is_sep = |b: u8| b == b'-' || b == b'/';
    if !is_sep(bytes[4]) || !is_sep(bytes[7]) {
        return None;
    }
    let all_digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if !all_digits(0..4) || !all_digits(5..7) || !all_digits(8..10) {
        return None;
    }

    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[5..7].parse().ok()?;
    let day: u32 = s[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Accept a stored pick count only if it is a non-negative whole number.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn parse_pick_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
        Some(f as u32)
    } else {
        None
    }
}
