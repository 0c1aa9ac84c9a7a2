use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use dinner_core::models::MealRecord;
use dinner_core::session::Confirm;

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            "tomorrow" => Ok(Local::now().date_naive() + chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
            }),
        },
    }
}

pub(crate) fn parse_toggle(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        _ => bail!("Invalid value '{s}'. Use on or off"),
    }
}

pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Confirmation read from stdin. Anything but y/yes (or a read failure) is a no.
pub(crate) struct StdinConfirm {
    pub assume_yes: bool,
}

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N]: ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let stdin = io::stdin();
        match stdin.lock().lines().next() {
            Some(Ok(line)) => is_affirmative(&line),
            _ => false,
        }
    }
}

pub(crate) fn meal_count_label(count: usize) -> String {
    if count == 1 {
        "1 meal".to_string()
    } else {
        format!("{count} meals")
    }
}

pub(crate) fn print_meal_table(meals: &[&MealRecord]) {
    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "Meal")]
        name: String,
        #[tabled(rename = "Last picked")]
        last_picked: String,
        #[tabled(rename = "Picks")]
        picks: u32,
    }

    let rows: Vec<MealRow> = meals
        .iter()
        .map(|m| MealRow {
            name: truncate(&m.name, 40),
            last_picked: m
                .last_picked
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            picks: m.pick_count,
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
