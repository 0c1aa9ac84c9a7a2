use anyhow::Result;
use std::process;

use dinner_core::registry::AddOutcome;

use super::AppSession;
use super::helpers::{json_error, meal_count_label, print_meal_table};

pub(crate) fn cmd_add(session: &mut AppSession, name: &str, json: bool) -> Result<()> {
    match session.add_meal(name) {
        AddOutcome::Added(added) => {
            if json {
                let record = session.registry().get(&added);
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                let count = meal_count_label(session.registry().len());
                println!("Added {added} ({count})");
            }
            Ok(())
        }
        AddOutcome::Empty => {
            report_rejection("Meal name must not be empty", json);
            process::exit(2);
        }
        AddOutcome::Duplicate(existing) => {
            report_rejection(&format!("{existing} is already on the list"), json);
            process::exit(2);
        }
    }
}

pub(crate) fn cmd_remove(session: &mut AppSession, name: &str, json: bool) -> Result<()> {
    if session.remove_meal(name) {
        if json {
            println!("{}", serde_json::json!({ "removed": name }));
        } else {
            println!("Removed {name}");
        }
        return Ok(());
    }

    // Exact match failed; point at the stored spelling if there is one.
    let message = match session.registry().find(name) {
        Some(similar) => format!("No meal named '{name}'. Did you mean '{}'?", similar.name),
        None => format!("No meal named '{name}'"),
    };
    report_rejection(&message, json);
    process::exit(2);
}

pub(crate) fn cmd_list(session: &AppSession, json: bool) -> Result<()> {
    let view = session.registry().sorted_view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No meals yet.");
        return Ok(());
    }

    print_meal_table(&view);
    println!("{}", meal_count_label(view.len()));
    if session.policy().avoid_recent {
        let days = session.policy().window_days;
        println!("Avoiding meals picked in the last {days} days");
    }
    Ok(())
}

pub(crate) fn cmd_quick_add(session: &mut AppSession, name: Option<&str>, json: bool) -> Result<()> {
    let Some(name) = name else {
        let options = session.registry().quick_add_options();
        if json {
            println!("{}", serde_json::to_string_pretty(&options)?);
        } else if options.is_empty() {
            println!("All suggestions added!");
        } else {
            for option in options {
                println!("  + {option}");
            }
        }
        return Ok(());
    };

    let options = session.registry().quick_add_options();
    let Some(option) = options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(name.trim()))
        .copied()
    else {
        let message = if session.registry().find(name).is_some() {
            format!("{} is already on the list", name.trim())
        } else {
            format!(
                "'{name}' is not a quick-add suggestion. Use `dinner add` for custom meals"
            )
        };
        report_rejection(&message, json);
        process::exit(2);
    };

    cmd_add(session, option, json)
}

fn report_rejection(message: &str, json: bool) {
    if json {
        println!("{}", json_error(message));
    } else {
        eprintln!("{message}");
    }
}
