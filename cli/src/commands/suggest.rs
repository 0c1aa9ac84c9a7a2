use anyhow::Result;
use std::process;

use dinner_core::selection::{Clock, FixedClock, LocalClock, RngIndex};

use super::AppSession;
use super::helpers::{json_error, parse_date};

pub(crate) fn cmd_suggest(session: &mut AppSession, date: Option<String>, json: bool) -> Result<()> {
    let clock: Box<dyn Clock> = match date {
        Some(date) => Box::new(FixedClock(parse_date(Some(date))?)),
        None => Box::new(LocalClock),
    };
    let mut rng = RngIndex::thread();

    let Some(result) = session.suggest(clock.as_ref(), &mut rng) else {
        let message = "No meals to choose from. Add some with `dinner add`";
        if json {
            println!("{}", json_error(message));
        } else {
            eprintln!("{message}");
        }
        process::exit(2);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Tonight is…");
        println!("  {}", result.chosen_name);
    }
    Ok(())
}

pub(crate) fn cmd_stats(session: &AppSession, json: bool) -> Result<()> {
    let stats = session.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if stats.is_empty() {
        eprintln!("No picks yet. Run `dinner suggest` to get started");
        process::exit(2);
    }

    println!("  Total picks:     {}", stats.total_picks);
    if let Some(most) = &stats.most_picked {
        let picks = most.pick_count;
        println!("  Most picked:     {} ({picks}×)", most.name);
    }
    if let Some(oldest) = &stats.longest_avoided {
        let since = oldest
            .last_picked
            .map_or_else(|| "unknown".to_string(), |d| d.to_string());
        println!("  Longest avoided: {} (last {since})", oldest.name);
    }
    Ok(())
}
