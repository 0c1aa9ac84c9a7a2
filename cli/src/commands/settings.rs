use anyhow::Result;

use dinner_core::session::Confirm;

use super::AppSession;
use super::helpers::{meal_count_label, parse_toggle};

pub(crate) fn cmd_avoid_recent(session: &mut AppSession, value: &str, json: bool) -> Result<()> {
    let on = parse_toggle(value)?;
    session.set_avoid_recent(on);

    if json {
        println!("{}", serde_json::to_string_pretty(session.policy())?);
    } else if on {
        let days = session.policy().window_days;
        println!("Avoiding meals picked in the last {days} days");
    } else {
        println!("Recently picked meals can come up again");
    }
    Ok(())
}

pub(crate) fn cmd_defaults(session: &mut AppSession, json: bool) -> Result<()> {
    session.restore_defaults();
    if json {
        println!("{}", serde_json::to_string_pretty(session.registry().records())?);
    } else {
        let count = meal_count_label(session.registry().len());
        println!("Restored default meals ({count})");
    }
    Ok(())
}

pub(crate) fn cmd_clear(session: &mut AppSession, confirm: &mut dyn Confirm, json: bool) -> Result<()> {
    let cleared = session.clear_all(confirm);
    print_confirmed(cleared, "Cleared all meals", json);
    Ok(())
}

pub(crate) fn cmd_reset(session: &mut AppSession, confirm: &mut dyn Confirm, json: bool) -> Result<()> {
    let reset = session.reset(confirm);
    print_confirmed(reset, "Reset meals and settings to defaults", json);
    Ok(())
}

fn print_confirmed(done: bool, message: &str, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "done": done }));
    } else if done {
        println!("{message}");
    } else {
        eprintln!("Cancelled, nothing changed");
    }
}
