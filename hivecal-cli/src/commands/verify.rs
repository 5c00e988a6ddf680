use std::path::Path;

use anyhow::{Context, Result};
use hivecal_core::ics::parse_feed;
use owo_colors::OwoColorize;

pub fn run(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read {}", file.display()))?;
    let events = parse_feed(&content)?;

    let bad_ends: Vec<&str> = events
        .iter()
        .filter(|e| e.end != e.start.succ_opt())
        .map(|e| e.uid.as_str())
        .collect();

    if !bad_ends.is_empty() {
        anyhow::bail!(
            "{} event(s) are not single all-day events: {}",
            bad_ends.len(),
            bad_ends.join(", ")
        );
    }

    match (events.first(), events.last()) {
        (Some(first), Some(last)) => println!(
            "{} {} events, {} to {}",
            "✓".green(),
            events.len(),
            first.start,
            last.start
        ),
        _ => println!("{} empty calendar", "✓".green()),
    }

    Ok(())
}
