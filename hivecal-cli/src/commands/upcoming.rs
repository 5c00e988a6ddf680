use anyhow::Result;
use hivecal_core::apiary::HiveSource;
use hivecal_core::feed::build_feed;
use owo_colors::OwoColorize;

use super::ScheduleOptions;
use crate::render::{Render, date_label};

pub fn run(source: &impl HiveSource, options: ScheduleOptions, json: bool) -> Result<()> {
    let today = options.now.date_naive();
    let feed = build_feed(source, options.request())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&feed.occurrences)?);
        return Ok(());
    }

    println!("{}", feed.title.bold());

    if feed.occurrences.is_empty() {
        println!("{}", "No inspections due".dimmed());
        return Ok(());
    }

    let overdue = feed.occurrences.iter().filter(|o| o.is_overdue()).count();
    if overdue > 0 {
        println!("{}", format!("{} hive(s) overdue", overdue).red());
    }

    // Occurrences arrive sorted by date, so grouping is a single pass
    let mut current_date = None;
    for occ in &feed.occurrences {
        if current_date != Some(occ.date) {
            println!();
            println!("{}", date_label(occ.date, today).bold());
            current_date = Some(occ.date);
        }
        println!("{}", occ.render());
    }

    Ok(())
}
