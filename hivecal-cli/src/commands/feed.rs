use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use hivecal_core::apiary::HiveSource;
use hivecal_core::feed::build_feed;

use super::ScheduleOptions;

pub fn run(source: &impl HiveSource, options: ScheduleOptions, output: Option<&Path>) -> Result<()> {
    let feed = build_feed(source, options.request())?;

    match output {
        Some(path) => {
            std::fs::write(path, &feed.body)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!(
                "Wrote {} inspections to {}",
                feed.occurrences.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(feed.body.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
