use anyhow::Result;
use chrono::Utc;
use hivecal_core::apiary::HiveSource;
use hivecal_core::config::HivecalConfig;
use hivecal_core::schedule::next_due;
use owo_colors::OwoColorize;

pub fn run(source: &impl HiveSource, config: &HivecalConfig) -> Result<()> {
    let apiaries = source.apiaries()?;

    if apiaries.is_empty() {
        println!(
            "No apiaries found in {}.\n\n\
            Add one as <slug>.toml, for example:\n\n  \
            name = \"Home yard\"\n\n  \
            [[hives]]\n  \
            id = \"h1\"\n  \
            name = \"Queen Bee\"\n  \
            status = \"active\"",
            config.apiary_path().display()
        );
        return Ok(());
    }

    let today = config.today(Utc::now())?;

    for apiary in &apiaries {
        let due: Vec<_> = apiary
            .hives
            .iter()
            .filter_map(|hive| next_due(hive, today))
            .collect();
        let overdue = due.iter().filter(|d| d.overdue).count();

        let mut line = format!(
            "{} {} ({} active / {} hives)",
            apiary.slug.bold(),
            apiary.name,
            due.len(),
            apiary.hives.len()
        );
        if overdue > 0 {
            line.push_str(&format!(" {}", format!("{} overdue", overdue).red()));
        } else if let Some(next) = due.iter().map(|d| d.date).min() {
            line.push_str(&format!(" {}", format!("next {}", next).dimmed()));
        }
        println!("{}", line);
    }

    Ok(())
}
