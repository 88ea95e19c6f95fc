//! Aggregated statistics display.

use anyhow::Result;
use colored::Colorize;

use moyu_core::history::model::format_duration;
use moyu_infrastructure::config_storage;

use super::open_service;

/// Prints today/week/month totals and progress against the configured goal.
pub async fn run() -> Result<()> {
    let config = config_storage::load_config()?;
    let service = open_service().await?;
    let view = service.stats().await;

    println!("{}", "period      earned       time".bold());
    for (label, summary) in [
        ("today", view.today),
        ("this week", view.week),
        ("this month", view.month),
    ] {
        println!(
            "{label:<10}  ${:>9.2}   {}",
            summary.earned,
            format_duration(summary.seconds)
        );
    }

    match service.goal_progress(config.goal_hours).await {
        Ok(progress) => println!(
            "\ntoday's goal: {:.1}% of {} h",
            progress.percent(),
            config.goal_hours
        ),
        Err(_) => println!("\nno goal set; configure one with `moyu config --goal`"),
    }

    Ok(())
}
