//! The live tracking loop.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;

use moyu_core::goal::GoalProgress;
use moyu_core::history::model::format_duration;
use moyu_infrastructure::config_storage;

use super::open_service;

/// Runs a tracking session until Ctrl-C, then commits and summarizes it.
pub async fn run(salary: Option<f64>, goal: Option<f64>) -> Result<()> {
    let config = config_storage::load_config()?;
    let salary = salary
        .or(config.monthly_salary)
        .context("no salary given; pass --salary or set one with `moyu config --salary`")?;
    let goal_hours = goal.unwrap_or(config.goal_hours);

    let service = open_service().await?;
    service.start(salary).await?;
    println!("{}", "tracking - press Ctrl-C to stop".green());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut refresh = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = refresh.tick() => {
                let snap = service.snapshot().await;
                print!(
                    "\r  {}   earned {}   ",
                    format_duration(snap.elapsed_seconds).bold(),
                    format!("${:.2}", snap.earned).yellow()
                );
                let _ = std::io::stdout().flush();
            }
        }
    }
    println!();

    match service.stop().await? {
        Some(record) => {
            println!(
                "committed {} over {}",
                format!("${:.2}", record.earned).yellow().bold(),
                format_duration(record.seconds)
            );
            match service.goal_progress(goal_hours).await {
                Ok(progress) => println!("today's goal {}", render_goal(&progress, goal_hours)),
                Err(_) => println!("no goal set; configure one with `moyu config --goal`"),
            }
        }
        None => println!("nothing to commit (no full second elapsed)"),
    }

    Ok(())
}

/// Renders the goal bar with the raw percentage next to it.
fn render_goal(progress: &GoalProgress, goal_hours: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (progress.fraction * WIDTH as f64).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled));
    let percent = format!("{:.1}%", progress.percent());
    let percent = if progress.is_met() {
        percent.red().bold()
    } else {
        percent.green()
    };
    format!("[{bar}] {percent} (goal: {goal_hours} h)")
}
