//! Committed session listing and deletion.

use anyhow::{Result, bail};
use colored::Colorize;

use moyu_core::history::model::format_duration;

use super::open_service;

/// Lists all committed sessions in commit order.
pub async fn run() -> Result<()> {
    let service = open_service().await?;
    let records = service.history().await;

    if records.is_empty() {
        println!("no sessions recorded yet");
        return Ok(());
    }

    for (i, record) in records.iter().enumerate() {
        println!(
            "{:>3}  {}  {}  {}",
            format!("{}", i + 1).bold(),
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            format!("${:>8.2}", record.earned).yellow(),
            format_duration(record.seconds)
        );
    }

    Ok(())
}

/// Deletes the record printed as number `index` by [`run`].
pub async fn delete(index: usize) -> Result<()> {
    if index == 0 {
        bail!("record numbers start at 1");
    }

    let service = open_service().await?;
    let remaining = service.delete_record(index - 1).await?;
    println!("deleted record {index}; {} remaining", remaining.len());

    Ok(())
}
