//! Stored-defaults inspection and editing.

use anyhow::{Result, bail};

use moyu_infrastructure::config_storage;

/// Shows the stored defaults, or updates the ones given.
pub fn run(salary: Option<f64>, goal: Option<f64>) -> Result<()> {
    let mut config = config_storage::load_config()?;

    if salary.is_none() && goal.is_none() {
        match config.monthly_salary {
            Some(salary) => println!("salary:     {salary}"),
            None => println!("salary:     (not set)"),
        }
        println!("goal hours: {}", config.goal_hours);
        return Ok(());
    }

    if let Some(salary) = salary {
        if !salary.is_finite() || salary <= 0.0 {
            bail!("salary must be a positive number");
        }
        config.monthly_salary = Some(salary);
    }

    if let Some(goal) = goal {
        if !goal.is_finite() || goal < 0.0 {
            bail!("goal hours must be non-negative");
        }
        config.goal_hours = goal;
    }

    config_storage::save_config(&config)?;
    println!("configuration saved");

    Ok(())
}
