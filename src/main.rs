use anyhow::{Context, bail};
use chrono::Local;
use std::io::Read;
use taskgate::config::AppConfig;
use taskgate::observability::metrics::register_metrics;
use taskgate::observability::tracing::init_tracing;
use taskgate::scheduling::{PriorityScheduler, TaskRecord};

// Reads a JSON array of tasks on stdin and prints them in priority order.
//
//   taskgate [order|pending|upcoming]
fn main() -> anyhow::Result<()> {
    init_tracing(std::env::var("TASKGATE_LOG_JSON").is_ok());
    register_metrics();

    let env = std::env::var("TASKGATE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env).context("loading configuration")?;
    let limit = Some(config.scheduling.default_limit);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading tasks from stdin")?;
    let tasks: Vec<TaskRecord> = serde_json::from_str(&input).context("parsing tasks")?;
    tracing::info!("Loaded {} tasks", tasks.len());

    let mode = std::env::args().nth(1).unwrap_or_else(|| "order".to_string());
    let ordered = match mode.as_str() {
        "order" => PriorityScheduler::order(&tasks, limit)?,
        "pending" => PriorityScheduler::pending(&tasks, limit)?,
        "upcoming" => PriorityScheduler::upcoming(
            &tasks,
            Local::now().date_naive(),
            config.scheduling.upcoming_days,
            limit,
        )?,
        other => bail!("unknown mode {:?}, expected order, pending or upcoming", other),
    };

    println!("{}", serde_json::to_string_pretty(&ordered)?);
    Ok(())
}
