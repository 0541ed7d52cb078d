use chrono::Local;
use dotenvy::dotenv;
use payment_calendar::{JsonFileStorage, PaymentCalendar, Result, config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_config()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;

    // 4. Open the calendar on the configured payment file
    let storage = JsonFileStorage::new(&app_config.storage_path);
    let calendar = PaymentCalendar::open(app_config.rules, storage);

    // 5. Report today's agenda and the running totals
    let today = Local::now().date_naive();
    let entries = calendar.merged_records_for_date(today);
    info!("{} entries scheduled for {today}", entries.len());
    for entry in &entries {
        info!(
            id = entry.id(),
            synthetic = entry.is_synthetic(),
            status = ?entry.status(),
            amount = entry.amount(),
            "{}: {}",
            entry.recipient(),
            entry.description()
        );
    }

    let summary = calendar.summary();
    info!(
        count = summary.count,
        completed = summary.completed,
        pending = summary.pending,
        total_amount = summary.total_amount,
        pending_amount = summary.pending_amount,
        "Payment summary"
    );

    Ok(())
}
