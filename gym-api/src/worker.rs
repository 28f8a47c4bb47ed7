use chrono::{FixedOffset, Utc};
use gym_notify::{next_run_after, BirthdayJob};
use tokio::time::{sleep, Duration};
use tracing::{error, info};

/// Runs the birthday job once a day at `hour:minute` gym-local time.
pub async fn start_birthday_worker(job: BirthdayJob, offset: FixedOffset, hour: u32, minute: u32) {
    info!("Birthday worker started, runs daily at {:02}:{:02} ({})", hour, minute, offset);

    loop {
        let now = Utc::now();
        let Some(next) = next_run_after(now, offset, hour, minute) else {
            error!("Invalid birthday job time {:02}:{:02}, worker stopped", hour, minute);
            return;
        };

        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        sleep(wait).await;

        let now = Utc::now();
        let today = now.with_timezone(&offset).date_naive();
        match job.run(today, now).await {
            Ok(report) => {
                let failed = report.results.iter().filter(|r| !r.success).count();
                info!(
                    "Birthday run for {}: {} birthdays, {} sent, {} failed, {} already greeted",
                    today,
                    report.birthday_count,
                    report.results.len() - failed,
                    failed,
                    report.skipped
                );
            }
            Err(e) => error!("Birthday run for {} failed: {}", today, e),
        }
    }
}
