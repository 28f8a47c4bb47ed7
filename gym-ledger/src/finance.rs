use chrono::{DateTime, Utc};

use crate::models::{BalanceStatus, BalanceSummary, RevenueReport};

/// Roll client balances up into a revenue report
pub fn revenue_report(summaries: &[BalanceSummary], generated_at: DateTime<Utc>) -> RevenueReport {
    let mut report = RevenueReport {
        generated_at,
        clients: summaries.len(),
        total_due: 0,
        total_collected: 0,
        total_outstanding: 0,
        settled_clients: 0,
        partial_clients: 0,
        unpaid_clients: 0,
    };

    for summary in summaries {
        report.total_due = report.total_due.saturating_add(summary.total_due);
        report.total_collected = report.total_collected.saturating_add(summary.total_paid);
        report.total_outstanding = report.total_outstanding.saturating_add(summary.remaining.max(0));
        match summary.status {
            BalanceStatus::Settled => report.settled_clients += 1,
            BalanceStatus::Partial => report.partial_clients += 1,
            BalanceStatus::Unpaid => report.unpaid_clients += 1,
        }
    }

    report
}
