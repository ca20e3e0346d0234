//! Formatted terminal output for a run.
//!
//! Formatting lives in one place so the analysis code stays clean and output
//! changes stay localized.

use crate::app::pipeline::AnalysisOutput;
use crate::domain::{AnalysisConfig, DominantPeriod, month_abbrev};
use crate::io::sampling::SamplingReport;

/// Dataset stats, sampling problems, monthly table and revenue fractions.
pub fn format_run_summary(run: &AnalysisOutput, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("=== paxspec - Airline Passenger Spectral Report ===\n");
    if !config.label.is_empty() {
        out.push_str(&format!("Label: {}\n", config.label));
    }
    out.push_str(&format!("Input: {}\n", config.input_path.display()));

    if let Some(stats) = &run.ingest.stats {
        out.push_str(&format!(
            "Records: n={} | dates=[{}, {}]\n",
            stats.n_records, stats.first_date, stats.last_date
        ));
        out.push_str(&format!(
            "Passengers: [{:.1}, {:.1}] | Price: [{:.2}, {:.2}] | Revenue total: {:.2}\n",
            stats.number_min, stats.number_max, stats.price_min, stats.price_max, stats.total_revenue
        ));
    }
    out.push_str(&format_sampling(&run.sampling));

    out.push_str("\nMonthly averages:\n");
    out.push_str(&format!("{:<5} {:>12} {:>16}\n", "month", "avg_number", "revenue"));
    out.push_str(&format!("{:-<5} {:-<12} {:-<16}\n", "", "", ""));
    for (month, avg) in &run.monthly_average {
        let revenue = run.monthly_revenue.get(month).copied().unwrap_or(0.0);
        out.push_str(&format!("{:<5} {avg:>12.2} {revenue:>16.2}\n", month_abbrev(*month)));
    }

    out.push_str("\nRevenue fractions:\n");
    out.push_str(&format!(
        "- summer ({}): {:.2}%\n",
        config.summer_months, run.fractions.summer_pct
    ));
    out.push_str(&format!(
        "- autumn ({}): {:.2}%\n",
        config.autumn_months, run.fractions.autumn_pct
    ));

    out.push('\n');
    out.push_str(&format_dominant_periods(&run.dominant));
    out
}

/// Strongest periodic components table.
pub fn format_dominant_periods(periods: &[DominantPeriod]) -> String {
    let mut out = String::from("Dominant periods:\n");
    if periods.is_empty() {
        out.push_str("(none: series too short)\n");
        return out;
    }
    out.push_str(&format!("{:>5} {:>12} {:>12} {:>14}\n", "bin", "freq(1/d)", "period(d)", "power"));
    out.push_str(&format!("{:->5} {:->12} {:->12} {:->14}\n", "", "", "", ""));
    for p in periods {
        out.push_str(&format!(
            "{:>5} {:>12.6} {:>12.2} {:>14.4e}\n",
            p.bin, p.frequency, p.period_days, p.power
        ));
    }
    out
}

fn format_sampling(report: &SamplingReport) -> String {
    if report.is_uniform() {
        return "Sampling: one record per day, no gaps\n".to_string();
    }
    let mut out = format!(
        "Sampling: {} gap(s), {} missing day(s), {} ordering violation(s)\n",
        report.gaps.len(),
        report.missing_days(),
        report.order_violations.len()
    );
    for g in report.gaps.iter().take(5) {
        out.push_str(&format!("  gap: {} -> {} ({} missing)\n", g.after, g.before, g.missing_days));
    }
    if report.gaps.len() > 5 {
        out.push_str(&format!("  ... {} more gap(s)\n", report.gaps.len() - 5));
    }
    out
}
