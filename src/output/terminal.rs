//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::result::EmpiricalDistribution;

/// Format an empirical distribution and its summary for the terminal.
pub fn format_distribution(dist: &EmpiricalDistribution) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("sampling-dist\n");
    output.push_str(&sep);
    output.push_str("\n\n");

    output.push_str(&format!("  Statistic:  {} (group 1 \u{2212} group 2)\n", dist.statistic));
    output.push_str(&format!("  Group size: {} rows per group\n", dist.group_size));
    if let Some(seed) = dist.seed {
        output.push_str(&format!("  Seed:       {}\n", seed));
    }
    output.push_str(&format!(
        "  Trials:     {} requested, {} successful\n",
        dist.trials_requested,
        dist.len()
    ));

    if dist.dropped_count() > 0 {
        output.push_str(&format!(
            "  {}\n",
            format!(
                "\u{26A0} {} dropped (empty input: {}, zero variance: {}, other: {})",
                dist.dropped_count(),
                dist.dropped.empty_input,
                dist.dropped.degenerate_variance,
                dist.dropped.other
            )
            .yellow()
        ));
    }
    if dist.stopped_early {
        output.push_str(&format!(
            "  {}\n",
            format!("\u{26A0} Stopped early, {} trials skipped", dist.trials_skipped).yellow()
        ));
    }
    output.push('\n');

    match dist.summarize() {
        Ok(s) => {
            output.push_str(&format!("    {:<10}{:>14.6}\n", "mean", s.mean));
            output.push_str(&format!("    {:<10}{:>14.6}\n", "std dev", s.std_dev));
            output.push_str(&format!("    {:<10}{:>14.6}\n", "min", s.min));
            output.push_str(&format!("    {:<10}{:>14.6}\n", "25%", s.q25));
            output.push_str(&format!("    {:<10}{:>14.6}\n", "50%", s.median));
            output.push_str(&format!("    {:<10}{:>14.6}\n", "75%", s.q75));
            output.push_str(&format!("    {:<10}{:>14.6}\n", "max", s.max));
        }
        Err(_) => {
            output.push_str(&format!(
                "  {}\n",
                "\u{2717} No successful trials to summarize".red().bold()
            ));
        }
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output.push_str(&format!("Runtime: {:.3}s\n", dist.runtime_secs));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::make_distribution;

    #[test]
    fn test_format_complete_run() {
        let dist = make_distribution((1..=10).map(|x| x as f64).collect());
        let output = format_distribution(&dist);
        assert!(output.contains("sampling-dist"));
        assert!(output.contains("mean(x)"));
        assert!(output.contains("10 requested, 10 successful"));
        assert!(output.contains("7.750000"));
        assert!(!output.contains("dropped"));
    }

    #[test]
    fn test_format_degraded_run() {
        let mut dist = make_distribution(Vec::new());
        dist.trials_requested = 5;
        dist.dropped.empty_input = 3;
        dist.trials_skipped = 2;
        dist.stopped_early = true;
        let output = format_distribution(&dist);
        assert!(output.contains("3 dropped"));
        assert!(output.contains("2 trials skipped"));
        assert!(output.contains("No successful trials"));
    }
}
