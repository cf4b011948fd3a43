// Helper functions.

use simplelog::LevelFilter;

use crate::seed::SeedSummary;

// Shorten to at most `max_chars` characters, ending in "..." when cut.
pub(crate) fn truncate_string(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(kept).collect();
    truncated.push_str(&"..."[..max_chars - kept]);
    truncated
}

// Map the number of -v flags to a log level: info by default, then debug, then trace.
pub(crate) fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

// Display the outcome of a seeding run.
pub fn display_seed_summary(summary: &SeedSummary, per_customer: &[(String, i64)]) {
    println!(
        "Created {} devices for {} customers.",
        summary.devices,
        summary.customers.len()
    );
    println!();
    // {:>##} gives the column a fixed width of ## characters, aligned right
    println!("{:>30} {:>8}", "Customer", "Devices");
    for (customer, count) in per_customer {
        println!("{:>30} {:>8}", truncate_string(customer, 29), count);
    }
    println!();
    println!("Firmware compliance:");
    println!(
        "{:>12} {:>18} {:>10} {:>8} {:>10}",
        "Type", "Current", "Compliant", "Total", "Percent"
    );
    for compliance in &summary.product_types {
        let percent = match compliance.percent {
            Some(percent) => format!("{:.1}%", percent),
            None => "-".to_string(),
        };
        println!(
            "{:>12} {:>18} {:>10} {:>8} {:>10}",
            compliance.product_type.to_string(),
            compliance.current_firmware,
            compliance.compliant,
            compliance.total,
            percent
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Acme", 10), "Acme");
        assert_eq!(truncate_string("Acme", 4), "Acme");
        assert_eq!(truncate_string("Pacific Financial Services", 10), "Pacific...");
        assert_eq!(truncate_string("Café Münchën Größe", 8), "Café ...");
        assert_eq!(truncate_string("Acme Corporation", 2), "..");
        assert_eq!(truncate_string("Acme Corporation", 0), "");
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), LevelFilter::Info);
        assert_eq!(log_level(1), LevelFilter::Debug);
        assert_eq!(log_level(4), LevelFilter::Trace);
    }
}
