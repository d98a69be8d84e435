//! Display formatting helpers

/// Format seconds as zero-padded `mm:ss`. Minutes are not wrapped into hours.
pub fn format_mm_ss(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Format an amount rounded to whole units with `,` thousands separators
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
