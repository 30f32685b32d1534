//! Rupee formatting with Indian digit grouping (12,34,567).

/// Whole rupees, e.g. `₹4,81,250` or `-₹1,750`.
pub fn format_inr(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_indian(&digits);
    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Like [`format_inr`] but with a leading `+` for non-negative values.
pub fn format_signed_inr(value: f64) -> String {
    if value.round() >= 0.0 {
        format!("+{}", format_inr(value))
    } else {
        format_inr(value)
    }
}

pub fn format_signed_pct(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
