//! Number formatting shared by chart labels, the preview and the report

/// Format with a fixed number of decimals and `,` thousands separators
pub fn thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Whole numbers print without decimals, anything else with two
pub fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        thousands(value, 0)
    } else {
        thousands(value, 2)
    }
}

/// Percentage with one decimal, `n/a` when undefined
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "n/a".to_string(),
    }
}
