//! Number formatting for the exports.

/// Integer with `,` thousands separators.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Percentage with two decimals, e.g. `4.20%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Raw float for the TSV: shortest round-trip digits in plain decimal
/// notation, always with a decimal point. Never uses exponent form.
pub fn raw_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}
