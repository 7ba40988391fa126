/// Render a money amount as `R$ 1,234.56`: two decimals, comma thousands separators.
/// Negative amounts keep the sign after the symbol (`R$ -12.00`).
pub fn format_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{symbol} {value}");
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{symbol} {sign}{}.{frac_part}", group_thousands(int_part))
}

/// Insert `,` every three digits from the right.
pub fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
