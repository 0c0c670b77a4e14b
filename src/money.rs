//! Brazilian-format money helpers: the sheets write `19,90`, the reports
//! show `R$ 19,90`.

/// Parse a comma-decimal number such as `"19,90"` or `"4.5"`.
///
/// Only the first comma is treated as the decimal separator.
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Format an amount as Brazilian reais, e.g. `R$ 1.234,50`.
pub fn format_brl(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
