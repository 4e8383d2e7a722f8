//! Amount formatting with thousands separators.

/// Number of fraction digits written in `text`: the characters after its last `.`.
pub fn decimal_places(text: &str) -> usize {
    text.rsplit_once('.')
        .map_or(0, |(_, fraction)| fraction.chars().count())
}

/// Inserts `,` between every group of three integer digits.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Reformats an amount with thousands separators, keeping the decimal count of
/// the source text and optionally scaling it by `factor` first.
///
/// Blank input stays blank. Text that does not parse as a finite number is
/// returned unchanged.
///
/// ```
/// use blast_transform::numeric::format_amount;
///
/// assert_eq!(format_amount("1234.5", None), "1,234.5");
/// assert_eq!(format_amount("1234.5", Some(1.11)), "1,370.3");
/// assert_eq!(format_amount("n/a", Some(1.11)), "n/a");
/// ```
pub fn format_amount(value: &str, factor: Option<f64>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let Ok(number) = trimmed.parse::<f64>() else {
        return value.to_string();
    };
    let scaled = factor.map_or(number, |factor| number * factor);
    if !scaled.is_finite() {
        return value.to_string();
    }
    let places = decimal_places(trimmed);
    group_thousands(&format!("{scaled:.places$}"))
}
