/// Characters treated as quotes and removed before any other processing.
const QUOTE_CHARS: &[char] = &['\'', '"', '`', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Reduce a free-text optimization target to its canonical comparable form.
///
/// Lowercases, strips quote characters, drops everything that is not an ASCII
/// letter, digit or whitespace, collapses whitespace runs and trims. Both
/// sides of every target comparison must go through this function.
///
/// The function is idempotent.
pub fn normalize_target(raw: &str) -> String {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !QUOTE_CHARS.contains(c))
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
