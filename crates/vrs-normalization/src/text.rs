//! Text sanitization.

/// Characters that render as nothing but break equality checks.
const INVISIBLE: [char; 5] = ['\u{feff}', '\u{200b}', '\u{200c}', '\u{200d}', '\u{2060}'];

/// Trims, removes BOM and zero-width characters, and collapses runs of
/// whitespace into single spaces.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if INVISIBLE.contains(&ch) {
            continue;
        }
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// [`sanitize`], mapping an empty result to `None`.
pub fn sanitize_optional(raw: &str) -> Option<String> {
    let value = sanitize(raw);
    (!value.is_empty()).then_some(value)
}

/// Replaces Devanagari digits (०-९) with their ASCII counterparts.
pub fn fold_devanagari_digits(raw: &str) -> String {
    raw.chars()
        .map(|ch| match ch {
            '\u{0966}'..='\u{096f}' => {
                char::from_u32(u32::from(ch) - 0x0966 + u32::from('0')).unwrap_or(ch)
            }
            _ => ch,
        })
        .collect()
}
