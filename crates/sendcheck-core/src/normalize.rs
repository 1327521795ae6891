// ── Answer normalization and comparison ──
//
// Shared preprocessing for resolver answers and the comparison rule used
// wherever an actual value is checked against an expected one.

/// Strip quoting from TXT answer data.
///
/// Resolvers render TXT data as one or more quoted character-strings
/// (`"v=spf1 " "include:a ~all"`). Segments are unquoted and concatenated
/// without a separator; `\"`, `\\` and `\DDD` escapes are decoded. Data that
/// does not start with a quote just has its quote characters removed.
pub fn unquote_txt(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with('"') {
        return trimmed.replace('"', "");
    }

    // `\DDD` escapes are raw octets; several may form one UTF-8 character.
    let mut out: Vec<u8> = Vec::with_capacity(trimmed.len());
    let mut in_quotes = false;
    let mut chars = trimmed.chars().peekable();
    let mut utf8 = [0u8; 4];

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\\' if in_quotes => {
                let digits: String = std::iter::from_fn(|| chars.next_if(char::is_ascii_digit))
                    .take(3)
                    .collect();
                if digits.len() == 3 {
                    match digits.parse::<u8>() {
                        Ok(byte) => out.push(byte),
                        Err(_) => out.extend_from_slice(digits.as_bytes()),
                    }
                } else if !digits.is_empty() {
                    out.extend_from_slice(digits.as_bytes());
                } else if let Some(escaped) = chars.next() {
                    out.extend_from_slice(escaped.encode_utf8(&mut utf8).as_bytes());
                }
            }
            c if !in_quotes && c.is_whitespace() => {}
            c => out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes()),
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Remove a single trailing `.` (the DNS root label terminator).
pub fn strip_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Canonical form for comparisons: whitespace runs collapsed to one space,
/// ends trimmed, quote characters removed, lower-cased.
pub fn normalize_for_compare(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('"', "")
        .to_lowercase()
}

/// Case-, quote- and whitespace-insensitive equality.
pub fn values_match(actual: &str, expected: &str) -> bool {
    normalize_for_compare(actual) == normalize_for_compare(expected)
}

/// Whether one value contains the other once all whitespace and quotes are
/// removed. Used only to word review messages.
pub fn partially_matches(actual: &str, expected: &str) -> bool {
    let compact = |s: &str| -> String {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != '"')
            .flat_map(char::to_lowercase)
            .collect()
    };
    let (a, e) = (compact(actual), compact(expected));
    if a.is_empty() || e.is_empty() {
        return false;
    }
    a.contains(&e) || e.contains(&a)
}
