/// Map a store key to a file stem safe on every common filesystem.
///
/// `/ \ : * ? " < > |` and control characters become `_`. An empty key maps
/// to a single `_`. Distinct keys can collide (`BTC/USD` and `BTC:USD`); the
/// stored document carries the original symbol.
#[must_use]
pub fn sanitize_key(key: &str) -> String {
    let out: String = key
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match out.as_str() {
        "" | "." | ".." => "_".repeat(out.len().max(1)),
        _ => out,
    }
}
