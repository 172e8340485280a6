//! Capitalisation projection from a defective token onto its replacement.

/// Re-applies the capitalisation shape of `original` onto `matched`.
///
/// Position by position, a character of `matched` is upper-cased where the
/// character of `original` at the same position is upper-case and
/// lower-cased otherwise (wildcard markers count as lower-case). Characters of
/// `matched` beyond the length of `original` are appended lower-cased.
///
/// ```
/// use newsprint_lib::restoration::case::apply_case;
///
/// assert_eq!(apply_case("Cat", "dog"), "Dog");
/// assert_eq!(apply_case("cAt", "dog"), "dOg");
/// assert_eq!(apply_case("N*WS", "news"), "NeWS");
/// ```
pub fn apply_case(original: &str, matched: &str) -> String {
    let mut shape = original.chars();
    let mut projected = String::with_capacity(matched.len());

    for m in matched.chars() {
        match shape.next() {
            Some(o) if o.is_uppercase() => projected.extend(m.to_uppercase()),
            _ => projected.extend(m.to_lowercase()),
        }
    }

    projected
}
