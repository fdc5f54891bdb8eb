use kwire_core::scan::cut_top_level;

/// Normalizes a captured type: drops trailing comments, `;` and stray
/// closing braces, and collapses whitespace.
pub fn clean_type(raw: &str) -> String {
    let no_comment = raw.split("//").next().unwrap_or_default();
    let no_brace = no_comment.split('}').next().unwrap_or_default();
    no_brace
        .trim()
        .trim_end_matches(';')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Int = 5` -> `Int`
pub fn strip_default_value(raw: &str) -> &str {
    cut_top_level(raw, '=')
}

/// Drops modifiers and annotations in front of a parameter name,
/// e.g. `vararg ids` -> `ids`.
pub fn parameter_name(raw: &str) -> &str {
    raw.split_whitespace().last().unwrap_or_default()
}

/// Reduces an anchor's type reference to the bare name to qualify:
/// generic arguments, constructor calls and nullability are dropped.
pub fn anchor_type_base(raw: &str) -> &str {
    let raw = raw.trim();
    let end = raw
        .find(|c: char| c == '<' || c == '(' || c.is_whitespace())
        .unwrap_or(raw.len());
    raw[..end].trim_end_matches('?')
}
