//! Declared-input extraction from policy source text

/// Scan policy source for `input.<field>` references and return the field
/// names in first-occurrence order, duplicates collapsed.
///
/// This is a line heuristic, not a parser: a trimmed line whose first
/// whitespace-delimited token is `input.<field>` declares `<field>`. A bare
/// `input` token, or `input.` with nothing after it, contributes nothing.
/// Any text is tolerated without failing. Known imprecision: references
/// inside comments or string literals are matched too.
pub fn declared_inputs(source: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for line in source.lines() {
        let Some(token) = line.trim().split_whitespace().next() else {
            continue;
        };
        let Some(field) = token.strip_prefix("input.") else {
            continue;
        };
        if field.is_empty() {
            continue;
        }
        if !fields.iter().any(|f| f == field) {
            fields.push(field.to_string());
        }
    }
    fields
}
