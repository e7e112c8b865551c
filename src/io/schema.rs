//! Schema validation against a domain's required column list.

/// Required columns absent from `present`, in the order of `required`.
///
/// Matching is exact on trimmed names; duplicate required names are reported once.
pub fn missing_columns<S: AsRef<str>>(present: &[S], required: &[&str]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for name in required {
        let found = present.iter().any(|p| p.as_ref().trim() == *name);
        if !found && !missing.iter().any(|m| m == name) {
            missing.push((*name).to_string());
        }
    }
    missing
}
