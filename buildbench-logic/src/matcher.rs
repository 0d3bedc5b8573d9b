//! Request Matcher
//!
//! Applies the user's explicit filters: type and operation name substrings
//! (case-insensitive, any-of) and per-dimension value sets (OR within a
//! dimension, AND across dimensions). A variant that does not declare a
//! filtered dimension is not restricted by that filter.

use crate::request::SelectionRequest;
use buildbench_core::Variant;

/// Whether `variant` satisfies every explicit filter in `request`.
///
/// A dimension filter only constrains variants that declare the dimension:
/// a variant with no value for it passes, so `node-reuse=false` still keeps
/// Maven and Gradle variants.
pub fn matches_request(variant: &Variant, request: &SelectionRequest) -> bool {
    name_matches(&variant.type_name, &request.type_substrings)
        && name_matches(&variant.operation, &request.method_substrings)
        && request
            .dimension_filters
            .iter()
            .all(|(dimension, accepted)| match variant.value(*dimension) {
                Some(value) => accepted.iter().any(|pattern| value.matches(pattern)),
                None => true,
            })
}

/// Keep the variants matching `request`, preserving order
pub fn apply_request<'a>(variants: Vec<&'a Variant>, request: &SelectionRequest) -> Vec<&'a Variant> {
    variants
        .into_iter()
        .filter(|v| matches_request(v, request))
        .collect()
}

fn name_matches<'a>(name: &str, substrings: impl IntoIterator<Item = &'a String>) -> bool {
    let mut substrings = substrings.into_iter().peekable();
    if substrings.peek().is_none() {
        return true;
    }
    let name = name.to_lowercase();
    substrings.any(|s| name.contains(s.as_str()))
}
