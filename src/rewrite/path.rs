//! Catch-all redirect path rewrite.

use std::borrow::Cow;

use super::OrgMapper;

/// Replace the first path segment with its canonical name when it is a
/// known alias. Only whole segments match: `/appscode` and `/appscode/x`
/// do, `/appscodeX` does not. Anything else is returned unchanged.
pub fn rewrite_first_segment<'a>(path: &'a str, mapper: &OrgMapper) -> Cow<'a, str> {
    let Some(trimmed) = path.strip_prefix('/') else {
        return Cow::Borrowed(path);
    };
    let (segment, remainder) = match trimmed.find('/') {
        Some(idx) => trimmed.split_at(idx),
        None => (trimmed, ""),
    };
    match mapper.lookup(segment) {
        Some(canonical) => Cow::Owned(format!("/{canonical}{remainder}")),
        None => Cow::Borrowed(path),
    }
}
