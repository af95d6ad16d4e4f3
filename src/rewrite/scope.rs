//! Token scope rewrite.
//!
//! Scopes look like `repository:{alias}/{repo...}:{actions}`. Only the alias
//! segment changes; the rest of the string is kept byte-for-byte.

use std::borrow::Cow;

use url::form_urlencoded;

use super::OrgMapper;

const REPOSITORY_SCOPE: &str = "repository:";

/// Rewrite one scope value. Space-separated scope lists are handled entry
/// by entry.
pub fn rewrite_scope<'a>(scope: &'a str, mapper: &OrgMapper) -> Cow<'a, str> {
    if scope.contains(' ') {
        let parts: Vec<Cow<'_, str>> = scope
            .split(' ')
            .map(|part| rewrite_single_scope(part, mapper))
            .collect();
        if parts.iter().all(|p| matches!(p, Cow::Borrowed(_))) {
            return Cow::Borrowed(scope);
        }
        return Cow::Owned(parts.join(" "));
    }
    rewrite_single_scope(scope, mapper)
}

fn rewrite_single_scope<'a>(scope: &'a str, mapper: &OrgMapper) -> Cow<'a, str> {
    let Some(rest) = scope.strip_prefix(REPOSITORY_SCOPE) else {
        return Cow::Borrowed(scope);
    };
    let Some((alias, remainder)) = rest.split_once('/') else {
        return Cow::Borrowed(scope);
    };
    match mapper.lookup(alias) {
        Some(canonical) => Cow::Owned(format!("{REPOSITORY_SCOPE}{canonical}/{remainder}")),
        None => Cow::Borrowed(scope),
    }
}

/// Rewrite every `scope` parameter of a raw query string.
///
/// Pairs that are not a rewritten scope are kept exactly as received; a
/// rewritten scope is re-encoded with form-urlencoding.
pub fn rewrite_token_query(query: &str, mapper: &OrgMapper) -> String {
    query
        .split('&')
        .map(|pair| {
            let Some((key, value)) = form_urlencoded::parse(pair.as_bytes()).next() else {
                return Cow::Borrowed(pair);
            };
            if key != "scope" {
                return Cow::Borrowed(pair);
            }
            match rewrite_scope(&value, mapper) {
                Cow::Borrowed(_) => Cow::Borrowed(pair),
                Cow::Owned(scope) => {
                    let raw_key = pair.split_once('=').map_or(pair, |(k, _)| k);
                    let encoded: String = form_urlencoded::byte_serialize(scope.as_bytes()).collect();
                    Cow::Owned(format!("{raw_key}={encoded}"))
                }
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
