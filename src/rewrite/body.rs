//! Tag-list body rewrite.
//!
//! This is the one place a response body is fully buffered: the caller
//! collects the upstream bytes, hands them here, and writes the re-encoded
//! result with `Content-Length` removed.

use serde::{Deserialize, Serialize};

use super::OrgMapper;
use crate::error::ProxyError;

/// `GET /v2/{name}/tags/list` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Strip a leading `{canonical}/` from a repository name.
///
/// `preferred_canonical` (the organization the request resolved to) is tried
/// first, then every configured canonical name in alias order.
pub fn strip_org_prefix<'a>(
    name: &'a str,
    mapper: &OrgMapper,
    preferred_canonical: Option<&str>,
) -> &'a str {
    preferred_canonical
        .into_iter()
        .chain(mapper.iter().map(|(_, canonical)| canonical))
        .filter(|canonical| !canonical.is_empty())
        .find_map(|canonical| {
            name.strip_prefix(canonical)
                .and_then(|rest| rest.strip_prefix('/'))
        })
        .unwrap_or(name)
}

/// Decode a tag-list body, drop the organization from `name`, re-encode.
pub fn rewrite_list_body(
    body: &[u8],
    mapper: &OrgMapper,
    preferred_canonical: Option<&str>,
) -> Result<Vec<u8>, ProxyError> {
    let mut list: ListResponse = serde_json::from_slice(body).map_err(ProxyError::Decode)?;
    list.name = strip_org_prefix(&list.name, mapper, preferred_canonical).to_string();
    serde_json::to_vec(&list).map_err(ProxyError::Encode)
}
