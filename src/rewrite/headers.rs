//! Response header rewrites.
//!
//! `Www-Authenticate` realms point at the upstream token endpoint and `Link`
//! pagination targets name the canonical organization. Both are turned back
//! toward the proxy so clients keep talking to us under their alias.

use super::OrgMapper;

/// Replace the first `://{upstream_host}/` in a challenge with
/// `://{request_host}/`. Later occurrences are left alone.
pub fn rewrite_www_authenticate(value: &str, upstream_host: &str, request_host: &str) -> String {
    let needle = format!("://{upstream_host}/");
    value.replacen(&needle, &format!("://{request_host}/"), 1)
}

/// Rewrite a `Link` value whose target path begins with `/v2/{canonical}/`.
///
/// Accepts both the RFC 8288 form (`</v2/org/repo/tags/list?n=10>; rel="next"`)
/// and a bare path. `preferred_alias` is the alias the client used; it wins
/// when it maps to the canonical name in the link, otherwise the reverse
/// lookup decides. Values with no matching prefix are returned unchanged.
pub fn rewrite_link(value: &str, mapper: &OrgMapper, preferred_alias: Option<&str>) -> String {
    let leading = value.len() - value.trim_start().len();
    let offset = if value[leading..].starts_with('<') {
        leading + 1
    } else {
        leading
    };
    let target = &value[offset..];

    let Some(canonical) = mapper
        .iter()
        .map(|(_, canonical)| canonical)
        .find(|canonical| target.starts_with(&org_prefix(canonical)))
    else {
        return value.to_string();
    };

    let alias = preferred_alias
        .filter(|alias| mapper.lookup(alias) == Some(canonical))
        .or_else(|| mapper.reverse_lookup(canonical));
    let Some(alias) = alias else {
        return value.to_string();
    };

    let prefix = org_prefix(canonical);
    format!(
        "{}{}{}",
        &value[..offset],
        org_prefix(alias),
        &target[prefix.len()..]
    )
}

fn org_prefix(org: &str) -> String {
    format!("/v2/{org}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> OrgMapper {
        "appscode=appscode-images,kubedb=kubedb-images".parse().unwrap()
    }

    #[test]
    fn test_www_authenticate_first_occurrence_only() {
        let value = r#"Bearer realm="https://ghcr.io/token",service="ghcr.io",x="https://ghcr.io/""#;
        let rewritten = rewrite_www_authenticate(value, "ghcr.io", "r.appscode.com");
        assert_eq!(
            rewritten,
            r#"Bearer realm="https://r.appscode.com/token",service="ghcr.io",x="https://ghcr.io/""#
        );
    }

    #[test]
    fn test_www_authenticate_without_authority_untouched() {
        let value = r#"Bearer realm="https://auth.example.com/token",service="ghcr.io""#;
        assert_eq!(rewrite_www_authenticate(value, "ghcr.io", "proxy"), value);
    }

    #[test]
    fn test_link_bracketed() {
        let value = r#"</v2/appscode-images/nginx/tags/list?last=v2&n=2>; rel="next""#;
        assert_eq!(
            rewrite_link(value, &mapper(), None),
            r#"</v2/appscode/nginx/tags/list?last=v2&n=2>; rel="next""#
        );
    }

    #[test]
    fn test_link_bare_path() {
        let value = "/v2/kubedb-images/mysql/tags/list?n=100";
        assert_eq!(
            rewrite_link(value, &mapper(), None),
            "/v2/kubedb/mysql/tags/list?n=100"
        );
    }

    #[test]
    fn test_link_unmatched_passthrough() {
        let m = mapper();
        for value in [
            r#"</v2/other/nginx/tags/list?n=2>; rel="next""#,
            "/v2/appscode-imagesX/nginx/tags/list",
            "https://ghcr.io/v2/appscode-images/nginx/tags/list",
        ] {
            assert_eq!(rewrite_link(value, &m, None), value);
        }
    }

    #[test]
    fn test_link_prefers_request_alias() {
        let m: OrgMapper = "library=appscode-images,appscode=appscode-images"
            .parse()
            .unwrap();
        let value = "</v2/appscode-images/nginx/tags/list?n=1>; rel=\"next\"";
        assert_eq!(
            rewrite_link(value, &m, Some("library")),
            "</v2/library/nginx/tags/list?n=1>; rel=\"next\""
        );
        // Unrelated preferred alias falls back to the lexicographic reverse lookup.
        assert_eq!(
            rewrite_link(value, &m, Some("kubedb")),
            "</v2/appscode/nginx/tags/list?n=1>; rel=\"next\""
        );
    }
}
