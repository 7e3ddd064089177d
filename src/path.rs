//! Path canonicalization: request path → policy lookup key and query identifier

/// Suffix appended to a canonical path to form a policy lookup key.
pub const POLICY_SUFFIX: &str = ".rego";

/// File name of a wildcard policy installed at a directory prefix.
pub const WILDCARD_POLICY_FILE: &str = "any.rego";

/// Root token every query identifier starts with.
const QUERY_ROOT: &str = "data";

/// Rule suffix for exact-path policies.
const ALLOW_SUFFIX: &str = ".allow";

/// Rule suffix for wildcard policies. Wildcard modules live in a separate
/// rule namespace (`<prefix>.any.allow`), so the suffix differs from the
/// exact one; the separating dot comes from the `/`-terminated prefix.
const WILDCARD_ALLOW_SUFFIX: &str = "any.allow";

fn strip_query(raw_path: &str) -> &str {
    match raw_path.find('?') {
        Some(idx) => &raw_path[..idx],
        None => raw_path,
    }
}

/// Canonical lookup key for a request path: query string stripped, policy
/// suffix appended. Total and pure; two paths differing only in query
/// string map to the same key.
///
/// `/perf-server/api/v1/bus/latestData?x=1` → `/perf-server/api/v1/bus/latestData.rego`
pub fn lookup_key(raw_path: &str) -> String {
    format!("{}{}", strip_query(raw_path), POLICY_SUFFIX)
}

/// Decision-engine query expression for a path: query string stripped,
/// `-` → `_`, `/` → `.`, rooted at `data` and suffixed with the allow rule.
///
/// `/perf-server/api/v1/bus/latestData` → `data.perf_server.api.v1.bus.latestData.allow`
///
/// With `wildcard` set the path is expected to be a `/`-terminated ancestor
/// prefix: `/perf-server/api/` → `data.perf_server.api.any.allow`.
pub fn query_identifier(raw_path: &str, wildcard: bool) -> String {
    let dotted = strip_query(raw_path).replace('-', "_").replace('/', ".");
    let suffix = if wildcard {
        WILDCARD_ALLOW_SUFFIX
    } else {
        ALLOW_SUFFIX
    };
    format!("{QUERY_ROOT}{dotted}{suffix}")
}

/// Ancestor prefixes of a lookup key, shallow to deep, each `/`-terminated:
/// `/a/b/c.rego` → `["/", "/a/", "/a/b/"]`. The order is load-bearing: the
/// cascade checks shallow levels first.
pub fn ancestor_prefixes(lookup_key: &str) -> Vec<String> {
    let dir = match lookup_key.rfind('/') {
        Some(idx) => &lookup_key[..idx],
        None => "",
    };
    let mut prefixes = Vec::new();
    let mut acc = String::new();
    for segment in dir.split('/') {
        acc.push_str(segment);
        acc.push('/');
        prefixes.push(acc.clone());
    }
    prefixes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lookup_key_appends_suffix() {
        assert_eq!(lookup_key("/svc/do"), "/svc/do.rego");
    }

    #[test]
    fn lookup_key_strips_query_string() {
        assert_eq!(lookup_key("/x/y?z=1"), lookup_key("/x/y"));
        assert_eq!(lookup_key("/x/y?z=1&w=2"), "/x/y.rego");
    }

    #[test]
    fn exact_query_identifier() {
        assert_eq!(
            query_identifier("/perf-server/api/v1/bus/latestData", false),
            "data.perf_server.api.v1.bus.latestData.allow"
        );
    }

    #[test]
    fn wildcard_query_identifier() {
        assert_eq!(query_identifier("/perf-server/api/", true), "data.perf_server.api.any.allow");
        assert_eq!(query_identifier("/", true), "data.any.allow");
    }

    #[test]
    fn query_identifier_strips_query_string() {
        assert_eq!(
            query_identifier("/a/b?limit=5", false),
            query_identifier("/a/b", false)
        );
    }

    #[test]
    fn ancestor_prefixes_shallow_to_deep() {
        assert_eq!(ancestor_prefixes("/a/b/c.rego"), vec!["/", "/a/", "/a/b/"]);
        assert_eq!(ancestor_prefixes("/top.rego"), vec!["/"]);
    }

    proptest! {
        #[test]
        fn lookup_key_is_deterministic(raw in ".*") {
            prop_assert_eq!(lookup_key(&raw), lookup_key(&raw));
        }

        #[test]
        fn query_identifier_is_deterministic(raw in ".*") {
            prop_assert_eq!(query_identifier(&raw, false), query_identifier(&raw, false));
            prop_assert_eq!(query_identifier(&raw, true), query_identifier(&raw, true));
        }

        #[test]
        fn query_string_never_changes_the_key(path in "[a-z/-]{0,32}", query in "[a-z=&]{0,16}") {
            let with_query = format!("{path}?{query}");
            prop_assert_eq!(lookup_key(&with_query), lookup_key(&path));
            prop_assert_eq!(query_identifier(&with_query, false), query_identifier(&path, false));
        }
    }
}
