//! URI-template validation, priority and matching.
//!
//! A template is a `/`-delimited sequence of segments matched against a
//! request path, e.g.:
//!
//! ```text
//! template: /user/{user_id}/group/{group_id}
//! path:     /user/1234abcd/group/qwerty123
//! ```
//!
//! yields the path variables `user_id = "1234abcd"` and
//! `group_id = "qwerty123"`.
//!
//! Valid templates:
//!
//! - `/foo/{p1}/bar`
//! - `/{p1}/foo/{p2}`
//! - `/foo/bar/{p1}` - matches `/foo/bar/value`, but not
//!   `/foo/bar/value/more`
//! - `/foo/{args}*` - matches `/foo/bar/value/more`, capturing the joined
//!   remainder `bar/value/more` as a single variable
//! - `/foo`
//!
//! Invalid templates:
//!
//! - `foo` - must start with `/`
//! - `/foo/` - must not end with `/`
//! - `/foo/{args}*/bar` - a variadic capture is only legal as the final
//!   segment
//!
//! Literal segments are compared byte-for-byte against the (still encoded)
//! path; if a template needs characters outside the unreserved set, encode
//! them first. Captured values are percent-decoded on extraction.

use std::collections::HashMap;

use super::codec;

/// Variables extracted from a matched path, keyed by capture name.
pub type PathVars = HashMap<String, String>;

/// Calculates the specificity priority of a template.
///
/// The priority is the number of `/` characters, minus one when the final
/// segment is a variadic capture - a trailing `{name}*` can absorb any
/// number of segments, so it must rank below an equally long literal or
/// single-capture alternative:
///
/// - `calc_priority("/")` == 1
/// - `calc_priority("/foo")` == 1
/// - `calc_priority("/foo/bar")` == 2
/// - `calc_priority("/baz/{arg}")` == 2
/// - but `calc_priority("/qux/{args}*")` == 1
///
/// With the templates `/foo/bar`, `/foo/{args}*` and `/{args}*` registered,
/// the path `/foo/bar` resolves to the first, `/foo/bar/baz` to the second,
/// and everything else falls through to the third (priority 0).
///
/// Returns `-1` for an invalid template (empty, missing the leading `/`, or
/// carrying a trailing `/`).
pub fn calc_priority(template: &str) -> i32 {
    if template.is_empty() || !template.starts_with('/') || template.ends_with('/') {
        return -1;
    }

    let mut priority = template.bytes().filter(|&b| b == b'/').count() as i32;

    // a trailing variadic capture is penalized by exactly one
    let last = &template[template.rfind('/').unwrap_or(0) + 1..];
    if last.len() >= 3 && last.starts_with('{') && last.ends_with("}*") {
        priority -= 1;
    }

    priority
}

/// Returns `true` if `path` (query string ignored) matches `template`.
pub fn is_match(template: &str, path: &str) -> bool {
    walk(template, strip_query(path), None)
}

/// Extracts the path variables of `path` under `template`.
///
/// Returns an empty mapping when the path does not match.
pub fn parse(template: &str, path: &str) -> PathVars {
    let mut vars = PathVars::new();
    if walk(template, strip_query(path), Some(&mut vars)) {
        vars
    } else {
        PathVars::new()
    }
}

/// Everything up to the first `?`.
fn strip_query(path: &str) -> &str {
    &path[..path.find('?').unwrap_or(path.len())]
}

/// Lock-step segment walk over template and path.
///
/// Both cursors sit on a `/` (or at the end) at the top of every iteration;
/// the match succeeds only when both run out simultaneously. When `vars` is
/// given, each capture's decoded value is recorded as a side effect of the
/// walk.
fn walk(template: &str, path: &str, mut vars: Option<&mut PathVars>) -> bool {
    let tlen = template.len();
    let plen = path.len();

    if tlen == 0 || plen == 0 {
        return false;
    }
    if !template.starts_with('/') || !path.starts_with('/') {
        return false;
    }

    let mut tpos = 0usize;
    let mut ppos = 0usize;

    loop {
        // whether the path still has this segment's leading '/'
        let path_has_boundary = ppos < plen;

        // skip '/'
        tpos = (tpos + 1).min(tlen);
        ppos = (ppos + 1).min(plen);

        let tend = template[tpos..].find('/').map_or(tlen, |i| tpos + i);
        let mut pend = path[ppos..].find('/').map_or(plen, |i| ppos + i);

        // both reached an end
        if tpos == tend && ppos == pend {
            return true;
        }

        let tseg = &template[tpos..tend];

        if tseg.starts_with('{') {
            let key_tail;

            if tseg.ends_with('}') {
                // the capture is obligatory, but the path is exhausted
                if ppos == plen {
                    return false;
                }
                key_tail = 1; // '}'
            } else if tseg.ends_with('*') && tend == tlen {
                // the variadic capture may be empty, but only past an
                // actual '/' boundary: `/api/path/` yields `""`, a path
                // that stops at `/api/path` does not reach this segment
                if !path_has_boundary {
                    return false;
                }
                key_tail = 2; // "}*"
                pend = plen;
            } else {
                // stray '{' segment: unterminated capture, or a variadic
                // capture before the final position
                return false;
            }

            if let Some(vars) = vars.as_deref_mut() {
                let key = tseg[1..tseg.len() - key_tail].to_string();
                let value = codec::decode_str(&path[ppos..pend]);
                vars.insert(key, value);
            }
        } else if tseg != &path[ppos..pend] {
            return false;
        }

        tpos = tend;
        ppos = pend;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_counts_separators() {
        assert_eq!(calc_priority("/"), 1);
        assert_eq!(calc_priority("/foo"), 1);
        assert_eq!(calc_priority("/foo/bar"), 2);
        assert_eq!(calc_priority("/baz/{arg}"), 2);
        assert_eq!(calc_priority("/qux/{args}*"), 1);
        assert_eq!(calc_priority("/{args}*"), 0);
    }

    #[test]
    fn priority_flags_invalid_templates() {
        assert_eq!(calc_priority(""), -1);
        assert_eq!(calc_priority("foo"), -1);
        assert_eq!(calc_priority("/foo/"), -1);
    }

    #[test]
    fn literal_templates_match_exactly() {
        assert!(is_match("/", "/"));
        assert!(is_match("/foo/bar", "/foo/bar"));
        assert!(!is_match("/foo/bar", "/foo/baz"));
        assert!(!is_match("/foo/bar", "/foo"));
        assert!(!is_match("/foo", "/foo/bar"));
    }

    #[test]
    fn single_capture_binds_one_segment() {
        assert!(is_match("/user/{id}", "/user/42"));
        assert_eq!(parse("/user/{id}", "/user/42")["id"], "42");

        // empty required capture
        assert!(!is_match("/user/{id}", "/user/"));
        assert!(!is_match("/user/{id}", "/user"));
        // a single capture never spans segments
        assert!(!is_match("/user/{id}", "/user/42/posts"));
    }

    #[test]
    fn multiple_captures() {
        let vars = parse("/api/hello/{name}/{surname}", "/api/hello/john/doe");
        assert_eq!(vars["name"], "john");
        assert_eq!(vars["surname"], "doe");
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn variadic_capture_joins_the_remainder() {
        let vars = parse("/api/path/{path}*", "/api/path/a/b/c");
        assert_eq!(vars["path"], "a/b/c");
    }

    #[test]
    fn variadic_capture_requires_the_boundary() {
        assert!(!is_match("/api/path/{path}*", "/api/path"));
        // with the trailing boundary present the capture may be empty
        let vars = parse("/api/path/{path}*", "/api/path/");
        assert_eq!(vars["path"], "");
    }

    #[test]
    fn variadic_only_legal_in_final_position() {
        assert!(!is_match("/foo/{args}*/bar", "/foo/a/b/bar"));
    }

    #[test]
    fn query_string_is_ignored() {
        assert!(is_match("/user/{id}", "/user/42?verbose=1"));
        assert_eq!(parse("/user/{id}", "/user/42?verbose=1")["id"], "42");
        assert!(is_match("/", "/?x=y"));
    }

    #[test]
    fn captures_are_percent_decoded() {
        let vars = parse("/user/{name}", "/user/john%20doe");
        assert_eq!(vars["name"], "john doe");

        let vars = parse("/files/{path}*", "/files/a%2Fb/c");
        assert_eq!(vars["path"], "a/b/c");
    }

    #[test]
    fn parse_returns_empty_on_mismatch() {
        assert!(parse("/user/{id}", "/group/42").is_empty());
    }

    #[test]
    fn empty_inputs_never_match() {
        assert!(!is_match("", "/"));
        assert!(!is_match("/", ""));
        assert!(!is_match("foo", "/foo"));
    }
}
