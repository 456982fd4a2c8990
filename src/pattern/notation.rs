//! Named-capture notations in raw patterns.
//!
//! `(?P<name>..)`, `(?<name>..)` and `(?'name'..)` all denote the same thing.
//! Patterns are rewritten to the `(?P<name>..)` form before compilation, and
//! the outermost named groups are recorded so that a concrete string can be
//! rebuilt from the pattern later.

const OPENERS: [(&str, char); 3] = [("(?P<", '>'), ("(?<", '>'), ("(?'", '\'')];

/// A named group found in a normalized pattern.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct Group {
    pub name: String,
    /// Byte range of the whole group, parentheses included.
    pub start: usize,
    pub end: usize,
    pub depth: usize,
}

/// Rewrites every named group to the canonical `(?P<name>` opener.
pub(super) fn normalize(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    let mut in_class = false;

    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            let len = escape_len(rest);
            out.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }
        if in_class {
            if c == ']' {
                in_class = false;
            }
        } else if c == '[' {
            in_class = true;
            // a leading `]` (or `^]`) is literal inside a class
            let skip = class_prefix_len(rest);
            out.push_str(&rest[..skip]);
            rest = &rest[skip..];
            continue;
        } else if let Some((name, len)) = named_opener(rest) {
            out.push_str("(?P<");
            out.push_str(name);
            out.push('>');
            rest = &rest[len..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Lists the named groups of a normalized pattern in order of appearance.
pub(super) fn named_groups(pattern: &str) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut stack: Vec<Option<usize>> = Vec::new();
    let mut in_class = false;
    let mut i = 0;

    while i < pattern.len() {
        let rest = &pattern[i..];
        let c = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };
        if c == '\\' {
            i += escape_len(rest);
            continue;
        }
        if in_class {
            if c == ']' {
                in_class = false;
            }
            i += c.len_utf8();
            continue;
        }
        match c {
            '[' => {
                in_class = true;
                i += class_prefix_len(rest);
                continue;
            }
            '(' => match named_opener(rest) {
                Some((name, _)) => {
                    stack.push(Some(groups.len()));
                    groups.push(Group {
                        name: name.to_owned(),
                        start: i,
                        end: pattern.len(),
                        depth: stack.iter().filter(|g| g.is_some()).count() - 1,
                    });
                }
                None => stack.push(None),
            },
            ')' => {
                if let Some(Some(idx)) = stack.pop() {
                    groups[idx].end = i + 1;
                }
            }
            _ => {}
        }
        i += c.len_utf8();
    }
    groups
}

fn named_opener(s: &str) -> Option<(&str, usize)> {
    for &(open, close) in OPENERS.iter() {
        if let Some(rest) = s.strip_prefix(open) {
            let end = rest.find(close)?;
            let name = &rest[..end];
            if is_identifier(name) {
                return Some((name, open.len() + end + 1));
            }
        }
    }
    None
}

fn escape_len(s: &str) -> usize {
    match s[1..].chars().next() {
        Some(c) => 1 + c.len_utf8(),
        None => 1,
    }
}

fn class_prefix_len(s: &str) -> usize {
    let mut len = 1;
    if s[len..].starts_with('^') {
        len += 1;
    }
    if s[len..].starts_with(']') {
        len += 1;
    }
    len
}

pub(super) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Turns the regex text between two captures back into the literal it matches.
///
/// Escaped characters are unescaped. Anchors, group parentheses and the
/// `?`, `*`, `+` and `|` operators are dropped, so an optional group is
/// generated as if it were present.
pub(super) fn literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '(' => {
                if chars.peek() == Some(&'?') {
                    chars.next();
                    if chars.peek() == Some(&':') {
                        chars.next();
                    }
                }
            }
            '^' | '$' | ')' | '?' | '*' | '+' | '|' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_notations_normalize_alike() {
        let expected = "^/users/(?P<user>[^/?]+)";
        assert_eq!(normalize("^/users/(?P<user>[^/?]+)"), expected);
        assert_eq!(normalize("^/users/(?<user>[^/?]+)"), expected);
        assert_eq!(normalize("^/users/(?'user'[^/?]+)"), expected);
    }

    #[test]
    fn escaped_and_class_parens_are_ignored() {
        assert_eq!(normalize(r"\(?'x'a\)"), r"\(?'x'a\)");
        assert_eq!(normalize("[(?'x']"), "[(?'x']");
        assert!(named_groups(r"/a\(b[()]c").is_empty());
    }

    #[test]
    fn groups_record_span_and_depth() {
        let p = "/(?P<a>x(?P<b>y))/(?:z)(?P<c>w)";
        let groups = named_groups(p);
        let names: Vec<_> = groups.iter().map(|g| (g.name.as_str(), g.depth)).collect();
        assert_eq!(names, vec![("a", 0), ("b", 1), ("c", 0)]);
        assert_eq!(&p[groups[0].start..groups[0].end], "(?P<a>x(?P<b>y))");
        assert_eq!(&p[groups[2].start..groups[2].end], "(?P<c>w)");
    }

    #[test]
    fn literal_unescapes() {
        assert_eq!(literal(r"^/files/"), "/files/");
        assert_eq!(literal(r"\.php$"), ".php");
    }

    #[test]
    fn literal_drops_group_syntax() {
        assert_eq!(literal("/page(/"), "/page/");
        assert_eq!(literal(")?"), "");
        assert_eq!(literal(r"(?:\.json)?"), ".json");
    }
}
