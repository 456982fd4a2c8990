//! Route patterns.
//!
//! Every pattern, whatever syntax it was written in, compiles down to an
//! anchored [`Regex`] and a skeleton of literal text and named captures. The
//! regex is used for matching and the skeleton for reverse generation.

mod notation;
mod template;

use crate::error::{GenerateError, PatternError};
use crate::params::Params;

use std::fmt;

use regex::Regex;
use url::form_urlencoded;

/// Name under which the dispatcher exposes the request to actions.
pub const REQUEST_KEY: &str = "request";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    Literal(String),
    Capture(String),
}

#[derive(Clone)]
pub struct RoutePattern {
    source: Box<str>,
    regex: Regex,
    pieces: Vec<Piece>,
    defaults: Params,
}

impl RoutePattern {
    /// Compiles a `{name}` template.
    pub fn template(template: &str, defaults: Params) -> Result<Self, PatternError> {
        if template.is_empty() {
            return Err(PatternError::EmptyTemplate);
        }
        let (body, pieces) = template::compile(template, &defaults)?;
        Self::build(template, &body, false, pieces, defaults)
    }

    /// Compiles a raw regular expression.
    ///
    /// Named captures may be written as `(?P<name>..)`, `(?<name>..)` or
    /// `(?'name'..)`.
    pub fn regex(pattern: &str, defaults: Params) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::EmptyTemplate);
        }
        let body = notation::normalize(pattern);
        let pieces = skeleton(&body);
        Self::build(pattern, &body, false, pieces, defaults)
    }

    /// Matches any subject starting with `prefix`.
    pub fn prefix(prefix: &str) -> Result<Self, PatternError> {
        if prefix.is_empty() {
            return Err(PatternError::EmptyTemplate);
        }
        let pieces = vec![Piece::Literal(prefix.to_owned())];
        Self::build(prefix, &regex::escape(prefix), false, pieces, Params::new())
    }

    /// Compiles a header value pattern. The whole value must match.
    pub fn header(pattern: &str) -> Result<Self, PatternError> {
        let body = notation::normalize(pattern);
        let pieces = skeleton(&body);
        Self::build(pattern, &body, true, pieces, Params::new())
    }

    /// Matches a header value by exact comparison.
    pub fn exact(value: &str) -> Result<Self, PatternError> {
        let pieces = vec![Piece::Literal(value.to_owned())];
        Self::build(value, &regex::escape(value), true, pieces, Params::new())
    }

    fn build(
        source: &str,
        body: &str,
        full: bool,
        pieces: Vec<Piece>,
        defaults: Params,
    ) -> Result<Self, PatternError> {
        let anchored = if full {
            format!("^(?:{})$", body)
        } else {
            format!("^(?:{})", body)
        };
        let regex = Regex::new(&anchored)?;

        if let Some(name) = regex.capture_names().flatten().find(|&n| n == REQUEST_KEY) {
            return Err(PatternError::ReservedName {
                name: name.to_owned(),
            });
        }

        Ok(Self {
            source: source.into(),
            regex,
            pieces,
            defaults,
        })
    }
}

impl RoutePattern {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    /// Names of the captures used for generation, in template order.
    pub fn params(&self) -> impl Iterator<Item = &str> + '_ {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Capture(name) => Some(name.as_str()),
            Piece::Literal(_) => None,
        })
    }

    pub fn is_match(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }

    /// Applies the pattern to `subject`, returning its named captures.
    ///
    /// Any default whose capture is empty or absent is filled in.
    pub fn match_uri(&self, subject: &str) -> Option<Params> {
        let caps = self.regex.captures(subject)?;

        let mut params = Params::new();
        for name in self.regex.capture_names().flatten() {
            if let Some(m) = caps.name(name) {
                params.insert(name, m.as_str());
            }
        }
        for (name, value) in self.defaults.iter() {
            if params.get(name).map_or(true, str::is_empty) {
                params.insert(name, value);
            }
        }
        Some(params)
    }

    /// Builds a string this pattern would match.
    ///
    /// Captures are substituted in template order from `params`, falling back
    /// to defaults. Parameters left over are appended as a query string in the
    /// order they were supplied.
    pub fn generate_uri<I, K, V>(&self, params: I) -> Result<String, GenerateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut supplied: Params = params.into_iter().collect();
        let mut uri = String::with_capacity(self.source.len());

        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => uri.push_str(text),
                Piece::Capture(name) => match supplied.remove(name) {
                    Some(value) => uri.push_str(&value),
                    None => match self.defaults.get(name) {
                        Some(value) => uri.push_str(value),
                        None => return Err(GenerateError::MissingRequiredParameter(name.clone())),
                    },
                },
            }
        }

        if !supplied.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(supplied.iter())
                .finish();
            uri.push('?');
            uri.push_str(&query);
        }

        Ok(uri)
    }
}

impl fmt::Debug for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePattern")
            .field("source", &self.source)
            .field("regex", &self.regex.as_str())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Splits a normalized raw pattern into literal text and outermost captures.
fn skeleton(body: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for group in notation::named_groups(body) {
        if group.depth > 0 {
            continue;
        }
        let text = notation::literal(&body[last..group.start]);
        if !text.is_empty() {
            pieces.push(Piece::Literal(text));
        }
        pieces.push(Piece::Capture(group.name));
        last = group.end;
    }
    let text = notation::literal(&body[last..]);
    if !text.is_empty() {
        pieces.push(Piece::Literal(text));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn regex_skeleton_uses_outer_groups() {
        let pattern =
            RoutePattern::regex(r"^/(?P<a>x(?<b>y))/(?'c'\d+)\.json$", Params::new()).unwrap();
        let names: Vec<&str> = pattern.params().collect();
        assert_eq!(names, vec!["a", "c"]);
        let uri = pattern.generate_uri(vec![("a", "xy"), ("c", "7")]).unwrap();
        assert_eq!(uri, "/xy/7.json");
    }

    #[test]
    fn regex_defaults_fill_missing_captures() {
        let pattern =
            RoutePattern::regex(r"/page(/(?P<n>\d+))?", defaults(&[("n", "1")])).unwrap();
        assert_eq!(pattern.match_uri("/page").unwrap().get("n"), Some("1"));
        assert_eq!(pattern.match_uri("/page/4").unwrap().get("n"), Some("4"));
        assert_eq!(pattern.generate_uri(vec![("n", "4")]).unwrap(), "/page/4");
        assert_eq!(pattern.generate_uri(Vec::<(String, String)>::new()).unwrap(), "/page/1");
    }

    #[test]
    fn prefix_matches_start_only() {
        let pattern = RoutePattern::prefix("/users").unwrap();
        assert!(pattern.is_match("/users/joe/update?param=asdf"));
        assert!(!pattern.is_match("/admin/users"));
        assert_eq!(pattern.generate_uri(vec![("q", "a b")]).unwrap(), "/users?q=a+b");
    }

    #[test]
    fn header_patterns_are_fully_anchored() {
        let pattern = RoutePattern::header("(?P<header>foo)").unwrap();
        assert!(pattern.match_uri("foobar").is_none());
        assert_eq!(pattern.match_uri("foo").unwrap().get("header"), Some("foo"));

        let exact = RoutePattern::exact("a.b").unwrap();
        assert!(exact.is_match("a.b"));
        assert!(!exact.is_match("axb"));
    }

    #[test]
    fn reserved_name_is_rejected() {
        let err = RoutePattern::template("/{request}", Params::new()).unwrap_err();
        assert!(matches!(err, PatternError::ReservedName { .. }));
        let err = RoutePattern::regex("/(?'request'.+)", Params::new()).unwrap_err();
        assert!(matches!(err, PatternError::ReservedName { .. }));
    }

    #[test]
    fn empty_template_is_rejected() {
        assert!(matches!(
            RoutePattern::template("", Params::new()),
            Err(PatternError::EmptyTemplate)
        ));
    }

    #[test]
    fn invalid_regex_is_reported() {
        assert!(matches!(
            RoutePattern::regex("/(unclosed", Params::new()),
            Err(PatternError::Regex(_))
        ));
    }
}
