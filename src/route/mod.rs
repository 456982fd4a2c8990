mod action;
mod builder;

pub use self::action::{Action, Args, Controller, Handler, IntoOutcome, Outcome};
pub use self::builder::{
    PrefixRoutes, RegexRoutes, RouteBuilder, RouteFactory, Syntax, TemplateRoutes,
};

use crate::error::HeaderAccessError;
use crate::params::Params;
use crate::pattern::RoutePattern;
use crate::request::RequestLike;

use std::fmt;

use http::header::HeaderName;
use http::Method;
use tracing::trace;

/// A rule mapping method, header and URI criteria to an action.
pub struct Route<Req, Res> {
    name: Option<Box<str>>,
    pattern: RoutePattern,
    method: Option<Method>,
    headers: Vec<(HeaderName, RoutePattern)>,
    action: Action<Req, Res>,
}

impl<Req, Res> Route<Req, Res> {
    pub fn template(uri: &str) -> RouteBuilder<Req, Res> {
        RouteBuilder::new(Syntax::Template, uri)
    }

    pub fn regex(uri: &str) -> RouteBuilder<Req, Res> {
        RouteBuilder::new(Syntax::Regex, uri)
    }

    pub fn prefix(uri: &str) -> RouteBuilder<Req, Res> {
        RouteBuilder::new(Syntax::Prefix, uri)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Lower-cased names of the headers this route requires.
    pub fn header_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.headers.iter().map(|(n, _)| n.as_str())
    }

    pub fn defaults(&self) -> &Params {
        self.pattern.defaults()
    }

    pub fn action(&self) -> &Action<Req, Res> {
        &self.action
    }

    pub fn match_method(&self, method: &str) -> bool {
        match self.method {
            Some(ref m) => m.as_str().eq_ignore_ascii_case(method),
            None => true,
        }
    }

    /// Matches `value` against the constraint for header `name`.
    ///
    /// Returns `None` when the route has no such constraint or the value
    /// doesn't match.
    pub fn match_header(&self, name: &str, value: &str) -> Option<Params> {
        let (_, pattern) = self
            .headers
            .iter()
            .find(|(n, _)| n.as_str().eq_ignore_ascii_case(name))?;
        pattern.match_uri(value)
    }
}

impl<Req, Res> fmt::Debug for Route<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("action", &self.action)
            .finish()
    }
}

impl<Req: RequestLike, Res> Route<Req, Res> {
    /// Tests method, headers and URI in that order.
    ///
    /// On success returns the header captures overlaid with the URI captures.
    pub fn matches(&self, request: &Req) -> Result<Option<Params>, HeaderAccessError> {
        if !self.match_method(request.method()) {
            trace!(route = %self.pattern, method = request.method(), "method mismatch");
            return Ok(None);
        }

        let mut params = Params::new();
        for (name, pattern) in &self.headers {
            let value = match request.header(name.as_str())? {
                Some(v) => v,
                None => {
                    trace!(route = %self.pattern, header = name.as_str(), "header missing");
                    return Ok(None);
                }
            };
            match pattern.match_uri(value) {
                Some(caps) => params.merge(caps),
                None => {
                    trace!(route = %self.pattern, header = name.as_str(), value, "header mismatch");
                    return Ok(None);
                }
            }
        }

        match self.pattern.match_uri(request.uri()) {
            Some(caps) => {
                params.merge(caps);
                Ok(Some(params))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PatternError, RouteError};

    type R = Route<http::Request<()>, http::Response<()>>;

    fn noop(_: &Args<'_, http::Request<()>>) {}

    #[test]
    fn bare_route_has_no_constraints() {
        let route = R::template("/foo").handler(noop).build().unwrap();
        assert!(route.method().is_none());
        assert!(!route.has_headers());
        assert!(route.match_method("DELETE"));
    }

    #[test]
    fn method_is_case_insensitive_and_exact() {
        let route = R::template("/foo").method("get").handler(noop).build().unwrap();
        assert!(route.match_method("GET"));
        assert!(route.match_method("get"));
        assert!(!route.match_method("HEAD"));
        assert!(!route.match_method("GETX"));
    }

    #[test]
    fn header_names_are_normalized() {
        let route = R::regex("^/foo")
            .header("Host", "(?P<header>foo)")
            .handler(noop)
            .build()
            .unwrap();
        assert!(route.has_headers());
        assert_eq!(route.header_names().collect::<Vec<_>>(), vec!["host"]);
        assert!(route.match_header("Host", "bar").is_none());
        assert!(route.match_header("Host", "foo").is_some());
        let caps = route.match_header("host", "foo").unwrap();
        assert_eq!(caps.get("header"), Some("foo"));
    }

    #[test]
    fn prefix_headers_compare_exactly() {
        let route = R::prefix("/foo").header("Host", "foo").handler(noop).build().unwrap();
        assert!(route.match_header("HOST", "foo").is_some());
        assert!(route.match_header("Host", "foo.bar").is_none());
        assert!(route.match_header("Host", "Foo").is_none());
    }

    #[test]
    fn construction_errors() {
        assert!(matches!(
            R::template("").handler(noop).build(),
            Err(RouteError::Pattern(PatternError::EmptyTemplate))
        ));
        assert!(matches!(
            R::template("/a").method("").handler(noop).build(),
            Err(RouteError::EmptyMethod)
        ));
        assert!(matches!(
            R::template("/a").method("GE T").handler(noop).build(),
            Err(RouteError::InvalidMethod(_))
        ));
        assert!(matches!(
            R::template("/a").header("bad header", "x").handler(noop).build(),
            Err(RouteError::InvalidHeaderName(_))
        ));
        assert!(matches!(
            R::template("/a").header("host", "(").handler(noop).build(),
            Err(RouteError::InvalidHeaderPattern { .. })
        ));
        assert!(matches!(
            R::template("/a").reference("nope").build(),
            Err(RouteError::InvalidAction(_))
        ));
        assert!(matches!(R::template("/a").build(), Err(RouteError::MissingAction)));
        assert!(matches!(
            R::template("/{a}/{b}").default("a", "x").handler(noop).build(),
            Err(RouteError::Pattern(PatternError::RequiredAfterOptional { .. }))
        ));
    }

    #[test]
    fn uri_captures_override_header_captures() {
        let route = R::regex("^/(?P<id>[a-z]+)")
            .header("x-id", "(?P<id>\\d+)")
            .handler(noop)
            .build()
            .unwrap();
        let req = http::Request::builder()
            .uri("/abc")
            .header("X-Id", "42")
            .body(())
            .unwrap();
        let params = route.matches(&req).unwrap().unwrap();
        assert_eq!(params.get("id"), Some("abc"));
    }
}
