use super::action::{Action, Args, Controller, IntoOutcome};
use super::Route;
use crate::error::RouteError;
use crate::params::Params;
use crate::pattern::RoutePattern;

use std::sync::Arc;

use http::header::HeaderName;
use http::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `{name}` placeholders.
    Template,
    /// Raw regular expression.
    Regex,
    /// Literal prefix; header values are compared exactly.
    Prefix,
}

/// Collects route criteria; errors are reported by [`build`](RouteBuilder::build).
#[must_use]
pub struct RouteBuilder<Req, Res> {
    inner: Result<Parts<Req, Res>, RouteError>,
}

struct Parts<Req, Res> {
    syntax: Syntax,
    uri: String,
    name: Option<String>,
    method: Option<Method>,
    headers: Vec<(HeaderName, String)>,
    defaults: Params,
    action: Option<Action<Req, Res>>,
}

impl<Req, Res> RouteBuilder<Req, Res> {
    pub fn new(syntax: Syntax, uri: &str) -> Self {
        Self {
            inner: Ok(Parts {
                syntax,
                uri: uri.to_owned(),
                name: None,
                method: None,
                headers: Vec::new(),
                defaults: Params::new(),
                action: None,
            }),
        }
    }

    pub fn name(self, name: &str) -> Self {
        self.and_then(|mut p| {
            p.name = Some(name.to_owned());
            Ok(p)
        })
    }

    /// Restricts the route to one method, compared case-insensitively.
    pub fn method(self, method: impl AsRef<str>) -> Self {
        let method = method.as_ref();
        self.and_then(|mut p| {
            if method.is_empty() {
                return Err(RouteError::EmptyMethod);
            }
            let parsed = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|_| RouteError::InvalidMethod(method.to_owned()))?;
            p.method = Some(parsed);
            Ok(p)
        })
    }

    /// Requires header `name` to match `pattern`. Names are case-insensitive.
    pub fn header(self, name: &str, pattern: &str) -> Self {
        self.and_then(|mut p| {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RouteError::InvalidHeaderName(name.to_owned()))?;
            p.headers.retain(|(n, _)| *n != name);
            p.headers.push((name, pattern.to_owned()));
            Ok(p)
        })
    }

    pub fn default(self, name: &str, value: &str) -> Self {
        self.and_then(|mut p| {
            p.defaults.insert(name, value);
            Ok(p)
        })
    }

    pub fn action(self, action: Action<Req, Res>) -> Self {
        self.and_then(|mut p| {
            p.action = Some(action);
            Ok(p)
        })
    }

    pub fn handler<F, O>(self, f: F) -> Self
    where
        F: Fn(&Args<'_, Req>) -> O + Send + Sync + 'static,
        O: IntoOutcome<Req, Res> + 'static,
        Req: 'static,
        Res: 'static,
    {
        self.action(Action::handler(f))
    }

    /// `"Class:method"` or `"Class::method"`.
    pub fn reference(self, reference: &str) -> Self {
        self.and_then(|p| Action::reference(reference).map(|a| Parts { action: Some(a), ..p }))
    }

    pub fn bound(self, controller: Arc<dyn Controller<Req, Res>>, method: &str) -> Self {
        self.and_then(|p| Action::bound(controller, method).map(|a| Parts { action: Some(a), ..p }))
    }

    pub fn build(self) -> Result<Route<Req, Res>, RouteError> {
        let p = self.inner?;
        let action = p.action.ok_or(RouteError::MissingAction)?;

        let pattern = match p.syntax {
            Syntax::Template => RoutePattern::template(&p.uri, p.defaults)?,
            Syntax::Regex => RoutePattern::regex(&p.uri, p.defaults)?,
            Syntax::Prefix => RoutePattern::prefix(&p.uri)?,
        };

        let mut headers = Vec::with_capacity(p.headers.len());
        for (name, value) in p.headers {
            let compiled = match p.syntax {
                Syntax::Prefix => RoutePattern::exact(&value),
                Syntax::Template | Syntax::Regex => RoutePattern::header(&value),
            };
            match compiled {
                Ok(c) => headers.push((name, c)),
                Err(source) => {
                    return Err(RouteError::InvalidHeaderPattern {
                        header: name.as_str().to_owned(),
                        source,
                    })
                }
            }
        }

        Ok(Route {
            name: p.name.map(Into::into),
            pattern,
            method: p.method,
            headers,
            action,
        })
    }

    fn and_then(
        self,
        f: impl FnOnce(Parts<Req, Res>) -> Result<Parts<Req, Res>, RouteError>,
    ) -> Self {
        Self {
            inner: self.inner.and_then(f),
        }
    }
}

/// Chooses the pattern syntax for routes registered by URI alone.
pub trait RouteFactory<Req, Res>: Send + Sync {
    fn builder(&self, uri: &str) -> RouteBuilder<Req, Res>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateRoutes;

#[derive(Debug, Default, Clone, Copy)]
pub struct RegexRoutes;

#[derive(Debug, Default, Clone, Copy)]
pub struct PrefixRoutes;

macro_rules! define_factory {
    ($ty:ty, $syntax:expr) => {
        impl<Req, Res> RouteFactory<Req, Res> for $ty {
            fn builder(&self, uri: &str) -> RouteBuilder<Req, Res> {
                RouteBuilder::new($syntax, uri)
            }
        }
    };
}

define_factory!(TemplateRoutes, Syntax::Template);
define_factory!(RegexRoutes, Syntax::Regex);
define_factory!(PrefixRoutes, Syntax::Prefix);
