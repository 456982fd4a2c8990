use crate::error::{BoxError, RouteError};
use crate::params::Params;
use crate::pattern::REQUEST_KEY;

use std::fmt;
use std::sync::Arc;

/// What an action asks the dispatcher to do next.
#[derive(Debug)]
pub enum Outcome<Req, Res> {
    /// Stop and return this response.
    Respond(Res),
    /// Restart matching against a replacement request.
    Forward(Req),
    /// Fall through to the next route.
    Continue,
}

pub trait IntoOutcome<Req, Res> {
    fn into_outcome(self) -> Result<Outcome<Req, Res>, BoxError>;
}

impl<Req, Res> IntoOutcome<Req, Res> for Outcome<Req, Res> {
    fn into_outcome(self) -> Result<Outcome<Req, Res>, BoxError> {
        Ok(self)
    }
}

impl<Req, Res> IntoOutcome<Req, Res> for () {
    fn into_outcome(self) -> Result<Outcome<Req, Res>, BoxError> {
        Ok(Outcome::Continue)
    }
}

impl<Req, Res, T> IntoOutcome<Req, Res> for Option<T>
where
    T: IntoOutcome<Req, Res>,
{
    fn into_outcome(self) -> Result<Outcome<Req, Res>, BoxError> {
        match self {
            Some(t) => t.into_outcome(),
            None => Ok(Outcome::Continue),
        }
    }
}

impl<Req, Res, T, E> IntoOutcome<Req, Res> for Result<T, E>
where
    T: IntoOutcome<Req, Res>,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<Outcome<Req, Res>, BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}

impl<Req, B> IntoOutcome<Req, http::Response<B>> for http::Response<B> {
    fn into_outcome(self) -> Result<Outcome<Req, http::Response<B>>, BoxError> {
        Ok(Outcome::Respond(self))
    }
}

impl<Res, B> IntoOutcome<http::Request<B>, Res> for http::Request<B> {
    fn into_outcome(self) -> Result<Outcome<http::Request<B>, Res>, BoxError> {
        Ok(Outcome::Forward(self))
    }
}

/// Arguments handed to an action: the matched parameters and the request.
pub struct Args<'a, Req> {
    request: &'a Req,
    params: Params,
}

impl<'a, Req> Args<'a, Req> {
    pub(crate) fn new(request: &'a Req, params: Params) -> Self {
        Self { request, params }
    }

    pub fn request(&self) -> &'a Req {
        self.request
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

impl<Req> fmt::Display for Args<'_, Req> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.params.is_empty() {
            write!(f, "{}, ", self.params)?;
        }
        write!(f, "{}=[{}]", REQUEST_KEY, REQUEST_KEY)
    }
}

pub trait Handler<Req, Res>: Send + Sync {
    fn call(&self, args: &Args<'_, Req>) -> Result<Outcome<Req, Res>, BoxError>;
}

impl<Req, Res, F, O> Handler<Req, Res> for F
where
    F: Fn(&Args<'_, Req>) -> O + Send + Sync,
    O: IntoOutcome<Req, Res>,
{
    fn call(&self, args: &Args<'_, Req>) -> Result<Outcome<Req, Res>, BoxError> {
        (self)(args).into_outcome()
    }
}

/// An object exposing several actions by method name.
pub trait Controller<Req, Res>: Send + Sync {
    fn name(&self) -> &str;

    fn has_method(&self, method: &str) -> bool;

    fn call(&self, method: &str, args: &Args<'_, Req>) -> Result<Outcome<Req, Res>, BoxError>;
}

/// A resolved route action.
pub enum Action<Req, Res> {
    /// An inline handler.
    Handler(Arc<dyn Handler<Req, Res>>),
    /// A method on a controller instance.
    Bound {
        controller: Arc<dyn Controller<Req, Res>>,
        method: Box<str>,
    },
    /// `Class::method`, a free function registered with the invoker.
    Static { class: Box<str>, method: Box<str> },
    /// `Class:method`, a controller the invoker instantiates on first use.
    Deferred { class: Box<str>, method: Box<str> },
}

impl<Req, Res> Action<Req, Res> {
    pub fn handler<F, O>(f: F) -> Self
    where
        F: Fn(&Args<'_, Req>) -> O + Send + Sync + 'static,
        O: IntoOutcome<Req, Res> + 'static,
        Req: 'static,
        Res: 'static,
    {
        Action::Handler(Arc::new(f))
    }

    pub fn bound(
        controller: Arc<dyn Controller<Req, Res>>,
        method: &str,
    ) -> Result<Self, RouteError> {
        if !controller.has_method(method) {
            return Err(RouteError::UnknownMethod {
                controller: controller.name().to_owned(),
                method: method.to_owned(),
            });
        }
        Ok(Action::Bound {
            controller,
            method: method.into(),
        })
    }

    /// Parses `"Class::method"` or `"Class:method"`.
    pub fn reference(s: &str) -> Result<Self, RouteError> {
        let invalid = || RouteError::InvalidAction(s.to_owned());

        if let Some(pos) = s.find("::") {
            let (class, method) = (&s[..pos], &s[pos + 2..]);
            if class.is_empty() || method.is_empty() || method.contains(':') {
                return Err(invalid());
            }
            return Ok(Action::Static {
                class: class.into(),
                method: method.into(),
            });
        }

        let mut parts = s.splitn(2, ':');
        match (parts.next(), parts.next()) {
            (Some(class), Some(method)) if !class.is_empty() && !method.is_empty() => {
                Ok(Action::Deferred {
                    class: class.into(),
                    method: method.into(),
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl<Req, Res> Clone for Action<Req, Res> {
    fn clone(&self) -> Self {
        match self {
            Action::Handler(h) => Action::Handler(Arc::clone(h)),
            Action::Bound { controller, method } => Action::Bound {
                controller: Arc::clone(controller),
                method: method.clone(),
            },
            Action::Static { class, method } => Action::Static {
                class: class.clone(),
                method: method.clone(),
            },
            Action::Deferred { class, method } => Action::Deferred {
                class: class.clone(),
                method: method.clone(),
            },
        }
    }
}

impl<Req, Res> fmt::Display for Action<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Handler(_) => f.write_str("handler"),
            Action::Bound { controller, method } => {
                write!(f, "{}->{}()", controller.name(), method)
            }
            Action::Static { class, method } => write!(f, "{}::{}", class, method),
            Action::Deferred { class, method } => write!(f, "{}:{}", class, method),
        }
    }
}

impl<Req, Res> fmt::Debug for Action<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action({})", self)
    }
}
