#![deny(unsafe_code)]

//! An ordered request router.
//!
//! Routes are tried in insertion order. Each one tests the request method,
//! any header criteria and the URI; the first match runs its action, which
//! can respond, fall through to the next route, or forward a rewritten
//! request back to the top of the table. Named routes can also be turned
//! back into URIs.

mod bundle;
mod config;
mod dispatcher;
mod error;
mod events;
mod invoker;
mod params;
mod pattern;
mod request;
mod route;
mod table;

pub use crate::bundle::Bundle;
pub use crate::config::DispatcherConfig;
pub use crate::dispatcher::Dispatcher;
pub use crate::error::{
    ActionNotFound, BoxError, DispatchError, GenerateError, HeaderAccessError, PatternError,
    RouteError,
};
pub use crate::events::{Event, EventSink, TracingSink};
pub use crate::invoker::{ActionInvoker, Controllers};
pub use crate::params::Params;
pub use crate::pattern::{RoutePattern, REQUEST_KEY};
pub use crate::request::RequestLike;
pub use crate::route::{
    Action, Args, Controller, Handler, IntoOutcome, Outcome, PrefixRoutes, RegexRoutes, Route,
    RouteBuilder, RouteFactory, Syntax, TemplateRoutes,
};
pub use crate::table::RouteTable;

pub use http::Method;
