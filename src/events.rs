use crate::error::BoxError;
use crate::request::RequestLike;
use crate::route::{Args, Route};

use tracing::{debug, info, warn};

/// Notifications emitted while routes are registered and requests dispatched.
pub enum Event<'a, Req, Res> {
    RouteAdded {
        route: &'a Route<Req, Res>,
    },
    Received {
        request: &'a Req,
    },
    Dispatched {
        request: &'a Req,
        route: &'a Route<Req, Res>,
        args: &'a Args<'a, Req>,
    },
    HandlerFailed {
        request: &'a Req,
        route: &'a Route<Req, Res>,
        error: &'a BoxError,
    },
    NotFound {
        request: &'a Req,
    },
}

impl<Req, Res> Event<'_, Req, Res> {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::RouteAdded { .. } => "route-added",
            Event::Received { .. } => "received",
            Event::Dispatched { .. } => "dispatched",
            Event::HandlerFailed { .. } => "handler-failed",
            Event::NotFound { .. } => "not-found",
        }
    }
}

/// Receives [`Event`]s. Errors are logged and otherwise ignored.
pub trait EventSink<Req, Res>: Send + Sync {
    fn notify(&self, event: &Event<'_, Req, Res>) -> Result<(), BoxError>;
}

impl<Req, Res, F> EventSink<Req, Res> for F
where
    F: Fn(&Event<'_, Req, Res>) -> Result<(), BoxError> + Send + Sync,
{
    fn notify(&self, event: &Event<'_, Req, Res>) -> Result<(), BoxError> {
        (self)(event)
    }
}

/// Writes events to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl<Req: RequestLike, Res> EventSink<Req, Res> for TracingSink {
    fn notify(&self, event: &Event<'_, Req, Res>) -> Result<(), BoxError> {
        match event {
            Event::RouteAdded { route } => {
                debug!(
                    name = route.name(),
                    "added route {:?} to {:?}",
                    route.pattern().as_str(),
                    route.action().to_string()
                )
            }
            Event::Received { request } => info!("{}", describe_received(*request)),
            Event::Dispatched { request, route, args } => {
                info!("{}", describe_dispatched(*request, route, args))
            }
            Event::HandlerFailed { request, route, error } => warn!(
                "action {:?} failed on request \"{} {}\": {}",
                route.action().to_string(),
                request.method(),
                request.uri(),
                error
            ),
            Event::NotFound { request } => {
                info!("no route found to dispatch request {:?}", request.uri())
            }
        }
        Ok(())
    }
}

pub(crate) fn describe_received<Req: RequestLike>(request: &Req) -> String {
    format!("received request \"{} {}\"", request.method(), request.uri())
}

pub(crate) fn describe_dispatched<Req: RequestLike, Res>(
    request: &Req,
    route: &Route<Req, Res>,
    args: &Args<'_, Req>,
) -> String {
    format!(
        "dispatched request \"{} {}\" to \"{}\" with arguments ({})",
        request.method(),
        request.uri(),
        route.action(),
        args
    )
}
