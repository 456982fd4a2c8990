use std::error::Error as StdError;

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("pattern can not be empty")]
    EmptyTemplate,

    #[error("invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error(
        "can not define required parameter {name:?} once an optional parameter has been defined"
    )]
    RequiredAfterOptional { name: String },

    #[error("parameter {name:?} appears more than once")]
    DuplicateParameter { name: String },

    #[error("parameter name {name:?} is reserved")]
    ReservedName { name: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("method can not be empty")]
    EmptyMethod,

    #[error("invalid method: {0:?}")]
    InvalidMethod(String),

    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),

    #[error("invalid pattern for header {header:?}: {source}")]
    InvalidHeaderPattern {
        header: String,
        #[source]
        source: PatternError,
    },

    #[error("action expects a handler, \"Class:method\" or \"Class::method\", got {0:?}")]
    InvalidAction(String),

    #[error("controller {controller:?} has no method {method:?}")]
    UnknownMethod { controller: String, method: String },

    #[error("route has no action")]
    MissingAction,

    #[error("action {0} can not be resolved")]
    UnresolvableAction(String),

    #[error("a route named {0:?} already exists")]
    DuplicateNamedRoute(String),

    #[error("position {position} is out of range for a table of {len} routes")]
    PositionOutOfRange { position: usize, len: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("no route named {0:?}")]
    NamedRouteNotFound(String),

    #[error("missing required parameter {0:?}")]
    MissingRequiredParameter(String),
}

#[derive(Debug, thiserror::Error)]
#[error("header {header:?} is not readable: {reason}")]
pub struct HeaderAccessError {
    header: String,
    reason: String,
}

impl HeaderAccessError {
    pub fn new(header: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            reason: reason.into(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid header criteria: {0}")]
    InvalidHeaderCriteria(#[from] HeaderAccessError),

    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    #[error("request was forwarded more than {limit} times")]
    TooManyForwards { limit: usize },
}

/// Returned by [`Controllers`](crate::Controllers) when an action can not be
/// resolved at invocation time.
#[derive(Debug, thiserror::Error)]
#[error("action {0} doesn't exist")]
pub struct ActionNotFound(pub String);
