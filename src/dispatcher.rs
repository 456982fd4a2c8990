#![forbid(unsafe_code)]

mod dispatcher_macro;
mod matching;

use crate::bundle::Bundle;
use crate::config::DispatcherConfig;
use crate::error::{GenerateError, RouteError};
use crate::events::{Event, EventSink, TracingSink};
use crate::invoker::{ActionInvoker, Controllers};
use crate::request::RequestLike;
use crate::route::{Args, IntoOutcome, Route, RouteFactory, TemplateRoutes};
use crate::table::RouteTable;

use std::fmt;

use tracing::warn;

/// Owns a [`RouteTable`] and runs requests through it.
pub struct Dispatcher<Req, Res> {
    table: RouteTable<Req, Res>,
    invoker: Box<dyn ActionInvoker<Req, Res>>,
    events: Box<dyn EventSink<Req, Res>>,
    factory: Box<dyn RouteFactory<Req, Res>>,
    config: DispatcherConfig,
}

impl<Req, Res> Dispatcher<Req, Res>
where
    Req: RequestLike + 'static,
    Res: 'static,
{
    pub fn new() -> Self {
        Self {
            table: RouteTable::new(),
            invoker: Box::new(Controllers::new()),
            events: Box::new(TracingSink),
            factory: Box::new(TemplateRoutes),
            config: DispatcherConfig::default(),
        }
    }

    pub fn with_invoker(mut self, invoker: impl ActionInvoker<Req, Res> + 'static) -> Self {
        self.invoker = Box::new(invoker);
        self
    }

    pub fn with_events(mut self, events: impl EventSink<Req, Res> + 'static) -> Self {
        self.events = Box::new(events);
        self
    }

    /// Sets the syntax used by [`route`](Self::route) and the per-method shorthands.
    pub fn with_factory(mut self, factory: impl RouteFactory<Req, Res> + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }
}

impl<Req, Res> Dispatcher<Req, Res>
where
    Req: RequestLike,
{
    pub fn table(&self) -> &RouteTable<Req, Res> {
        &self.table
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn add(&mut self, route: Route<Req, Res>) -> Result<&mut Self, RouteError> {
        let position = self.table.len();
        self.insert(position, route)
    }

    pub fn insert(
        &mut self,
        position: usize,
        route: Route<Req, Res>,
    ) -> Result<&mut Self, RouteError> {
        if !self.invoker.resolves(route.action()) {
            return Err(RouteError::UnresolvableAction(route.action().to_string()));
        }
        self.table.insert(position, route)?;
        if let Some(route) = self.table.iter().nth(position) {
            self.emit(Event::RouteAdded { route });
        }
        Ok(self)
    }

    /// Adds every route a bundle provides, in order.
    pub fn register<B>(&mut self, bundle: &B) -> Result<&mut Self, RouteError>
    where
        B: Bundle<Req, Res> + ?Sized,
    {
        for builder in bundle.provides() {
            self.add(builder.build()?)?;
        }
        Ok(self)
    }

    /// Adds a handler route built by the configured [`RouteFactory`].
    pub fn route<F, O>(
        &mut self,
        method: Option<&str>,
        uri: &str,
        f: F,
    ) -> Result<&mut Self, RouteError>
    where
        F: Fn(&Args<'_, Req>) -> O + Send + Sync + 'static,
        O: IntoOutcome<Req, Res> + 'static,
        Req: 'static,
        Res: 'static,
    {
        let mut builder = self.factory.builder(uri).handler(f);
        if let Some(method) = method {
            builder = builder.method(method);
        }
        self.add(builder.build()?)
    }

    pub fn any<F, O>(&mut self, uri: &str, f: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&Args<'_, Req>) -> O + Send + Sync + 'static,
        O: IntoOutcome<Req, Res> + 'static,
        Req: 'static,
        Res: 'static,
    {
        self.route(None, uri, f)
    }

    pub fn generate<I, K, V>(&self, name: &str, params: I) -> Result<String, GenerateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.table.generate(name, params)
    }

    fn emit(&self, event: Event<'_, Req, Res>) {
        if let Err(e) = self.events.notify(&event) {
            warn!(kind = event.kind(), error = %e, "event sink failed");
        }
    }
}

macro_rules! define_method {
    ($name:ident, $method:expr) => {
        pub fn $name<F, O>(&mut self, uri: &str, f: F) -> Result<&mut Self, RouteError>
        where
            F: Fn(&Args<'_, Req>) -> O + Send + Sync + 'static,
            O: IntoOutcome<Req, Res> + 'static,
            Req: 'static,
            Res: 'static,
        {
            self.route(Some($method), uri, f)
        }
    };
}

impl<Req, Res> Dispatcher<Req, Res>
where
    Req: RequestLike,
{
    define_method!(get, "GET");
    define_method!(post, "POST");
    define_method!(put, "PUT");
    define_method!(delete, "DELETE");
    define_method!(head, "HEAD");
    define_method!(options, "OPTIONS");
    define_method!(patch, "PATCH");
}

impl<Req, Res> Default for Dispatcher<Req, Res>
where
    Req: RequestLike + 'static,
    Res: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> fmt::Debug for Dispatcher<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("table", &self.table)
            .field("config", &self.config)
            .finish()
    }
}
