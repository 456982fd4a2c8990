use crate::error::{GenerateError, RouteError};
use crate::route::Route;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Routes in match order, plus an index of the named ones.
pub struct RouteTable<Req, Res> {
    routes: Vec<Arc<Route<Req, Res>>>,
    names: HashMap<Box<str>, Arc<Route<Req, Res>>>,
}

impl<Req, Res> RouteTable<Req, Res> {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Appends `route`, indexing it under its name if it has one.
    pub fn add(&mut self, route: Route<Req, Res>) -> Result<&mut Self, RouteError> {
        let pos = self.routes.len();
        self.insert(pos, route)
    }

    /// Splices `route` in at `position`, which must lie in `0..=len`.
    pub fn insert(
        &mut self,
        position: usize,
        route: Route<Req, Res>,
    ) -> Result<&mut Self, RouteError> {
        if position > self.routes.len() {
            return Err(RouteError::PositionOutOfRange {
                position,
                len: self.routes.len(),
            });
        }
        if let Some(name) = route.name() {
            if self.names.contains_key(name) {
                return Err(RouteError::DuplicateNamedRoute(name.to_owned()));
            }
        }

        let route = Arc::new(route);
        if let Some(name) = route.name() {
            self.names.insert(name.into(), Arc::clone(&route));
        }
        self.routes.insert(position, route);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Route<Req, Res>> {
        self.names.get(name).map(|r| &**r)
    }

    /// Builds a URI for the route named `name`.
    pub fn generate<I, K, V>(&self, name: &str, params: I) -> Result<String, GenerateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let route = self
            .get(name)
            .ok_or_else(|| GenerateError::NamedRouteNotFound(name.to_owned()))?;
        route.pattern().generate_uri(params)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<Req, Res>> + '_ {
        self.routes.iter().map(|r| &**r)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<Req, Res> Default for RouteTable<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> fmt::Debug for RouteTable<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes.iter()).finish()
    }
}
