use crate::error::{ActionNotFound, BoxError};
use crate::route::{Action, Args, Controller, Handler, IntoOutcome, Outcome};

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

/// Runs route actions on behalf of the dispatcher.
pub trait ActionInvoker<Req, Res>: Send + Sync {
    fn invoke(
        &self,
        action: &Action<Req, Res>,
        args: &Args<'_, Req>,
    ) -> Result<Outcome<Req, Res>, BoxError>;

    /// Whether `action` can be invoked at all. Checked when a route is registered.
    fn resolves(&self, action: &Action<Req, Res>) -> bool {
        let _ = action;
        true
    }
}

type Factory<Req, Res> = Box<dyn Fn() -> Arc<dyn Controller<Req, Res>> + Send + Sync>;

struct LazyController<Req, Res> {
    methods: Vec<Box<str>>,
    factory: Factory<Req, Res>,
    instance: OnceCell<Arc<dyn Controller<Req, Res>>>,
}

/// The default invoker.
///
/// Inline handlers and bound controllers are called directly. `Class::method`
/// references resolve to registered functions; `Class:method` references
/// resolve to registered controller factories, each instantiated once on
/// first use. A controller's methods are declared with its factory so that
/// references can be checked before any instance exists.
pub struct Controllers<Req, Res> {
    functions: HashMap<Box<str>, Arc<dyn Handler<Req, Res>>>,
    controllers: HashMap<Box<str>, LazyController<Req, Res>>,
}

impl<Req, Res> Controllers<Req, Res> {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            controllers: HashMap::new(),
        }
    }

    /// Registers the target of `"{class}::{method}"`.
    pub fn function<F, O>(&mut self, class: &str, method: &str, f: F) -> &mut Self
    where
        F: Fn(&Args<'_, Req>) -> O + Send + Sync + 'static,
        O: IntoOutcome<Req, Res> + 'static,
        Req: 'static,
        Res: 'static,
    {
        let key = format!("{}::{}", class, method);
        self.functions.insert(key.into(), Arc::new(f));
        self
    }

    /// Registers the controller behind `"{class}:{method}"` references for
    /// each of `methods`.
    pub fn controller<F, C>(&mut self, class: &str, methods: &[&str], factory: F) -> &mut Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Controller<Req, Res> + 'static,
    {
        let factory: Factory<Req, Res> =
            Box::new(move || -> Arc<dyn Controller<Req, Res>> { Arc::new(factory()) });
        self.controllers.insert(
            class.into(),
            LazyController {
                methods: methods.iter().map(|&m| m.into()).collect(),
                factory,
                instance: OnceCell::new(),
            },
        );
        self
    }

    fn declares(&self, class: &str, method: &str) -> bool {
        self.controllers
            .get(class)
            .map_or(false, |lazy| lazy.methods.iter().any(|m| &**m == method))
    }

    fn instance(&self, class: &str) -> Option<&Arc<dyn Controller<Req, Res>>> {
        let lazy = self.controllers.get(class)?;
        Some(lazy.instance.get_or_init(|| {
            debug!(class, "instantiating controller");
            (lazy.factory)()
        }))
    }
}

impl<Req, Res> ActionInvoker<Req, Res> for Controllers<Req, Res> {
    fn invoke(
        &self,
        action: &Action<Req, Res>,
        args: &Args<'_, Req>,
    ) -> Result<Outcome<Req, Res>, BoxError> {
        match action {
            Action::Handler(h) => h.call(args),
            Action::Bound { controller, method } => controller.call(method, args),
            Action::Static { class, method } => {
                let key = format!("{}::{}", class, method);
                match self.functions.get(key.as_str()) {
                    Some(f) => f.call(args),
                    None => Err(ActionNotFound(key).into()),
                }
            }
            Action::Deferred { class, method } => {
                if !self.declares(class, method) {
                    return Err(ActionNotFound(action.to_string()).into());
                }
                match self.instance(class) {
                    Some(c) if c.has_method(method) => c.call(method, args),
                    _ => Err(ActionNotFound(action.to_string()).into()),
                }
            }
        }
    }

    fn resolves(&self, action: &Action<Req, Res>) -> bool {
        match action {
            Action::Handler(_) | Action::Bound { .. } => true,
            Action::Static { class, method } => {
                let key = format!("{}::{}", class, method);
                self.functions.contains_key(key.as_str())
            }
            Action::Deferred { class, method } => self.declares(class, method),
        }
    }
}

impl<Req, Res> Default for Controllers<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}
