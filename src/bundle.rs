use crate::route::RouteBuilder;

/// A group of routes registered together, typically one per application module.
pub trait Bundle<Req, Res> {
    fn provides(&self) -> Vec<RouteBuilder<Req, Res>>;
}

impl<Req, Res, F> Bundle<Req, Res> for F
where
    F: Fn() -> Vec<RouteBuilder<Req, Res>>,
{
    fn provides(&self) -> Vec<RouteBuilder<Req, Res>> {
        (self)()
    }
}
