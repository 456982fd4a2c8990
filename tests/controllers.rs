use switchyard::{Args, BoxError, Controller, Controllers, Dispatcher, Outcome, Route, RouteError};

use std::sync::Arc;

type Req = http::Request<()>;
type Res = http::Response<String>;

fn request(uri: &str) -> Req {
    http::Request::get(uri).body(()).unwrap()
}

struct Users;

impl Controller<Req, Res> for Users {
    fn name(&self) -> &str {
        "Users"
    }

    fn has_method(&self, method: &str) -> bool {
        matches!(method, "show" | "list")
    }

    fn call(&self, method: &str, args: &Args<'_, Req>) -> Result<Outcome<Req, Res>, BoxError> {
        let body = match method {
            "show" => format!("user {}", args.get("id").unwrap_or("?")),
            "list" => "all users".to_owned(),
            _ => return Err(format!("no method {}", method).into()),
        };
        Ok(Outcome::Respond(http::Response::new(body)))
    }
}

fn dispatcher() -> Dispatcher<Req, Res> {
    let mut invoker = Controllers::new();
    invoker
        .controller("Users", &["show", "list"], || Users)
        .function("Pages", "about", |_: &Args<'_, Req>| {
            http::Response::new("about".to_owned())
        });
    Dispatcher::new().with_invoker(invoker)
}

#[test]
fn references_resolve_through_the_invoker() {
    let mut d = dispatcher();
    d.add(Route::template("/users/{id}").reference("Users:show").build().unwrap())
        .unwrap();
    d.add(Route::template("/about").reference("Pages::about").build().unwrap())
        .unwrap();

    let res = d.dispatch(request("/users/7")).unwrap().unwrap();
    assert_eq!(res.into_body(), "user 7");
    let res = d.dispatch(request("/about")).unwrap().unwrap();
    assert_eq!(res.into_body(), "about");
}

#[test]
fn bound_controllers_are_called_directly() {
    let mut d = dispatcher();
    let users: Arc<dyn Controller<Req, Res>> = Arc::new(Users);
    d.add(Route::template("/people").bound(Arc::clone(&users), "list").build().unwrap())
        .unwrap();
    let res = d.dispatch(request("/people")).unwrap().unwrap();
    assert_eq!(res.into_body(), "all users");

    let err = Route::template("/people").bound(users, "delete").build().unwrap_err();
    assert!(matches!(err, RouteError::UnknownMethod { .. }));
}

#[test]
fn unknown_static_function_is_unresolvable() {
    let mut d = dispatcher();
    let err = d
        .add(Route::template("/contact").reference("Pages::contact").build().unwrap())
        .unwrap_err();
    assert_eq!(err.to_string(), "action Pages::contact can not be resolved");
}

#[test]
fn undeclared_controller_method_is_unresolvable() {
    let mut d = dispatcher();
    let err = d
        .add(Route::template("/u").reference("Users:nonexistent").build().unwrap())
        .unwrap_err();
    assert!(matches!(err, RouteError::UnresolvableAction(ref a) if a == "Users:nonexistent"));
    assert!(d.table().is_empty());

    d.any("/u", |_: &Args<'_, Req>| http::Response::new("fallback".to_owned()))
        .unwrap();
    let res = d.dispatch(request("/u")).unwrap().unwrap();
    assert_eq!(res.into_body(), "fallback");
}
