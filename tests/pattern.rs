use switchyard::{GenerateError, Params, RoutePattern};

fn no_defaults() -> Params {
    Params::new()
}

#[test]
fn capture_notations_are_equivalent() {
    let sources = [
        r"^/bar/(?P<baz>[^/]+)",
        r"^/bar/(?<baz>[^/]+)",
        r"^/bar/(?'baz'[^/]+)",
    ];
    for source in &sources {
        let pattern = RoutePattern::regex(source, no_defaults()).unwrap();
        let params = pattern.match_uri("/bar/test").unwrap();
        assert_eq!(params.get("baz"), Some("test"), "{}", source);
        assert_eq!(pattern.generate_uri(vec![("baz", "test")]).unwrap(), "/bar/test");
    }
}

#[test]
fn template_round_trip() {
    let pattern = RoutePattern::template("/bar/{baz}", no_defaults()).unwrap();
    let uri = pattern.generate_uri(vec![("baz", "test")]).unwrap();
    assert_eq!(uri, "/bar/test");
    assert_eq!(pattern.match_uri(&uri).unwrap().get("baz"), Some("test"));
}

#[test]
fn generation_requires_every_capture_without_default() {
    let pattern = RoutePattern::template("/bar/{baz}", no_defaults()).unwrap();
    let err = pattern.generate_uri(Vec::<(String, String)>::new()).unwrap_err();
    assert!(matches!(err, GenerateError::MissingRequiredParameter(ref n) if n == "baz"));
}

#[test]
fn leftover_parameters_become_a_query() {
    let pattern = RoutePattern::template("/users/{user}/{action}", no_defaults()).unwrap();
    let uri = pattern
        .generate_uri(vec![("user", "joe"), ("action", "update"), ("bar", "baz"), ("q", "a&b")])
        .unwrap();
    assert_eq!(uri, "/users/joe/update?bar=baz&q=a%26b");
}

#[test]
fn uri_match_is_anchored_at_the_start_only() {
    let pattern = RoutePattern::template("/foo", no_defaults()).unwrap();
    assert!(pattern.is_match("/foo"));
    assert!(pattern.is_match("/foo?x=1"));
    assert!(pattern.is_match("/foobar"));
    assert!(!pattern.is_match("/x/foo"));
}

#[test]
fn template_placeholders_stop_at_separators() {
    let pattern = RoutePattern::template("/files/{name}", no_defaults()).unwrap();
    let params = pattern.match_uri("/files/report.pdf?download=1").unwrap();
    assert_eq!(params.get("name"), Some("report.pdf"));
    assert_eq!(params.parse::<u32>("name").map(|r| r.is_err()), Some(true));
}

#[test]
fn parameters_parse_into_typed_values() {
    let pattern = RoutePattern::template("/page/{n}", no_defaults()).unwrap();
    let params = pattern.match_uri("/page/12").unwrap();
    assert_eq!(params.parse::<u32>("n"), Some(Ok(12)));
    assert_eq!(params.parse::<u32>("missing"), None);
}

#[test]
fn trailing_parameter_is_required_without_default() {
    let required = RoutePattern::template("/users/{user}/{action}", no_defaults()).unwrap();
    assert!(required.match_uri("/users/joe/").is_none());

    let defaults: Params = vec![("action", "update")].into_iter().collect();
    let optional = RoutePattern::template("/users/{user}/{action}", defaults).unwrap();
    let params = optional.match_uri("/users/joe/").unwrap();
    assert_eq!(params.get("user"), Some("joe"));
    assert_eq!(params.get("action"), Some("update"));
}

#[test]
fn optional_regex_groups_generate_as_present() {
    let defaults: Params = vec![("n", "1")].into_iter().collect();
    let pattern = RoutePattern::regex(r"/page(/(?P<n>\d+))?", defaults).unwrap();
    assert_eq!(pattern.generate_uri(vec![("n", "4")]).unwrap(), "/page/4");
}
