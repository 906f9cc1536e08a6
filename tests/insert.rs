use pathrouter::{InsertError, Router};

struct InsertTest(Vec<(&'static str, Result<(), InsertError>)>);

impl InsertTest {
    fn run(self) {
        let mut router = Router::new();
        for (route, expected) in self.0 {
            let got = router.insert(route, route.to_owned());
            assert_eq!(got, expected, "{route}");
        }
    }
}

fn conflict(with: &'static str) -> InsertError {
    InsertError::Conflict { with: with.into() }
}

#[test]
fn valid_routes() {
    InsertTest(vec![
        ("", Ok(())),
        ("a", Ok(())),
        ("a/b", Ok(())),
        ("a/c", Ok(())),
        ("aba", Ok(())),
        ("abc", Ok(())),
        ("ac", Ok(())),
        ("b", Ok(())),
        ("/a/:a", Ok(())),
        ("/b/:b", Ok(())),
        ("/a/*", Err(conflict("/a/:a"))),
        ("/c/*", Ok(())),
        ("/d/*", Ok(())),
    ])
    .run()
}

#[test]
fn single_routes() {
    for route in ["", "a", ":a", "/:a", "*", "/a/*", "/a/:b/*", "/a-:b/c-:d", "/:a/:b"] {
        let mut router = Router::new();
        assert_eq!(router.insert(route, ()), Ok(()), "{route}");
    }
}

#[test]
fn invalid_routes() {
    for route in [":", "*:a", ":a:b", ":a*", "**", "*/a", "/a/:", "/a:/b", "/:a/*x", "/a/*/"] {
        let mut router = Router::new();
        assert_eq!(router.insert(route, ()), Err(InsertError::InvalidPath), "{route}");
        assert!(router.is_empty(), "{route}");
    }
}

#[test]
fn invalid_below_existing() {
    InsertTest(vec![
        ("/a", Ok(())),
        ("/a/*:a", Err(InsertError::InvalidPath)),
        ("/b/*", Ok(())),
        ("/b/*/c", Err(InsertError::InvalidPath)),
        ("/b/*c", Err(InsertError::InvalidPath)),
        ("/c/:c", Ok(())),
        ("/c/:c:d", Err(InsertError::InvalidPath)),
        ("/c/:c*", Err(InsertError::InvalidPath)),
        ("/d/:", Err(InsertError::InvalidPath)),
    ])
    .run()
}

#[test]
fn static_then_param() {
    InsertTest(vec![("/a", Ok(())), ("/:b", Err(conflict("/a")))]).run()
}

#[test]
fn param_then_static() {
    InsertTest(vec![
        ("/:b", Ok(())),
        ("/a", Err(conflict("/:b"))),
        ("/x-:y", Err(conflict("/:b"))),
    ])
    .run()
}

#[test]
fn param_names() {
    InsertTest(vec![
        ("/:a", Ok(())),
        ("/:ab", Err(conflict("/:a"))),
        ("/:b", Err(conflict("/:a"))),
        ("/:a", Ok(())),
    ])
    .run();

    InsertTest(vec![("/:ab", Ok(())), ("/:ac", Err(conflict("/:ab")))]).run();
}

#[test]
fn trailing_beside_param() {
    InsertTest(vec![
        ("/a/b/:c", Ok(())),
        ("/a/*", Err(conflict("/a/b/:c"))),
        ("/cmd/:tool/", Ok(())),
        ("/cmd/:tool/:sub", Ok(())),
        ("/cmd/:tool/*", Err(conflict("/cmd/:tool/:sub"))),
        ("/cmd/:tool/misc", Err(conflict("/cmd/:tool/:sub"))),
    ])
    .run()
}

#[test]
fn static_beside_trailing() {
    InsertTest(vec![
        ("/src/*", Ok(())),
        ("/src/:file", Err(conflict("/src/*"))),
        ("/src/static.json", Err(conflict("/src/*"))),
        ("/src/", Ok(())),
        ("/src", Ok(())),
        ("/src1/*", Ok(())),
    ])
    .run()
}

#[test]
fn param_followed_by_literal() {
    InsertTest(vec![
        ("/users/:id", Ok(())),
        ("/users/:idx", Err(conflict("/users/:id"))),
        ("/users/:id/posts", Ok(())),
        ("/users/:id/posts/:post", Ok(())),
        ("/users/:id-x", Err(conflict("/users/:id/posts/:post"))),
        ("/users/:name", Err(conflict("/users/:id/posts/:post"))),
    ])
    .run()
}

#[test]
fn duplicates_replace() {
    let mut router = Router::new();
    for (value, route) in ["/a/b", "/a/c", "/a/b", "", "", "/q/:x/*", "/q/:x/*"]
        .into_iter()
        .enumerate()
    {
        assert_eq!(router.insert(route, value), Ok(()), "{route}");
    }

    assert_eq!(router.len(), 4);
    assert_eq!(router.at("/a/b").map(|m| *m.value), Ok(2));
    assert_eq!(router.at("").map(|m| *m.value), Ok(4));
    assert_eq!(router.at("/q/r/s").map(|m| *m.value), Ok(6));
}

#[test]
fn failed_insert_keeps_routes() {
    let mut router = Router::new();
    router.insert("/abc", 1).unwrap();
    router.insert("/abd/:x", 2).unwrap();

    assert_eq!(router.insert("/a:b", 3), Err(conflict("/abc")));
    assert_eq!(router.insert("/ab*", 3), Err(conflict("/abc")));
    assert_eq!(router.insert("/abd/:y", 3), Err(conflict("/abd/:x")));

    assert_eq!(router.len(), 2);
    assert_eq!(router.at("/abc").map(|m| *m.value), Ok(1));
    assert_eq!(router.at("/abd/z").map(|m| *m.value), Ok(2));
    assert!(router.at("/a").is_err());
}

#[test]
fn error_messages() {
    assert_eq!(InsertError::InvalidPath.to_string(), "invalid route pattern");
    assert_eq!(
        conflict("/a").to_string(),
        "insertion failed due to conflict with previously registered route: /a"
    );
}
