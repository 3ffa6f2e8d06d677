use super::route::{resolve, Behavior, ROUTES};

#[test]
fn test_every_table_prefix_resolves_to_its_behavior() {
    for (prefix, behavior) in ROUTES {
        assert_eq!(resolve(prefix), *behavior, "prefix {}", prefix);
    }
}

#[test]
fn test_unmatched_paths_fall_through_to_ok() {
    for path in ["/", "", "/api/v1/user", "/40", "/HANG", "/xm", "/reset", "/eachThird"] {
        assert_eq!(resolve(path), Behavior::Ok, "path {:?}", path);
    }
}

#[test]
fn test_prefix_match_ignores_suffix() {
    assert_eq!(resolve("/4031"), Behavior::Forbidden);
    assert_eq!(resolve("/404/missing/object"), Behavior::NotFound);
    assert_eq!(resolve("/hangover"), Behavior::Hang);
    assert_eq!(resolve("/503.html"), Behavior::Unavailable);
    assert_eq!(resolve("/xml/chunk/0"), Behavior::Xml);
    assert_eq!(resolve("/resetCounterNow"), Behavior::ResetCounter);
}

#[test]
fn test_match_is_case_sensitive() {
    assert_eq!(resolve("/XML"), Behavior::Ok);
    assert_eq!(resolve("/resetcounter"), Behavior::Ok);
    assert_eq!(resolve("/EachThirdReturns200Others503"), Behavior::Ok);
}

#[test]
fn test_alternating_routes_are_distinguished() {
    assert_eq!(
        resolve("/eachThirdReturns200Others503"),
        Behavior::EachThirdOthers503
    );
    assert_eq!(
        resolve("/eachThirdReturns200OthersHang"),
        Behavior::EachThirdOthersHang
    );
}

#[test]
fn test_prefix_must_start_the_path() {
    assert_eq!(resolve("/api/403"), Behavior::Ok);
    assert_eq!(resolve("/x/hang"), Behavior::Ok);
}
