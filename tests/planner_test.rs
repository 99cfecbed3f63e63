use routekit::{
    init_logging, planner_from_config, Config, MultiPolygon, OrderingStrategy, Point, Polygon,
    TravelMove,
};
use tempfile::tempdir;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn board() -> (MultiPolygon, MultiPolygon) {
    let keep_in = vec![Polygon::rectangle(p(0.0, 0.0), p(50.0, 50.0))].into();
    let keep_out = vec![Polygon::rectangle(p(20.0, 20.0), p(30.0, 30.0))].into();
    (keep_in, keep_out)
}

#[test]
fn test_planner_from_saved_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("routekit.toml");
    let mut config = Config::new();
    config.ordering.strategy = OrderingStrategy::Greedy;
    config.path_finding.tolerance = 0.05;
    config.save_to_file(&path).unwrap();

    let (keep_in, keep_out) = board();
    let planner = planner_from_config(&path, Some(&keep_in), &keep_out).unwrap();
    assert_eq!(planner.params().tolerance, 0.05);
    assert_eq!(planner.params().ordering, OrderingStrategy::Greedy);

    let plan = planner.plan(vec![p(45.0, 25.0), p(5.0, 25.0)], p(0.0, 25.0));
    assert_eq!(plan.items, vec![p(5.0, 25.0), p(45.0, 25.0)]);
    assert_eq!(plan.retracts, 0);
    match &plan.moves[1] {
        TravelMove::Direct(path) => assert_eq!(path.len(), 4),
        other => panic!("expected a routed move, got {:?}", other),
    }
}

#[test]
fn test_planner_with_missing_config_uses_defaults() {
    let dir = tempdir().unwrap();
    let (keep_in, keep_out) = board();
    let planner =
        planner_from_config(&dir.path().join("none.toml"), Some(&keep_in), &keep_out).unwrap();
    assert_eq!(planner.params(), &Config::default().travel_parameters());
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("routekit.json");
    std::fs::write(&path, r#"{"path_finding": {"tolerance": -1.0}}"#).unwrap();

    let (keep_in, keep_out) = board();
    let err = planner_from_config(&path, Some(&keep_in), &keep_out).unwrap_err();
    assert!(err.to_string().starts_with("Failed to load config"));
}

#[test]
fn test_init_logging_twice_fails() {
    // The first call may race with other tests in this binary; only the
    // second outcome is certain.
    let _ = init_logging();
    assert!(init_logging().is_err());
}
