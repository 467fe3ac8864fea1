use chrono::{DateTime, FixedOffset};
use milepost::{
    distance, find_nearest, load, GeoPoint, LoadError, MatchError, PhotoStamp, ReferenceDataset,
    StampConfig,
};

const ROUTE_JSON: &str = r#"[
    {"Abcisa": "PR10", "Latitud": 4.60, "Longitud": -74.08},
    {"Abcisa": "PR20", "Latitud": 4.65, "Longitud": -74.10},
    {"Abcisa": "PR30", "Latitud": 4.70, "Longitud": -74.12}
]"#;

fn pt(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).unwrap()
}

#[test]
fn load_match_and_stamp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("magdalena.json");
    std::fs::write(&path, ROUTE_JSON).unwrap();

    let route = load::from_path(&path).unwrap();
    assert_eq!(route.len(), 3);

    let here = pt(4.601, -74.081);
    let found = find_nearest(here, &route).unwrap();
    assert_eq!(found.point.label, "PR10");
    assert!((found.distance_m - distance(here, pt(4.60, -74.08))).abs() < 1e-9);

    let taken: DateTime<FixedOffset> =
        DateTime::parse_from_rfc3339("2026-10-15T16:45:00-05:00").unwrap();
    let stamp = PhotoStamp::new(&taken, &found, &StampConfig::for_route("MAGDALENA 2")).unwrap();
    assert_eq!(
        stamp.lines(),
        [
            "Date: 2026-10-15",
            "Time: 16:45:00",
            "Coords: 4.600000, -74.080000",
            "PR: PR10     MAGDALENA 2",
        ]
    );
    assert_eq!(stamp.file_name(), format!("{}.jpeg", taken.timestamp_millis()));
}

#[test]
fn csv_and_json_agree() {
    let csv = "label,latitude,longitude\nPR10,4.60,-74.08\nPR20,4.65,-74.10\nPR30,4.70,-74.12\n";
    let from_csv = load::from_csv_reader(csv.as_bytes()).unwrap();
    let from_json = load::from_json_reader(ROUTE_JSON.as_bytes()).unwrap();
    assert_eq!(from_csv, from_json);

    for query in [pt(4.62, -74.09), pt(4.69, -74.11), pt(5.0, -75.0)] {
        assert_eq!(from_csv.nearest(query), from_json.nearest(query));
    }
}

#[test]
fn walking_the_route_visits_mileposts_in_order() {
    let route = load::from_json_reader(ROUTE_JSON.as_bytes()).unwrap();

    let labels: Vec<String> = (0..=10)
        .map(|i| {
            let t = f64::from(i) / 10.0;
            let q = pt(4.60 + 0.10 * t, -74.08 - 0.04 * t);
            route.nearest(q).unwrap().point.label
        })
        .collect();

    assert_eq!(labels.first().map(String::as_str), Some("PR10"));
    assert_eq!(labels.last().map(String::as_str), Some("PR30"));
    assert!(labels.contains(&"PR20".to_string()));

    let positions: Vec<usize> = labels
        .iter()
        .map(|l| ["PR10", "PR20", "PR30"].iter().position(|x| x == l).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn empty_file_loads_but_cannot_match() {
    let route = load::from_json_reader("[]".as_bytes()).unwrap();
    assert!(route.is_empty());
    assert_eq!(route.nearest(pt(0.0, 0.0)), Err(MatchError::EmptyDataset));
    assert!(route.within(pt(0.0, 0.0), 1_000.0).is_empty());
}

#[test]
fn bad_record_fails_the_whole_load() {
    let json = r#"[
        {"label": "PR10", "latitude": 4.60, "longitude": -74.08},
        {"label": "PR20", "latitude": -91.0, "longitude": -74.10}
    ]"#;
    let err = load::from_json_reader(json.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::InvalidRecord { index: 1, .. }));
}

#[test]
fn radius_search_over_loaded_route() {
    let route: ReferenceDataset = load::from_json_reader(ROUTE_JSON.as_bytes()).unwrap();
    let here = pt(4.64, -74.096);

    let nearby = route.within(here, 7_000.0);
    let labels: Vec<&str> = nearby.iter().map(|m| m.point.label.as_str()).collect();
    assert_eq!(labels, ["PR20", "PR10"]);
    assert_eq!(nearby[0], route.nearest(here).unwrap());
}
