// tests/scenarios.rs
use tc_scrape::{extract, extract_with_report, Element, Issue, Node, Snapshot, StatKind, StatValue};

fn followers_widget() -> Vec<Element> {
    vec![
        Element::new("Followers", 500, 100),
        Element::new("1", 400, 90),
        Element::new("2", 400, 98),
        Element::new(",", 400, 106),
        Element::new("8", 400, 114),
        Element::new("5", 400, 122),
        Element::new("0", 400, 130),
    ]
}

fn found(text: &str) -> StatValue {
    StatValue::Found(text.to_string())
}

#[test]
fn digits_above_caption_read_in_order() {
    let result = extract(&Snapshot::from(followers_widget()));
    assert_eq!(result.get(StatKind::Followers), &found("12,850"));
}

#[test]
fn animation_ghost_is_dropped() {
    let mut els = followers_widget();
    els.push(Element::new("1", 401, 91));
    let result = extract(&Snapshot::from(els));
    assert_eq!(result.get(StatKind::Followers), &found("12,850"));
}

#[test]
fn mid_roll_ghost_with_other_glyph_is_dropped() {
    let mut els = followers_widget();
    els.push(Element::new("7", 401, 91));
    els.push(Element::new("3", 404, 117));
    let result = extract(&Snapshot::from(els));
    assert_eq!(result.get(StatKind::Followers), &found("12,850"));
}

#[test]
fn caption_without_digits_is_not_found() {
    // Flat capture: no containers, so the fallback has nothing to walk.
    let snap = Snapshot::from(vec![Element::new("Likes", 500, 100), Element::new("7", 800, 100)]);
    let report = extract_with_report(&snap);
    assert_eq!(report.result.get(StatKind::Likes), &StatValue::NotFound);
    assert_eq!(report.result.get(StatKind::Likes).as_str(), "Not found");
    assert!(report.issues.contains(&Issue::LabelUnresolved(StatKind::Likes)));

    // With containers, but none holding digits.
    let snap = Snapshot::new(vec![
        Node::new(Element::new("", 0, 0), None),
        Node::new(Element::new("", 0, 0), Some(0)),
        Node::new(Element::new("Likes", 500, 100), Some(1)),
        Node::new(Element::new("Videos", 500, 600), Some(1)),
    ])
    .unwrap();
    assert_eq!(extract(&snap).get(StatKind::Likes), &StatValue::NotFound);
}

#[test]
fn stray_separators_are_trimmed() {
    let snap = Snapshot::from(vec![
        Element::new("Videos", 500, 100),
        Element::new(",,", 420, 90),
        Element::new("18", 420, 110),
        Element::new(",,", 420, 130),
    ]);
    assert_eq!(extract(&snap).get(StatKind::Videos), &found("18"));
}

#[test]
fn full_profile_header() {
    let mut els = followers_widget();
    els.extend([
        Element::new("Likes", 500, 400),
        Element::new("3", 420, 400),
        Element::new("4", 420, 412),
        Element::new("Following", 500, 700),
        Element::new("0", 420, 700),
        Element::new("Videos", 500, 1000),
        Element::new("2", 420, 1000),
        Element::new("7", 420, 1012),
        Element::new("Share", 600, 100),
    ]);
    let report = extract_with_report(&Snapshot::from(els));
    assert!(report.result.is_complete());
    assert_eq!(report.result.get(StatKind::Likes), &found("34"));
    assert_eq!(report.result.get(StatKind::Following), &found("0"));
    assert_eq!(report.result.get(StatKind::Videos), &found("27"));
    assert!(report.issues.is_empty());
}

#[test]
fn window_edges_are_inclusive() {
    let inside = Snapshot::from(vec![
        Element::new("Likes", 500, 300),
        Element::new("4", 400, 100), // 100 up, 200 left
        Element::new("2", 400, 500), // 100 up, 200 right
    ]);
    assert_eq!(extract(&inside).get(StatKind::Likes), &found("42"));

    let outside = Snapshot::from(vec![
        Element::new("Likes", 500, 300),
        Element::new("4", 399, 300), // 101 up
        Element::new("2", 450, 501), // 201 right
        Element::new("9", 501, 300), // below
    ]);
    assert_eq!(extract(&outside).get(StatKind::Likes), &StatValue::NotFound);
}

#[test]
fn one_fragment_can_serve_two_captions() {
    let snap = Snapshot::from(vec![
        Element::new("Following", 500, 100),
        Element::new("Videos", 500, 250),
        Element::new("6", 450, 180),
    ]);
    let result = extract(&snap);
    assert_eq!(result.get(StatKind::Following), &found("6"));
    assert_eq!(result.get(StatKind::Videos), &found("6"));
}

#[test]
fn empty_snapshot_yields_four_not_found() {
    let report = extract_with_report(&Snapshot::from(Vec::<Element>::new()));
    assert_eq!(report.issues[0], Issue::SnapshotEmpty);
    for kind in StatKind::ALL {
        assert_eq!(report.result.get(kind), &StatValue::NotFound);
    }
}

#[test]
fn snapshot_from_json() {
    let json = r#"{
        "source": "https://example.test/@amy",
        "nodes": [
            {"text": "", "row": 0, "col": 0},
            {"text": "Likes", "row": 500, "col": 100, "parent": 0},
            {"text": "9", "row": 520, "col": 100, "parent": 0}
        ]
    }"#;
    let snap: Snapshot = serde_json::from_str(json).unwrap();
    let report = extract_with_report(&snap);
    // below the caption: only the container walk sees it
    assert_eq!(report.result.get(StatKind::Likes), &found("9"));
    assert_eq!(report.pass_for(StatKind::Likes), Some("keyword"));
}
