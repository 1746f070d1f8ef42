use tagsheet::convert::render_json;
use tagsheet::ingestion::{RawCell, SharedStrings, rows_from_raw_cells};
use tagsheet::parsing::{SheetLayout, detect_layout, parse_rows, parse_with_layout};
use tagsheet::types::{Document, Row, SheetFormat};

fn row(cells: &[(usize, &str)]) -> Row {
    Row::from_cells(cells.iter().copied())
}

fn sections_of(doc: &Document) -> &[tagsheet::types::Section] {
    match doc {
        Document::Flat { sections, .. } => sections,
        Document::Hierarchical { .. } => panic!("expected flat document"),
    }
}

fn clusters_of(doc: &Document) -> &[tagsheet::types::Cluster] {
    match doc {
        Document::Hierarchical { clusters, .. } => clusters,
        Document::Flat { .. } => panic!("expected hierarchical document"),
    }
}

fn plant_rows() -> Vec<Row> {
    vec![
        row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "TI1"), (4, "Temp"), (5, "°C"), (6, "T1"), (7, "5")]),
        row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Motors"), (3, "M1"), (4, "Pump"), (6, "P1")]),
        row(&[(0, "Cluster1"), (1, "Plant2"), (2, "Sensors"), (3, "TI2"), (4, "Temp"), (6, "T2")]),
        row(&[(0, "Cluster2"), (1, "Plant1"), (2, "Sensors"), (3, "TI3"), (4, "Temp"), (6, "T3")]),
        row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "TI4"), (4, "Temp"), (6, "T4"), (7, "15")]),
    ]
}

#[test]
fn flat_title_row_and_follow_up_row_share_a_section() {
    let rows = vec![
        row(&[(0, "BIOGAS"), (1, "MS100"), (2, "Flow rate"), (3, "m3/h"), (4, "FLOW1")]),
        row(&[(1, "MS101"), (2, "Pressure"), (3, "bar"), (4, "PRES1")]),
    ];
    let doc = parse_with_layout("plant", &rows, SheetLayout::FLAT);
    let sections = sections_of(&doc);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "BIOGAS");
    let ids: Vec<_> = sections[0].tags.iter().map(|t| t.ri.as_str()).collect();
    assert_eq!(ids, ["MS100", "MS101"]);
}

#[test]
fn hierarchical_rows_without_names_join_the_same_section() {
    let rows = vec![
        row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "MS1"), (4, "desc"), (5, "unit"), (6, "var1"), (7, "5")]),
        row(&[(2, "Sensors"), (3, "MS2"), (4, "desc2"), (5, "unit2"), (6, "var2"), (7, "10")]),
    ];
    let doc = parse_with_layout("plant", &rows, SheetLayout::HIERARCHICAL);
    let clusters = clusters_of(&doc);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].name, "Cluster1");
    assert_eq!(clusters[0].installations.len(), 1);
    assert_eq!(clusters[0].installations[0].name, "Plant1");
    let sections = &clusters[0].installations[0].sections;
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "Sensors");
    let timelines: Vec<_> = sections[0].tags.iter().map(|t| t.timeline.as_str()).collect();
    assert_eq!(timelines, ["5", "10"]);
}

#[test]
fn hierarchical_repeated_labels_make_one_section_with_both_timelines() {
    let rows = vec![
        row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "MS1"), (4, "desc"), (5, "unit"), (6, "var1"), (7, "5")]),
        row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "MS2"), (4, "desc2"), (5, "unit2"), (6, "var2"), (7, "10")]),
    ];
    let doc = parse_with_layout("plant", &rows, SheetLayout::HIERARCHICAL);
    let clusters = clusters_of(&doc);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].installations.len(), 1);
    let sections = &clusters[0].installations[0].sections;
    assert_eq!(sections.len(), 1);
    let timelines: Vec<_> = sections[0].tags.iter().map(|t| t.timeline.as_str()).collect();
    assert_eq!(timelines, ["5", "10"]);
}

#[test]
fn blank_cluster_and_installation_use_defaults() {
    let rows = vec![row(&[(2, "Sensors"), (3, "MS9")])];
    let doc = parse_with_layout("plant", &rows, SheetLayout::HIERARCHICAL);
    let clusters = clusters_of(&doc);
    assert_eq!(clusters[0].name, "CLUSTER 1");
    assert_eq!(clusters[0].installations[0].name, "Default");
}

#[test]
fn header_only_sheet_is_flat_and_empty() {
    let raw = vec![vec![RawCell::inline("A1", "Title"), RawCell::inline("B1", "R&I")]];
    let rows = rows_from_raw_cells(raw, &SharedStrings::default());
    let doc = parse_rows("empty", &rows);
    assert_eq!(doc.format(), SheetFormat::Flat);
    assert!(sections_of(&doc).is_empty());
    assert_eq!(
        render_json(&doc).unwrap(),
        "{\n  \"name\": \"empty\",\n  \"sections\": []\n}"
    );
}

#[test]
fn detected_hierarchy_keeps_first_seen_order_and_unique_names() {
    let rows = plant_rows();
    assert_eq!(detect_layout(&rows), SheetLayout::HIERARCHICAL);

    let doc = parse_rows("plant", &rows);
    let clusters = clusters_of(&doc);
    let cluster_names: Vec<_> = clusters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(cluster_names, ["Cluster1", "Cluster2"]);

    let plant1 = &clusters[0].installations[0];
    let titles: Vec<_> = plant1.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Sensors", "Motors"]);
    let ids: Vec<_> = plant1.sections[0].tags.iter().map(|t| t.ri.as_str()).collect();
    assert_eq!(ids, ["TI1", "TI4"]);

    for cluster in clusters {
        let mut names: Vec<_> = cluster.installations.iter().map(|i| &i.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), cluster.installations.len());
        for installation in &cluster.installations {
            let mut titles: Vec<_> = installation.sections.iter().map(|s| &s.title).collect();
            titles.sort();
            titles.dedup();
            assert_eq!(titles.len(), installation.sections.len());
        }
    }
}

#[test]
fn every_tag_has_a_timeline() {
    let flat = vec![
        row(&[(0, "BIOGAS"), (1, "MS1"), (2, "a")]),
        row(&[(0, "BIOGAS"), (1, "MS2"), (2, "b"), (5, "7")]),
        row(&[(0, "GAS"), (1, "AG3"), (4, "v")]),
    ];
    for doc in [parse_rows("flat", &flat), parse_rows("plant", &plant_rows())] {
        assert!(doc.sections().flat_map(|s| s.tags.iter()).all(|t| !t.timeline.is_empty()));
    }
}

#[test]
fn ids_in_column_b_are_parsed_flat() {
    let rows = vec![
        row(&[(0, "BIOGAS"), (1, "MS1"), (2, "Flow")]),
        row(&[(0, "BIOGAS"), (1, "MS2"), (2, "Level")]),
        row(&[(0, "FACKEL"), (1, "TME3"), (2, "Temp")]),
    ];
    let doc = parse_rows("flat", &rows);
    let shape: Vec<_> = sections_of(&doc).iter().map(|s| (s.title.as_str(), s.tags.len())).collect();
    assert_eq!(shape, [("BIOGAS", 2), ("FACKEL", 1)]);
}

#[test]
fn empty_column_a_shifts_flat_columns() {
    let rows = vec![
        row(&[(2, "BIOGAS"), (3, "MS1"), (4, "Flow"), (5, "m3/h"), (6, "F1"), (7, "60")]),
        row(&[(3, "MS2"), (4, "Level"), (5, "%"), (6, "L1")]),
    ];
    let doc = parse_rows("shifted", &rows);
    let sections = sections_of(&doc);
    assert_eq!(sections[0].title, "BIOGAS");
    assert_eq!(sections[0].tags[0].timeline, "60");
    assert_eq!(sections[0].tags[1].unit, "%");
}

#[test]
fn parsing_twice_renders_identical_json() {
    let rows = plant_rows();
    let a = render_json(&parse_rows("plant", &rows)).unwrap();
    let b = render_json(&parse_rows("plant", &rows)).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("°C"), "non-ASCII must not be escaped");
}
