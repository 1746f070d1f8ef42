//! Hierarchical (new) layout: cluster / installation / title / R&I / description / unit /
//! variable / timeline in columns A–H.
//!
//! Names are unique per parent: a repeated cluster, installation or section title extends the
//! entry created by its first occurrence, and every level keeps first-seen order.
//!
//! Sheets usually write the cluster and installation only on the first row of a block. A blank
//! cluster cell continues the current cluster; a blank installation cell continues the current
//! installation as long as the cluster did not change. Without a current value the defaults
//! [`DEFAULT_CLUSTER`] and [`DEFAULT_INSTALLATION`] apply.

use indexmap::IndexMap;

use crate::types::{Cluster, Installation, Row, Section, Tag};

/// Cluster used when the cluster cell is blank.
pub const DEFAULT_CLUSTER: &str = "CLUSTER 1";
/// Installation used when the installation cell is blank.
pub const DEFAULT_INSTALLATION: &str = "Default";

mod col {
    pub const CLUSTER: usize = 0;
    pub const INSTALLATION: usize = 1;
    pub const TITLE: usize = 2;
    /// First tag field; tag fields follow the flat layout's order from here.
    pub const TAG_FIELDS: usize = 2;
}

type SectionMap = IndexMap<String, Vec<Tag>>;
type InstallationMap = IndexMap<String, SectionMap>;

/// Insertion-ordered cluster → installation → section → tags accumulator.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    clusters: IndexMap<String, InstallationMap>,
    /// Cluster and installation of the last accepted row.
    current: Option<(String, String)>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one row. Returns `false` when the row was skipped.
    pub fn push_row(&mut self, row: &Row) -> bool {
        let installation = row.get(col::INSTALLATION);
        let title = row.get(col::TITLE);
        let tag = super::flat::tag_at(row, col::TAG_FIELDS);
        if installation.is_empty() && title.is_empty() && tag.is_none() {
            return false;
        }

        let (cluster, installation) = self.resolve_names(row.get(col::CLUSTER), installation);

        let sections = self
            .clusters
            .entry(cluster.clone())
            .or_default()
            .entry(installation.clone())
            .or_default();
        self.current = Some((cluster, installation));

        if !title.is_empty() {
            let tags = sections.entry(title.to_string()).or_default();
            if let Some(tag) = tag {
                tags.push(tag);
            }
        }
        true
    }

    fn resolve_names(&self, cluster: &str, installation: &str) -> (String, String) {
        let (current_cluster, current_installation) = match &self.current {
            Some((c, i)) => (c.as_str(), Some(i.as_str())),
            None => (DEFAULT_CLUSTER, None),
        };
        let cluster = non_blank_or(cluster, current_cluster);
        let inherited = current_installation
            .filter(|_| cluster == current_cluster)
            .unwrap_or(DEFAULT_INSTALLATION);
        let installation = non_blank_or(installation, inherited);
        (cluster.to_string(), installation.to_string())
    }

    /// Flatten into ordered clusters.
    pub fn finish(self) -> Vec<Cluster> {
        self.clusters
            .into_iter()
            .map(|(name, installations)| Cluster {
                name,
                installations: installations
                    .into_iter()
                    .map(|(name, sections)| Installation {
                        name,
                        sections: sections
                            .into_iter()
                            .map(|(title, tags)| Section { title, tags })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}

fn non_blank_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

/// Parse rows of the hierarchical layout into clusters.
pub fn parse_clusters(rows: &[Row]) -> Vec<Cluster> {
    let mut builder = HierarchyBuilder::new();
    for row in rows.iter().filter(|r| !r.is_blank()) {
        builder.push_row(row);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(usize, &str)]) -> Row {
        Row::from_cells(cells.iter().copied())
    }

    #[test]
    fn repeated_names_merge_in_first_seen_order() {
        let rows = vec![
            row(&[
                (0, "Cluster1"),
                (1, "Plant1"),
                (2, "Sensors"),
                (3, "MS1"),
                (4, "desc"),
                (5, "unit"),
                (6, "var1"),
                (7, "5"),
            ]),
            row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "MS2"), (7, "10")]),
            row(&[(0, "Cluster1"), (1, "Plant2"), (2, "Motors"), (3, "MS3")]),
            row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "MS4")]),
        ];
        let clusters = parse_clusters(&rows);
        assert_eq!(clusters.len(), 1);
        let names: Vec<_> = clusters[0].installations.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Plant1", "Plant2"]);
        let sensors = &clusters[0].installations[0].sections;
        assert_eq!(sensors.len(), 1);
        let timelines: Vec<_> = sensors[0].tags.iter().map(|t| t.timeline.as_str()).collect();
        assert_eq!(timelines, ["5", "10", "0"]);
    }

    #[test]
    fn blank_names_fall_back_to_defaults() {
        let rows = vec![row(&[(2, "Sensors"), (3, "MS1")])];
        let clusters = parse_clusters(&rows);
        assert_eq!(clusters[0].name, DEFAULT_CLUSTER);
        assert_eq!(clusters[0].installations[0].name, DEFAULT_INSTALLATION);
        assert_eq!(clusters[0].installations[0].sections[0].tags[0].ri, "MS1");
    }

    #[test]
    fn blank_labels_continue_the_current_block() {
        let rows = vec![
            row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "MS1")]),
            row(&[(2, "Sensors"), (3, "MS2")]),
            row(&[(1, "Plant2"), (2, "Motors"), (3, "MS3")]),
            row(&[(2, "Motors"), (3, "MS4")]),
            row(&[(0, "Cluster2"), (2, "Sensors"), (3, "MS5")]),
        ];
        let clusters = parse_clusters(&rows);
        assert_eq!(clusters.len(), 2);
        let c1 = &clusters[0];
        assert_eq!(c1.name, "Cluster1");
        assert_eq!(c1.installations[0].sections[0].tags.len(), 2);
        assert_eq!(c1.installations[1].name, "Plant2");
        assert_eq!(c1.installations[1].sections[0].tags.len(), 2);
        // A new cluster does not inherit the previous cluster's installation.
        assert_eq!(clusters[1].name, "Cluster2");
        assert_eq!(clusters[1].installations[0].name, DEFAULT_INSTALLATION);
    }

    #[test]
    fn skipped_rows_do_not_change_the_current_block() {
        let rows = vec![
            row(&[(0, "Cluster1"), (1, "Plant1"), (2, "Sensors"), (3, "MS1")]),
            row(&[(0, "Cluster9")]),
            row(&[(2, "Sensors"), (3, "MS2")]),
        ];
        let clusters = parse_clusters(&rows);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].installations[0].sections[0].tags.len(), 2);
    }

    #[test]
    fn cluster_name_alone_is_skipped() {
        let mut builder = HierarchyBuilder::new();
        assert!(!builder.push_row(&row(&[(0, "Cluster1"), (5, "bar")])));
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn installation_without_title_is_kept_empty() {
        let clusters = parse_clusters(&[row(&[(0, "C"), (1, "Plant1")])]);
        assert_eq!(clusters[0].installations[0].name, "Plant1");
        assert!(clusters[0].installations[0].sections.is_empty());
    }

    #[test]
    fn tag_without_title_is_dropped() {
        let clusters = parse_clusters(&[row(&[(0, "C"), (1, "P"), (3, "MS1"), (4, "orphan")])]);
        assert!(clusters[0].installations[0].sections.is_empty());
    }

    #[test]
    fn title_without_tag_data_makes_empty_section() {
        let clusters = parse_clusters(&[row(&[(0, "C"), (1, "P"), (2, "Empty"), (5, "bar")])]);
        let sections = &clusters[0].installations[0].sections;
        assert_eq!(sections.len(), 1);
        assert!(sections[0].tags.is_empty());
    }

    #[test]
    fn names_are_scoped_to_their_parent() {
        let rows = vec![
            row(&[(0, "C1"), (1, "Plant"), (2, "Sensors"), (3, "MS1")]),
            row(&[(0, "C2"), (1, "Plant"), (2, "Sensors"), (3, "MS2")]),
        ];
        let clusters = parse_clusters(&rows);
        assert_eq!(clusters.len(), 2);
        for c in &clusters {
            assert_eq!(c.installations.len(), 1);
            assert_eq!(c.installations[0].sections[0].tags.len(), 1);
        }
    }
}
