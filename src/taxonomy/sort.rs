//! Alphabetic and numeric views of an aggregated taxonomy.

use crate::error::{Result, StratifyError};
use crate::models::{AggregatedTaxonomy, GroupOrder};

/// The two sorted copies of one aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedViews {
    /// Subgroups ascending by name
    pub alphabetic: AggregatedTaxonomy,
    /// Subgroups ascending by count, equal counts in name order
    pub numeric: AggregatedTaxonomy,
}

/// Build both views, groups ordered by ascending rank in `group_order`.
///
/// Every observed group must have a rank; groups sharing a rank are
/// ordered by name. The numeric view is a stable
/// count sort of the alphabetic view, so ties keep alphabetic order. Both
/// views are independent copies; `tax` is left untouched.
pub fn sort_views(tax: &AggregatedTaxonomy, group_order: &GroupOrder) -> Result<SortedViews> {
    let unranked: Vec<&str> = tax
        .group_names()
        .into_iter()
        .filter(|group| !group_order.contains_key(*group))
        .collect();
    if !unranked.is_empty() {
        return Err(StratifyError::configuration(format!(
            "no group rank declared for observed groups: {}",
            unranked.join(", ")
        )));
    }

    let mut alphabetic = tax.clone();
    let groups = alphabetic.groups_mut();
    groups.sort_by(|a, _, b, _| {
        group_order[a]
            .cmp(&group_order[b])
            .then_with(|| a.cmp(b))
    });
    for counts in groups.values_mut() {
        counts.sort_keys();
    }

    let mut numeric = alphabetic.clone();
    for counts in numeric.groups_mut().values_mut() {
        counts.sort_by(|_, a, _, b| a.cmp(b));
    }

    Ok(SortedViews {
        alphabetic,
        numeric,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubgroupCounts;
    use indexmap::IndexMap;

    fn counts(pairs: &[(&str, u64)]) -> SubgroupCounts {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn taxonomy(groups: Vec<(&str, SubgroupCounts)>) -> AggregatedTaxonomy {
        groups
            .into_iter()
            .map(|(g, c)| (g.to_string(), c))
            .collect::<IndexMap<_, _>>()
            .into()
    }

    fn order(groups: &[&str]) -> GroupOrder {
        groups
            .iter()
            .enumerate()
            .map(|(rank, g)| (g.to_string(), rank))
            .collect()
    }

    fn keys(tax: &AggregatedTaxonomy, group: &str) -> Vec<String> {
        tax.get(group).unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_numeric_ties_keep_alphabetic_order() {
        let tax = taxonomy(vec![("class", counts(&[("B", 3), ("C", 1), ("A", 3)]))]);

        let views = sort_views(&tax, &order(&["class"])).unwrap();

        assert_eq!(keys(&views.alphabetic, "class"), vec!["A", "B", "C"]);
        let numeric: Vec<(String, u64)> = views
            .numeric
            .get("class")
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        assert_eq!(
            numeric,
            vec![("C".to_string(), 1), ("A".to_string(), 3), ("B".to_string(), 3)]
        );
    }

    #[test]
    fn test_groups_follow_rank() {
        let tax = taxonomy(vec![
            ("class", counts(&[("Indoles", 1)])),
            ("kingdom", counts(&[("Organic", 2)])),
            ("super_class", counts(&[("Lipids", 1)])),
        ]);

        let views = sort_views(&tax, &order(&["kingdom", "super_class", "class"])).unwrap();

        assert_eq!(
            views.alphabetic.group_names(),
            vec!["kingdom", "super_class", "class"]
        );
        assert_eq!(
            views.numeric.group_names(),
            vec!["kingdom", "super_class", "class"]
        );
    }

    #[test]
    fn test_unranked_group_is_configuration_error() {
        let tax = taxonomy(vec![
            ("kingdom", counts(&[("Organic", 2)])),
            ("super_class", counts(&[("Lipids", 1)])),
            ("class", counts(&[("Indoles", 1)])),
        ]);

        match sort_views(&tax, &order(&["kingdom", "super_class"])) {
            Err(StratifyError::Configuration { message }) => assert!(message.contains("class")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_view_invariants() {
        let tax = taxonomy(vec![
            (
                "kingdom",
                counts(&[("Organic", 40), ("Inorganic", 2), ("Acetylides", 2)]),
            ),
            (
                "class",
                counts(&[("b", 5), ("a", 1), ("d", 5), ("c", 3), ("e", 1)]),
            ),
        ]);

        let views = sort_views(&tax, &order(&["kingdom", "class"])).unwrap();

        for (group, alpha) in views.alphabetic.groups() {
            let names: Vec<&String> = alpha.keys().collect();
            assert!(names.windows(2).all(|w| w[0] < w[1]), "group {}", group);

            let numeric = views.numeric.get(group).unwrap();
            let values: Vec<u64> = numeric.values().copied().collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]));

            for (a, b) in numeric.keys().zip(numeric.keys().skip(1)) {
                if numeric[a] == numeric[b] {
                    assert!(alpha.get_index_of(a) < alpha.get_index_of(b));
                }
            }
        }
    }

    #[test]
    fn test_views_are_independent_copies() {
        let tax = taxonomy(vec![("kingdom", counts(&[("Organic", 2), ("Inorganic", 1)]))]);
        let original = keys(&tax, "kingdom");

        let mut views = sort_views(&tax, &order(&["kingdom"])).unwrap();
        views.alphabetic.increment("kingdom", "Zeta");

        assert_eq!(keys(&tax, "kingdom"), original);
        assert_eq!(keys(&views.numeric, "kingdom"), vec!["Inorganic", "Organic"]);
        assert!(views.numeric.get("kingdom").unwrap().get("Zeta").is_none());
    }

    #[test]
    fn test_shared_rank_ordered_by_name_regardless_of_arrival() {
        let shared: GroupOrder = [("kingdom".to_string(), 0), ("class".to_string(), 0)]
            .into_iter()
            .collect();
        let kingdom_first = taxonomy(vec![
            ("kingdom", counts(&[("Organic compounds", 1)])),
            ("class", counts(&[("Indoles", 1)])),
        ]);
        let class_first = taxonomy(vec![
            ("class", counts(&[("Indoles", 1)])),
            ("kingdom", counts(&[("Organic compounds", 1)])),
        ]);

        let a = sort_views(&kingdom_first, &shared).unwrap();
        let b = sort_views(&class_first, &shared).unwrap();

        assert_eq!(a.alphabetic.group_names(), vec!["class", "kingdom"]);
        assert_eq!(b.alphabetic.group_names(), vec!["class", "kingdom"]);
        assert_eq!(a.numeric.group_names(), b.numeric.group_names());
    }
}
