use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Orders attribute names so every dependency comes before its dependents.
///
/// `dependencies` maps each attribute to the name it references (if any);
/// `aliases` maps abbreviations to full names so `"0.5w"` and `"0.5width"`
/// resolve to the same vertex. Names appearing only as dependencies are
/// allowed and ignored in the output.
///
/// Fails with [`Error::AttributeCycle`] listing the dependency pairs when
/// the graph is not a DAG.
pub fn topological_sort_with_aliases(
    dependencies: &BTreeMap<String, Option<String>>,
    aliases: &BTreeMap<String, String>,
) -> Result<Vec<String>> {
    let resolve = |name: &str| -> String {
        aliases.get(name).cloned().unwrap_or_else(|| name.to_owned())
    };

    // Vertices: all keys plus any external dependency names.
    let mut edges: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut in_degree: BTreeMap<String, usize> = BTreeMap::new();
    for (name, dep) in dependencies {
        in_degree.entry(name.clone()).or_insert(0);
        if let Some(dep) = dep {
            let dep = resolve(dep);
            in_degree.entry(dep.clone()).or_insert(0);
            edges.entry(dep).or_default().push(name.clone());
            *in_degree.entry(name.clone()).or_insert(0) += 1;
        }
    }

    // Kahn's algorithm over the BTreeMap keeps the order deterministic.
    let mut ready: Vec<String> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(name, _)| name.clone())
        .collect();
    let mut ordered = Vec::with_capacity(in_degree.len());
    while let Some(name) = ready.pop() {
        ordered.push(name.clone());
        for next in edges.get(&name).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(next.clone());
                }
            }
        }
    }

    if ordered.len() != in_degree.len() {
        let mut pairs = String::new();
        for (name, dep) in dependencies {
            pairs.push_str("{ ");
            pairs.push_str(name);
            if let Some(dep) = dep {
                pairs.push_str(" -> ");
                pairs.push_str(dep);
            }
            pairs.push_str(" } ");
        }
        return Err(Error::AttributeCycle(pairs.trim_end().to_owned()));
    }

    // Keep only the requested attributes, in dependency order.
    Ok(ordered
        .into_iter()
        .filter(|name| dependencies.contains_key(name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(pairs: &[(&str, Option<&str>)]) -> BTreeMap<String, Option<String>> {
        pairs
            .iter()
            .map(|(name, dep)| (name.to_string(), dep.map(str::to_string)))
            .collect()
    }

    fn aliases(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    #[test]
    fn dependency_comes_first() {
        let order = topological_sort_with_aliases(
            &deps(&[("width", Some("height")), ("height", None), ("depth", None)]),
            &BTreeMap::new(),
        )
        .unwrap();
        let width_at = order.iter().position(|n| n == "width").unwrap();
        let height_at = order.iter().position(|n| n == "height").unwrap();
        assert!(height_at < width_at);
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn alias_resolves_to_full_name() {
        let order = topological_sort_with_aliases(
            &deps(&[("width", Some("h")), ("height", None)]),
            &aliases(&[("w", "width"), ("h", "height")]),
        )
        .unwrap();
        assert_eq!(order.last().map(String::as_str), Some("width"));
    }

    #[test]
    fn external_dependency_is_dropped_from_output() {
        let order = topological_sort_with_aliases(
            &deps(&[("width", Some("spacing"))]),
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(order, vec!["width".to_string()]);
    }

    #[test]
    fn cycle_is_reported_with_pairs() {
        let result = topological_sort_with_aliases(
            &deps(&[("width", Some("height")), ("height", Some("width"))]),
            &BTreeMap::new(),
        );
        match result {
            Err(Error::AttributeCycle(message)) => {
                assert!(message.contains("width -> height"));
                assert!(message.contains("height -> width"));
            }
            other => panic!("expected a cycle error, got {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        assert!(topological_sort_with_aliases(
            &deps(&[("width", Some("width"))]),
            &BTreeMap::new(),
        )
        .is_err());
    }
}
