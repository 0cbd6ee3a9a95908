// taxonomy.rs - Read-only clade tree queried by the scoring engine

use std::collections::{BTreeMap, BTreeSet};

/// Queries the evaluation engine makes against a reference taxonomy.
///
/// Implementations are never mutated during evaluation and are shared
/// across worker threads.
pub trait Taxonomy: Send + Sync {
    /// Name of the clade that terminates taxonomic climbing
    fn root(&self) -> &str;

    /// Parent of `clade`, or `None` at the root or for clades outside the tree
    fn get_parent(&self, clade: &str) -> Option<&str>;

    /// Ordered path root→clade
    fn get_lineage(&self, clade: &str) -> Vec<String>;

    /// Clades sharing the immediate parent of `clade`, excluding `clade` itself
    fn get_sisters(&self, clade: &str) -> BTreeSet<String>;

    /// Number of leaf descendants (a leaf counts itself)
    fn get_leaf_count(&self, clade: &str) -> usize;

    /// Lowest common ancestor of all `clades`
    fn get_lca(&self, clades: &[&str]) -> String {
        let mut lineages = clades.iter().map(|c| self.get_lineage(c));
        let mut shared = match lineages.next() {
            Some(first) => first,
            None => return self.root().to_string(),
        };
        for lineage in lineages {
            let common = shared
                .iter()
                .zip(lineage.iter())
                .take_while(|(a, b)| a == b)
                .count();
            shared.truncate(common);
        }
        shared
            .pop()
            .unwrap_or_else(|| self.root().to_string())
    }

    /// For each clade, the lineage segment strictly below `ancestor` down to the clade
    fn get_tails(&self, clades: &[&str], ancestor: &str) -> Vec<Vec<String>> {
        clades
            .iter()
            .map(|clade| {
                let lineage = self.get_lineage(clade);
                match lineage.iter().position(|c| c == ancestor) {
                    Some(pos) => lineage[pos + 1..].to_vec(),
                    None => lineage,
                }
            })
            .collect()
    }
}

/// Parent/child taxonomy loaded from a two-column table
#[derive(Debug, Clone)]
pub struct TaxonomyTree {
    root: String,
    parents: BTreeMap<String, String>,
    children: BTreeMap<String, BTreeSet<String>>,
    leaf_counts: BTreeMap<String, usize>,
}

impl TaxonomyTree {
    /// Build a tree from `(clade, parent)` edges.
    ///
    /// The root must appear as a node (with or without an edge). Edges that
    /// form a cycle or never reach the root are rejected.
    pub fn from_edges<I>(root: &str, edges: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut parents = BTreeMap::new();
        let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (clade, parent) in edges {
            if clade == root {
                continue;
            }
            if clade == parent {
                return Err(format!("Clade '{}' is listed as its own parent", clade));
            }
            if let Some(previous) = parents.get(&clade) {
                if previous != &parent {
                    return Err(format!(
                        "Clade '{}' has conflicting parents '{}' and '{}'",
                        clade, previous, parent
                    ));
                }
                continue;
            }
            children
                .entry(parent.clone())
                .or_default()
                .insert(clade.clone());
            parents.insert(clade, parent);
        }

        // every clade must climb to the root within |tree| steps
        let limit = parents.len() + 1;
        for clade in parents.keys() {
            let mut current = clade.as_str();
            let mut steps = 0;
            while current != root {
                current = parents.get(current).map(String::as_str).ok_or_else(|| {
                    format!("Clade '{}' does not descend from root '{}'", clade, root)
                })?;
                steps += 1;
                if steps > limit {
                    return Err(format!("Cycle detected in taxonomy at clade '{}'", clade));
                }
            }
        }

        let mut tree = Self {
            root: root.to_string(),
            parents,
            children,
            leaf_counts: BTreeMap::new(),
        };
        tree.leaf_counts = tree.count_leaves();
        Ok(tree)
    }

    fn count_leaves(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let leaves = self
            .parents
            .keys()
            .filter(|c| !self.children.contains_key(*c));
        for leaf in leaves {
            let mut current = Some(leaf.as_str());
            while let Some(clade) = current {
                *counts.entry(clade.to_string()).or_insert(0) += 1;
                current = self.parents.get(clade).map(String::as_str);
            }
        }
        counts
    }

    /// Number of clades including the root
    pub fn len(&self) -> usize {
        self.parents.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl Taxonomy for TaxonomyTree {
    fn root(&self) -> &str {
        &self.root
    }

    fn get_parent(&self, clade: &str) -> Option<&str> {
        self.parents.get(clade).map(String::as_str)
    }

    fn get_lineage(&self, clade: &str) -> Vec<String> {
        let mut lineage = vec![clade.to_string()];
        let mut current = clade;
        while let Some(parent) = self.get_parent(current) {
            lineage.push(parent.to_string());
            current = parent;
        }
        lineage.reverse();
        lineage
    }

    fn get_sisters(&self, clade: &str) -> BTreeSet<String> {
        self.get_parent(clade)
            .and_then(|parent| self.children.get(parent))
            .map(|siblings| siblings.iter().filter(|s| *s != clade).cloned().collect())
            .unwrap_or_default()
    }

    fn get_leaf_count(&self, clade: &str) -> usize {
        self.leaf_counts.get(clade).copied().unwrap_or(0)
    }
}
