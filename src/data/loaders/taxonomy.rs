// taxonomy.rs - Taxonomy tree from a clade/parent table

use super::tsv_reader;
use crate::data::TaxonomyTree;
use std::path::Path;

/// Marker for "no parent" in the parent column
const NO_PARENT: &str = "-";

/// Load `clade<TAB>parent` rows into a tree rooted at `root`
pub fn read_taxonomy(path: &Path, root: &str) -> Result<TaxonomyTree, String> {
    let mut reader = tsv_reader(path, false)?;
    let mut edges = Vec::new();
    let mut saw_root = false;

    for (line_num, row) in reader.records().enumerate() {
        let row = row.map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let clade = row.get(0).map(str::trim).unwrap_or("");
        if clade.is_empty() {
            continue;
        }
        let parent = row.get(1).map(str::trim).unwrap_or(NO_PARENT);
        if clade == root {
            saw_root = true;
            continue;
        }
        if parent == NO_PARENT || parent.is_empty() {
            return Err(format!(
                "{} line {}: clade '{}' has no parent but is not the root '{}'",
                path.display(),
                line_num + 1,
                clade,
                root
            ));
        }
        edges.push((clade.to_string(), parent.to_string()));
    }

    if !saw_root && !edges.iter().any(|(_, parent)| parent == root) {
        return Err(format!("Root clade '{}' not found in {}", root, path.display()));
    }

    let tree = TaxonomyTree::from_edges(root, edges)
        .map_err(|e| format!("Invalid taxonomy {}: {}", path.display(), e))?;
    println!("✅ Taxonomy loaded: {} clades", tree.len());
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Taxonomy;
    use std::io::Write;

    #[test]
    fn test_read_taxonomy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "r__Root\t-").unwrap();
        writeln!(file, "k__Bac\tr__Root").unwrap();
        writeln!(file, "s__X1\tk__Bac").unwrap();
        let tree = read_taxonomy(file.path(), "r__Root").unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get_lineage("s__X1"), vec!["r__Root", "k__Bac", "s__X1"]);
    }

    #[test]
    fn test_orphan_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "r__Root").unwrap();
        writeln!(file, "k__Bac\t-").unwrap();
        assert!(read_taxonomy(file.path(), "r__Root").is_err());
    }
}
