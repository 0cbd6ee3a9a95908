// Clade-leaves filter: both clades must be backed by enough reference leaves

use super::LgtFilter;
use crate::core::contig::Contig;
use crate::core::explanation::Explanation;
use crate::data::Taxonomy;

pub struct CladeLeavesFilter {
    minimum: usize,
}

impl CladeLeavesFilter {
    pub fn new(minimum: usize) -> Self {
        Self { minimum }
    }
}

impl LgtFilter for CladeLeavesFilter {
    fn name(&self) -> &'static str {
        "clade-leaves"
    }

    fn passes(&self, option: &Explanation, _contig: &Contig, taxonomy: &dyn Taxonomy) -> bool {
        let leaves1 = taxonomy.get_leaf_count(&option.clade1);
        let leaves2 = option
            .clade2
            .as_deref()
            .map_or(leaves1, |clade| taxonomy.get_leaf_count(clade));
        leaves1.min(leaves2) >= self.minimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::tests::{scored_contig, test_settings};
    use crate::data::taxonomy::tests::sample_tree;

    #[test]
    fn test_clade_leaves() {
        let settings = test_settings();
        let tree = sample_tree();
        let contig = scored_contig(2, &[("g__X", 0, 0.9), ("s__Y1", 1, 0.9)], &settings);
        let option = Explanation::two_clade(&contig, "g__X", "s__Y1", 0.9, 0.9, 0.8);
        // g__X has two leaves, s__Y1 is itself a leaf
        assert!(CladeLeavesFilter::new(1).passes(&option, &contig, &tree));
        assert!(!CladeLeavesFilter::new(2).passes(&option, &contig, &tree));
    }
}
