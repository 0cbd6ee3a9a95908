// Clade-genes filter: each side of a transfer needs its own genes

use super::LgtFilter;
use crate::core::contig::Contig;
use crate::core::explanation::{Explanation, SYN_A, SYN_B};
use crate::data::Taxonomy;

pub struct CladeGenesFilter {
    minimum: usize,
}

impl CladeGenesFilter {
    pub fn new(minimum: usize) -> Self {
        Self { minimum }
    }
}

impl LgtFilter for CladeGenesFilter {
    fn name(&self) -> &'static str {
        "clade-genes"
    }

    fn passes(&self, option: &Explanation, _contig: &Contig, _taxonomy: &dyn Taxonomy) -> bool {
        option.count_label(SYN_A).min(option.count_label(SYN_B)) >= self.minimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::tests::{scored_contig, test_settings};
    use crate::data::taxonomy::tests::sample_tree;

    #[test]
    fn test_clade_genes() {
        let settings = test_settings();
        let tree = sample_tree();
        let contig = scored_contig(3, &[("x", 0, 0.9), ("y", 1, 0.9), ("x", 2, 0.9)], &settings);
        let option = Explanation::two_clade(&contig, "x", "y", 0.9, 0.9, 0.8);
        assert_eq!(option.synteny, "ABA");
        assert!(CladeGenesFilter::new(1).passes(&option, &contig, &tree));
        assert!(!CladeGenesFilter::new(2).passes(&option, &contig, &tree));
    }
}
