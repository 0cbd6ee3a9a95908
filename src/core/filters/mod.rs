// Post-detection filters for two-clade (LGT) explanations

use crate::core::contig::Contig;
use crate::core::explanation::Explanation;
use crate::core::settings::Settings;
use crate::data::Taxonomy;

pub mod ambiguous_fraction;
pub mod clade_genes;
pub mod clade_leaves;
pub mod sister_penalty;

pub use ambiguous_fraction::AmbiguousFractionFilter;
pub use clade_genes::CladeGenesFilter;
pub use clade_leaves::CladeLeavesFilter;
pub use sister_penalty::SisterPenaltyFilter;

/// A check a two-clade explanation must pass to be reported
pub trait LgtFilter: Send + Sync {
    /// Short name used in logs and run summaries
    fn name(&self) -> &'static str;

    /// True when `option` passes this filter
    fn passes(&self, option: &Explanation, contig: &Contig, taxonomy: &dyn Taxonomy) -> bool;
}

/// Ordered set of enabled filters
pub struct FilterChain {
    filters: Vec<Box<dyn LgtFilter>>,
}

impl FilterChain {
    pub fn new(filters: Vec<Box<dyn LgtFilter>>) -> Self {
        Self { filters }
    }

    /// Enable each filter whose setting is present
    pub fn from_settings(settings: &Settings) -> Self {
        let mut filters: Vec<Box<dyn LgtFilter>> = Vec::new();
        if let Some(ceiling) = settings.ambiguous_fraction {
            filters.push(Box::new(AmbiguousFractionFilter::new(ceiling)));
        }
        if let Some(minimum) = settings.clade_genes {
            filters.push(Box::new(CladeGenesFilter::new(minimum)));
        }
        if let Some(minimum) = settings.clade_leaves {
            filters.push(Box::new(CladeLeavesFilter::new(minimum)));
        }
        if let Some(ceiling) = settings.sister_penalty {
            filters.push(Box::new(SisterPenaltyFilter::new(ceiling, settings.min_threshold())));
        }
        Self { filters }
    }

    /// Run every filter; any failure clears `option.ok`. Never sets it back.
    pub fn apply(&self, option: &mut Explanation, contig: &Contig, taxonomy: &dyn Taxonomy) {
        for filter in &self.filters {
            if !filter.passes(option, contig, taxonomy) {
                option.ok = false;
            }
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contig::tests::{scored_contig, test_settings};
    use crate::data::taxonomy::tests::sample_tree;

    struct Reject;

    impl LgtFilter for Reject {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn passes(&self, _: &Explanation, _: &Contig, _: &dyn Taxonomy) -> bool {
            false
        }
    }

    struct Accept;

    impl LgtFilter for Accept {
        fn name(&self) -> &'static str {
            "accept"
        }

        fn passes(&self, _: &Explanation, _: &Contig, _: &dyn Taxonomy) -> bool {
            true
        }
    }

    #[test]
    fn test_from_settings_enables_configured_filters() {
        let settings = Settings::default();
        assert_eq!(FilterChain::from_settings(&settings).names(), vec!["ambiguous-fraction"]);

        let all = Settings {
            clade_genes: Some(1),
            clade_leaves: Some(1),
            sister_penalty: Some(0.5),
            ..Settings::default()
        };
        assert_eq!(
            FilterChain::from_settings(&all).names(),
            vec!["ambiguous-fraction", "clade-genes", "clade-leaves", "sister-penalty"]
        );

        let none = Settings {
            ambiguous_fraction: None,
            ..Settings::default()
        };
        assert!(FilterChain::from_settings(&none).is_empty());
    }

    #[test]
    fn test_failures_are_sticky() {
        let settings = test_settings();
        let tree = sample_tree();
        let contig = scored_contig(2, &[("s__X1", 0, 0.9), ("s__Y1", 1, 0.9)], &settings);
        let mut option = Explanation::two_clade(&contig, "s__X1", "s__Y1", 0.9, 0.9, 0.8);

        let chain = FilterChain::new(vec![Box::new(Reject), Box::new(Accept)]);
        chain.apply(&mut option, &contig, &tree);
        assert!(!option.ok);

        FilterChain::new(vec![Box::new(Accept)]).apply(&mut option, &contig, &tree);
        assert!(!option.ok);
    }
}
