// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.contigs.is_none() {
            self.contigs = config.contigs;
        }
        if self.gff.is_none() {
            self.gff = config.gff;
        }
        if self.hits.is_none() {
            self.hits = config.hits;
        }
        if self.taxonomy.is_none() {
            self.taxonomy = config.taxonomy;
        }
        if self.outdir.is_none() {
            self.outdir = config.outdir;
        }
        if self.basename.is_none() {
            self.basename = config.basename;
        }
        if self.summary.is_none() {
            self.summary = config.summary;
        }

        // Thresholds
        if self.k1.is_none() {
            self.k1 = config.k1;
        }
        if self.k2.is_none() {
            self.k2 = config.k2;
        }
        if self.range.is_none() {
            self.range = config.range;
        }
        if self.jump_taxonomy.is_none() {
            self.jump_taxonomy = config.jump_taxonomy;
        }

        // Policies (only override defaults, not explicit CLI values)
        if let Some(policy) = config.disambiguate_one {
            if self.disambiguate_one == "meld" {
                self.disambiguate_one = policy;
            }
        }
        if let Some(policy) = config.disambiguate_two {
            if self.disambiguate_two == "meld" {
                self.disambiguate_two = policy;
            }
        }
        if let Some(policy) = config.weak_loci {
            if self.weak_loci == "ignore" {
                self.weak_loci = policy;
            }
        }
        if let Some(mode) = config.transfer_annotations {
            if self.transfer_annotations == "strict" {
                self.transfer_annotations = mode;
            }
        }

        // LGT filters
        if self.ambiguous_fraction.is_none() {
            self.ambiguous_fraction = config.ambiguous_fraction;
        }
        if self.clade_genes.is_none() {
            self.clade_genes = config.clade_genes;
        }
        if self.clade_leaves.is_none() {
            self.clade_leaves = config.clade_leaves;
        }
        if self.sister_penalty.is_none() {
            self.sister_penalty = config.sister_penalty;
        }

        // Genes and hits
        if self.min_overlap.is_none() {
            self.min_overlap = config.min_overlap;
        }
        if self.min_gene_length.is_none() {
            self.min_gene_length = config.min_gene_length;
        }
        if self.min_scov.is_none() {
            self.min_scov = config.min_scov;
        }

        // Taxonomy
        if self.root_clade.is_none() {
            self.root_clade = config.root_clade;
        }
        if self.unknown_clade.is_none() {
            self.unknown_clade = config.unknown_clade;
        }
        if self.max_climbs.is_none() {
            self.max_climbs = config.max_climbs;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.allow_lca && config.allow_lca.unwrap_or(false) {
            self.allow_lca = true;
        }
        if !self.stranded && config.stranded.unwrap_or(false) {
            self.stranded = true;
        }
        if !self.gff_annotations && config.gff_annotations.unwrap_or(false) {
            self.gff_annotations = true;
        }
        if !self.no_progress && config.no_progress.unwrap_or(false) {
            self.no_progress = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
