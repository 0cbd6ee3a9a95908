// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    // Input/Output
    pub contigs: Option<String>,
    pub gff: Option<String>,
    pub hits: Option<String>,
    pub taxonomy: Option<String>,
    pub outdir: Option<String>,
    pub basename: Option<String>,
    pub summary: Option<String>,

    // Explanation thresholds
    pub k1: Option<f64>,
    pub k2: Option<f64>,
    pub disambiguate_one: Option<String>,
    pub disambiguate_two: Option<String>,
    pub range: Option<f64>,
    pub jump_taxonomy: Option<usize>,
    pub allow_lca: Option<bool>,

    // LGT filters
    pub ambiguous_fraction: Option<f64>,
    pub clade_genes: Option<usize>,
    pub clade_leaves: Option<usize>,
    pub sister_penalty: Option<f64>,

    // Genes and hits
    pub weak_loci: Option<String>,
    pub transfer_annotations: Option<String>,
    pub min_overlap: Option<f64>,
    pub min_gene_length: Option<usize>,
    pub min_scov: Option<f64>,
    pub stranded: Option<bool>,
    pub gff_annotations: Option<bool>,

    // Taxonomy
    pub root_clade: Option<String>,
    pub unknown_clade: Option<String>,
    pub max_climbs: Option<usize>,

    // Performance
    pub threads: Option<usize>,
    pub no_progress: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# lgtcall.toml - Configuration file for lgtcall
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Contig sequences (FASTA)
contigs = "/path/to/contigs.fna"

# Gene calls on the contigs (GFF)
gff = "/path/to/contigs.gff"

# Taxonomically annotated hits (TSV)
hits = "/path/to/sample.hits.tsv"

# Taxonomy table: clade<TAB>parent
taxonomy = "/path/to/taxonomy.tsv"

# Output directory and basename (default basename: hits file name up to the first '.')
outdir = "results"
# basename = "sample"

# JSON run summary
# summary = "results/sample.summary.json"

# =============================================================================
# EXPLANATION THRESHOLDS
# =============================================================================

# Minimum per-gene score for a one-clade explanation
k1 = 0.5

# Minimum per-gene score for a two-clade explanation
k2 = 0.8

# Near-tied one-clade explanations: report-best, meld
disambiguate_one = "meld"

# Near-tied two-clade explanations: report-best, jump, meld
disambiguate_two = "meld"

# Rank window for considering explanations tied
range = 0.05

# Climb the taxonomy this many ranks before the first attempt
# jump_taxonomy = 1

# Keep melded LGT calls whose clades are ancestor and descendant
allow_lca = false

# =============================================================================
# LGT FILTERS
# =============================================================================

# Maximum fraction of A/B/ambiguous gene length that is ambiguous
ambiguous_fraction = 0.1

# Minimum genes explained by each clade
# clade_genes = 1

# Minimum descendant leaves of each clade
# clade_leaves = 2

# Maximum sister-clade penalty
# sister_penalty = 0.5

# =============================================================================
# GENES AND HITS
# =============================================================================

# Genes no clade explains: ignore, penalize, assign-unknown
weak_loci = "ignore"

# Annotation transfer from hits to genes: lenient, strict, very-strict
transfer_annotations = "strict"

# Minimum hit/gene overlap as a fraction of the shorter one
min_overlap = 0.1

# Ignore genes shorter than this many bases
min_gene_length = 200

# Ignore hits with lower modified subject coverage
min_scov = 0.0

# Only count hits on the same strand as the gene
stranded = false

# Keep GFF attributes as gene annotations
gff_annotations = false

# =============================================================================
# TAXONOMY
# =============================================================================

root_clade = "r__Root"
unknown_clade = "Unknown"

# Maximum taxonomic climbs per contig
max_climbs = 100

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# Hide the progress bar
no_progress = false

# Validate inputs without evaluating contigs (dry run)
dry_run = false
"#
        .to_string()
    }
}
