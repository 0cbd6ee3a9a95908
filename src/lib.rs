// lib.rs - lgtcall library root

//! # lgtcall - Lateral gene transfer detection in annotated contigs
//!
//! Each contig is explained either by a single clade of a taxonomy or, when
//! no single clade covers all of its genes, by a pair of clades. A contig
//! confidently explained by a pair is reported as a putative lateral gene
//! transfer (LGT).
//!
//! ## Features
//!
//! - **Taxonomic climbing**: unresolved contigs are re-scored one rank up
//! - **Melding**: near-tied explanations are merged into their common ancestor
//! - **Pluggable LGT filters**: ambiguity, gene counts, leaf counts, sister clades
//! - **Parallel evaluation**: contigs are independent and evaluated with rayon
//! - **Deterministic output**: three sorted TSV streams per run
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use lgtcall::prelude::*;
//! use lgtcall::output::{write_results, OutputPaths};
//! use std::path::Path;
//!
//! let settings = Settings::default();
//! let taxonomy = read_taxonomy(Path::new("taxonomy.tsv"), &settings.root_clade)?;
//! let lengths = read_contig_lengths(Path::new("contigs.fna"))?;
//! let loci = read_contig_loci(Path::new("contigs.gff"), false)?;
//! let hits = read_contig_hits(Path::new("sample.hits.tsv"))?;
//!
//! let assembly = assemble_contigs(&lengths, loci, hits, &settings);
//! let evaluator = Evaluator::new(&settings, &taxonomy);
//! let results = evaluate_all(assembly.inputs, &evaluator, true);
//! write_results(&results, &taxonomy, &OutputPaths::new(Path::new("out"), "sample"))?;
//! # Ok::<(), String>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{assemble_contigs, evaluate_all, Call, ContigResult, Evaluator};
    pub use crate::core::{Contig, Explanation, FilterChain, Settings};
    pub use crate::data::loaders::{read_contig_hits, read_contig_lengths, read_contig_loci, read_taxonomy};
    pub use crate::data::{Hit, Locus, Taxonomy, TaxonomyTree};
    pub use crate::output::write_results;
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{Call, Contig, Evaluator, Explanation, Settings};
pub use data::{Hit, Locus, Taxonomy, TaxonomyTree};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!("lgtcall v{} - Lateral gene transfer detection for annotated contigs", VERSION)
}
