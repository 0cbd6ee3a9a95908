// mod.rs - Core logic module

pub mod contig;
pub mod evaluate;
pub mod explanation;
pub mod filters;
pub mod pipeline;
pub mod scores;
pub mod search;
pub mod settings;

// Re-export main types for convenience
pub use contig::Contig;
pub use evaluate::{evaluate_all, Call, ContigResult, Evaluator};
pub use explanation::{Direction, Explanation};
pub use filters::{FilterChain, LgtFilter};
pub use pipeline::{assemble_contigs, Assembly, ContigInput};
pub use scores::{GeneScores, SiteScores};
pub use search::ExplanationSearch;
pub use settings::{DisambiguateOne, DisambiguateTwo, Settings, TransferMode, WeakLoci};
