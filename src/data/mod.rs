// mod.rs - Data structures module

pub mod hit;
pub mod loaders;
pub mod locus;
pub mod taxonomy;

// Re-export main types for convenience
pub use hit::Hit;
pub use locus::{calc_overlap, AnnotationSource, Locus};
pub use taxonomy::{Taxonomy, TaxonomyTree};
