//! Statistical analysis of the loaded snapshots.
//!
//! Submodules: numeric helpers, the column-wise summarizer, and the
//! grouped-mean aggregator behind the comparison charts.

pub mod aggregator;
pub mod stats;
pub mod summarizer;

pub use aggregator::{
    age_bin_index, category_counts, value_by_age_range, value_by_proximity, value_distribution,
};
pub use summarizer::summarize;
