pub mod filter;
pub mod sort;
pub mod stats;

pub use filter::{filter_by_dual_scoring, DualScoringFilters};
pub use sort::{sort_by_dual_scoring, sort_by_dual_scoring_with, CombinedWeights, SortKey};
pub use stats::{calculate_stats, DualScoringStats};
