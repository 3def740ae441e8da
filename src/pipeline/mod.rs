// Comparison workflows — the entry points a caller drives.
//
// `compare` runs the two-file highlight workflow (all-or-nothing).
// `bulk` runs folder-wide similarity scoring, where one file failing never
// stops the rest.

pub mod bulk;
pub mod compare;

pub use bulk::{
    compare_all_pairs, compare_with_source, run_bulk, BulkFailure, BulkOutcome, BulkRequest,
};
pub use compare::{run_comparison, ComparisonOutcome, ComparisonRequest};
