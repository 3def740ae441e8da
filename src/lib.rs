// docmatch: compare documents by shared vocabulary and TF-IDF similarity.
//
// This is the library root. Each module corresponds to one stage of the
// comparison pipeline; `pipeline` holds the entry points callers drive.

pub mod config;
pub mod error;
pub mod extract;
pub mod highlight;
pub mod matching;
pub mod output;
pub mod pipeline;
pub mod rich;
pub mod text;

pub use error::{CompareError, Result};
pub use extract::{extract_text, Document, DocumentFormat};
pub use matching::compute_similarity;
pub use pipeline::{run_bulk, run_comparison, BulkRequest, ComparisonRequest};
