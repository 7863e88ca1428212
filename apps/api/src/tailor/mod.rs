// Resume tailoring core: AI payload normalization and suggestion highlighting.
// Pure functions only; the HTTP layer lives in `handlers`.

pub mod completion;
pub mod handlers;
pub mod highlighter;
pub mod models;
pub mod normalizer;

pub use completion::parse_completion;
pub use highlighter::{highlight, Segment};
pub use models::{ConfidenceLevel, Suggestion, Summary, TailorResult};
pub use normalizer::{normalize, FormatError};
