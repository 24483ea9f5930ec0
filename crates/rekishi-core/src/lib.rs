//! rekishi-core: the history quiz engine.
//!
//! Parses comma-separated history datasets, filters them by era, draws
//! questions, builds distractor option sets and grades answers. Everything
//! here is synchronous; loading the raw text is left to `rekishi-loader`.

pub mod answers;
pub mod error;
pub mod filter;
pub mod grader;
pub mod model;
pub mod options;
pub mod parser;
pub mod random;
pub mod session;

pub use error::{ParseError, QuizError};
pub use model::{AnswerField, Dataset, EraSelection, OptionSet, Record};
pub use session::{ActiveQuestion, QuizSession, SessionConfig};
