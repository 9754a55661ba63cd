pub mod add_note;
pub mod copy;
pub mod diff;
pub mod document;
pub mod error;
pub mod markdown_file;
pub mod util;

pub use add_note::{add_note, ConceptOutcome, Outcome, Request};
pub use error::{Error, Result};
