pub mod layout;
mod naming;
mod options;
mod pdf;
mod types;

pub use naming::normalize_output_name;
pub use options::{ComposeOptions, PaperType};
pub use pdf::{compose, generate_pdf};
pub use types::*;
