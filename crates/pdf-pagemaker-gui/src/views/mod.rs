pub mod form;

pub use form::{DocumentFormState, show_form};
