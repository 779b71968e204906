//! Resume Model - Canonical resume data and its validation rules
//!
//! A [`ResumeData`] is an immutable snapshot built by the form layer and passed
//! by reference into each renderer. Renderers only read it.

mod error;
mod resume;
mod validation;

pub use error::*;
pub use resume::*;
pub use validation::*;
