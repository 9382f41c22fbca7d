//! Read-only reports for the admin dashboard and patient billing views.

mod statement;
mod summary;

pub use statement::*;
pub use summary::*;
