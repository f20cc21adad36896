//! Utilities that traverse the tree structure itself rather than its
//! entries: structural validation and Graphviz export.

mod dot_printer;
mod well_formed;

pub use dot_printer::*;
pub use well_formed::*;
