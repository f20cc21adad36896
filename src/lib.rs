#![deny(
    // missing_docs,
    clippy::missing_safety_doc,
    deprecated_in_future,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    rustdoc::invalid_codeblock_attributes
)]

//! Compressed prefix tree (PATRICIA-style radix trie) implementation
//!
//! Keys are byte strings; chains of single-child nodes are collapsed so
//! every internal node carries a (possibly multi-byte) prefix and either a
//! value or at least two outgoing edges. Beyond the usual map operations
//! the tree supports longest-prefix matching, prefix-scoped enumeration,
//! and prefix-scoped bulk removal.
//!
//! # References
//!
//!  - Morrison, D. R. (1968). PATRICIA—Practical Algorithm To Retrieve
//!    Information Coded In Alphanumeric. Journal of the ACM, 15(4),
//!    514–534.

mod bytes;
mod map;
mod raw;
pub mod visitor;

pub use bytes::*;
pub use map::*;

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
