use crate::{raw::Node, AsBytes, RadixMap};
use std::{error::Error, fmt};

/// A portion of an entire key that identifies a node position in the tree:
/// the concatenation of node prefixes along the path from the root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct KeyPrefix(Box<[u8]>);

impl From<&[u8]> for KeyPrefix {
    fn from(src: &[u8]) -> Self {
        KeyPrefix(Box::from(src))
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

/// An issue with the well-formed-ness of the tree. See the documentation on
/// [`WellFormedChecker`] for more context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedTreeError {
    /// The root node carried a non-empty prefix.
    RootWithPrefix {
        /// The prefix found on the root
        prefix: KeyPrefix,
    },
    /// A leaf's stored key did not equal the concatenated prefixes of the
    /// path leading to it.
    LeafKeyMismatch {
        /// The key implied by the node's position
        position: KeyPrefix,
        /// The key actually stored in the leaf
        stored: KeyPrefix,
    },
    /// A non-root node had no leaf and fewer than 2 edges, violating
    /// prefix compression.
    UncompressedNode {
        /// The key prefix identifying the node
        position: KeyPrefix,
        /// The number of edges found at the node
        num_edges: usize,
    },
    /// A child node's prefix was empty or did not start with its edge
    /// label.
    EdgeLabelMismatch {
        /// The key prefix identifying the parent node
        position: KeyPrefix,
        /// The label on the edge
        label: u8,
    },
    /// A node's edge labels were not in strictly ascending order.
    UnsortedEdges {
        /// The key prefix identifying the node
        position: KeyPrefix,
        /// The label that broke the order
        label: u8,
    },
    /// The number of leaves in the tree did not match the recorded entry
    /// count.
    SizeMismatch {
        /// The entry count recorded by the map
        recorded: usize,
        /// The number of leaves actually found
        counted: usize,
    },
}

impl fmt::Display for MalformedTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedTreeError::RootWithPrefix { prefix } => {
                write!(f, "root node carries prefix {prefix}")
            },
            MalformedTreeError::LeafKeyMismatch { position, stored } => {
                write!(
                    f,
                    "leaf at position {position} stores mismatched key {stored}"
                )
            },
            MalformedTreeError::UncompressedNode {
                position,
                num_edges,
            } => {
                write!(
                    f,
                    "node at position {position} has no leaf and {num_edges} edge(s), violating \
                     prefix compression"
                )
            },
            MalformedTreeError::EdgeLabelMismatch { position, label } => {
                write!(
                    f,
                    "edge [{label:#04x}] at position {position} does not match the first byte of \
                     its child's prefix"
                )
            },
            MalformedTreeError::UnsortedEdges { position, label } => {
                write!(
                    f,
                    "edge [{label:#04x}] at position {position} is out of order"
                )
            },
            MalformedTreeError::SizeMismatch { recorded, counted } => {
                write!(
                    f,
                    "map records {recorded} entries but the tree holds {counted} leaves"
                )
            },
        }
    }
}

impl Error for MalformedTreeError {}

/// A checker that traverses the whole tree and verifies its structural
/// invariants:
///
///  1. the concatenated prefixes along the path to any leaf equal the
///     leaf's stored key;
///  2. every non-root node without a leaf has at least 2 edges (prefix
///     compression);
///  3. edge labels are unique, sorted, and equal to the first byte of the
///     child's prefix;
///  4. the recorded entry count equals the number of leaves present.
///
/// Most of these are unlikely to break by accident, but #2 in particular
/// depends on every removal running its compression repair. The checker
/// can be used to sanity check the tree in unit tests and fuzz targets.
///
/// The checker reports only a single issue at a time; a tree is
/// well-formed only if it returns `Ok`.
#[derive(Debug)]
pub struct WellFormedChecker {
    current_key_prefix: Vec<u8>,
    leaves_seen: usize,
}

impl WellFormedChecker {
    /// Traverse the given tree and check that it is well-formed. Returns
    /// the number of leaves in the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the given tree is not well-formed.
    pub fn check<K, V>(map: &RadixMap<K, V>) -> Result<usize, MalformedTreeError>
    where
        K: AsBytes,
    {
        if !map.root.prefix.is_empty() {
            return Err(MalformedTreeError::RootWithPrefix {
                prefix: KeyPrefix::from(map.root.prefix.as_slice()),
            });
        }

        let mut checker = WellFormedChecker {
            current_key_prefix: Vec::new(),
            leaves_seen: 0,
        };
        checker.visit_node(&map.root, true)?;

        if checker.leaves_seen != map.len() {
            return Err(MalformedTreeError::SizeMismatch {
                recorded: map.len(),
                counted: checker.leaves_seen,
            });
        }
        Ok(checker.leaves_seen)
    }

    fn position(&self) -> KeyPrefix {
        KeyPrefix::from(self.current_key_prefix.as_slice())
    }

    fn visit_node<K, V>(
        &mut self,
        node: &Node<K, V>,
        is_root: bool,
    ) -> Result<(), MalformedTreeError>
    where
        K: AsBytes,
    {
        if let Some(leaf) = node.leaf.as_ref() {
            self.leaves_seen += 1;
            if leaf.key.as_bytes() != self.current_key_prefix.as_slice() {
                return Err(MalformedTreeError::LeafKeyMismatch {
                    position: self.position(),
                    stored: KeyPrefix::from(leaf.key.as_bytes()),
                });
            }
        } else if !is_root && node.edges.len() < 2 {
            return Err(MalformedTreeError::UncompressedNode {
                position: self.position(),
                num_edges: node.edges.len(),
            });
        }

        let mut previous_label = None;
        for edge in &node.edges {
            if edge.node.prefix.first() != Some(&edge.label) {
                return Err(MalformedTreeError::EdgeLabelMismatch {
                    position: self.position(),
                    label: edge.label,
                });
            }
            if previous_label.is_some_and(|previous| edge.label <= previous) {
                return Err(MalformedTreeError::UnsortedEdges {
                    position: self.position(),
                    label: edge.label,
                });
            }
            previous_label = Some(edge.label);

            self.current_key_prefix.extend_from_slice(&edge.node.prefix);
            self.visit_node(&edge.node, false)?;
            self.current_key_prefix
                .truncate(self.current_key_prefix.len() - edge.node.prefix.len());
        }
        Ok(())
    }
}
