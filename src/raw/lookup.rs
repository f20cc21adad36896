use crate::raw::{Leaf, Node};

/// Read-only descent: consume `key` against edge prefixes until it is
/// exhausted, then report the landed node's leaf (if any).
pub(crate) fn search<'n, K, V>(root: &'n Node<K, V>, key: &[u8]) -> Option<&'n Leaf<K, V>> {
    let mut node = root;
    let mut search = key;
    loop {
        if search.is_empty() {
            return node.leaf.as_ref();
        }
        node = node.edge(search[0])?;
        search = search.strip_prefix(node.prefix.as_slice())?;
    }
}

/// [`search`], but producing a mutable leaf reference.
pub(crate) fn search_mut<'n, K, V>(
    root: &'n mut Node<K, V>,
    key: &[u8],
) -> Option<&'n mut Leaf<K, V>> {
    let mut node = root;
    let mut search = key;
    loop {
        if search.is_empty() {
            return node.leaf.as_mut();
        }
        node = node.edge_mut(search[0])?;
        search = search.strip_prefix(node.prefix.as_slice())?;
    }
}

/// Descend as far as `pattern` allows, remembering the leaf of the deepest
/// node passed through that had one. That leaf's key is the longest stored
/// key that is a byte-prefix of `pattern`.
pub(crate) fn longest_prefix_search<'n, K, V>(
    root: &'n Node<K, V>,
    pattern: &[u8],
) -> Option<&'n Leaf<K, V>> {
    let mut last = None;
    let mut node = root;
    let mut search = pattern;
    loop {
        if let Some(leaf) = node.leaf.as_ref() {
            last = Some(leaf);
        }
        if search.is_empty() {
            break;
        }
        match node.edge(search[0]) {
            Some(child) => node = child,
            None => break,
        }
        match search.strip_prefix(node.prefix.as_slice()) {
            Some(rest) => search = rest,
            // The pattern dies inside this node's prefix, so the node's own
            // leaf (if any) extends past the pattern and does not count.
            None => break,
        }
    }
    last
}
