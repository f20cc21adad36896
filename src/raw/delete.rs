use crate::raw::{Leaf, Node};

/// Remove the leaf stored under exactly `key`, restoring prefix
/// compression on the way back up.
///
/// After the leaf is gone, three repairs keep the tree canonical:
///  - a node left with no leaf and no edges is detached from its parent;
///  - a non-root node left with one edge and no leaf absorbs its child;
///  - the parent is re-checked for the same single-edge condition, since
///    detaching the child may have dropped it to one edge.
pub(crate) fn remove<K, V>(root: &mut Node<K, V>, key: &[u8]) -> Option<Leaf<K, V>> {
    remove_in(root, true, key)
}

fn remove_in<K, V>(node: &mut Node<K, V>, is_root: bool, search: &[u8]) -> Option<Leaf<K, V>> {
    if search.is_empty() {
        let leaf = node.leaf.take()?;
        if !is_root && node.edges.len() == 1 {
            node.merge_child();
        }
        return Some(leaf);
    }

    let label = search[0];
    let rest = {
        let child = node.edge(label)?;
        search.strip_prefix(child.prefix.as_slice())?
    };

    let child = node.edge_mut(label).expect("edge was just found");
    let leaf = remove_in(child, false, rest)?;
    let child_is_empty = child.is_empty();

    if child_is_empty {
        node.remove_edge(label);
    }
    if !is_root && node.edges.len() == 1 && node.leaf.is_none() {
        node.merge_child();
    }
    Some(leaf)
}

/// Remove every leaf whose key starts with `prefix`, returning how many
/// were removed.
///
/// The descent consumes `prefix` the same way [`remove`] consumes a key,
/// but termination differs: as soon as the search prefix is exhausted, the
/// entire subtree at the current position matches and is detached. That
/// includes the case where the remaining search prefix is a proper prefix
/// of a child's prefix — the child's whole subtree is within the search
/// prefix even though the byte strings are not equal.
pub(crate) fn remove_prefix<K, V>(root: &mut Node<K, V>, prefix: &[u8]) -> usize {
    if prefix.is_empty() {
        // Degenerate form: every key matches.
        let count = root.count_leaves();
        root.leaf = None;
        root.edges.clear();
        return count;
    }
    remove_prefix_in(root, true, prefix)
}

fn remove_prefix_in<K, V>(node: &mut Node<K, V>, is_root: bool, search: &[u8]) -> usize {
    debug_assert!(!search.is_empty());

    let label = search[0];
    let Some(child) = node.edge(label) else {
        return 0;
    };

    // The child matches if either byte string is a prefix of the other;
    // otherwise they diverge inside the child's prefix and nothing below
    // can start with the search prefix.
    let rest = if let Some(rest) = search.strip_prefix(child.prefix.as_slice()) {
        rest
    } else if child.prefix.starts_with(search) {
        &[]
    } else {
        return 0;
    };

    let removed = if rest.is_empty() {
        // Search prefix exhausted: the whole child subtree matches.
        let detached = node.remove_edge(label);
        detached.count_leaves()
    } else {
        let child = node.edge_mut(label).expect("edge was just found");
        let removed = remove_prefix_in(child, false, rest);
        if removed > 0 && child.is_empty() {
            node.remove_edge(label);
        }
        removed
    };

    if removed > 0 && !is_root && node.edges.len() == 1 && node.leaf.is_none() {
        node.merge_child();
    }
    removed
}
