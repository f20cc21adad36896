use crate::{
    raw::{common_prefix_len, Leaf, Node, Prefix},
    AsBytes,
};

/// Insert `key` into the subtree rooted at `root`, splitting prefixes as
/// needed.
///
/// Returns the previous value if the key was already present (the stored
/// key is kept, only its value is replaced). Returns `None` if a new leaf
/// was attached; the caller is responsible for bumping its entry count in
/// that case.
///
/// The caller must reject empty keys before calling: an empty key would
/// terminate at the root, and the root never carries a leaf.
pub(crate) fn insert_into<K, V>(root: &mut Node<K, V>, key: K, value: V) -> Option<V>
where
    K: AsBytes,
{
    debug_assert!(!key.as_bytes().is_empty(), "empty keys are rejected above");

    let mut node = root;
    let mut consumed = 0;

    loop {
        let search = &key.as_bytes()[consumed..];

        // Key fully consumed: this node is where the leaf lives.
        if search.is_empty() {
            return match node.leaf.as_mut() {
                Some(leaf) => Some(std::mem::replace(&mut leaf.value, value)),
                None => {
                    node.leaf = Some(Leaf { key, value });
                    None
                },
            };
        }

        let label = search[0];
        let (common, child_prefix_len) = match node.edge(label) {
            None => {
                // No branch for the next byte: hang the whole remaining
                // suffix off a fresh child.
                let prefix = Prefix::from_slice(search);
                node.add_edge(Box::new(Node::with_leaf(prefix, key, value)));
                return None;
            },
            Some(child) => (common_prefix_len(search, &child.prefix), child.prefix.len()),
        };

        if common == child_prefix_len {
            // The child's prefix fully matches: consume it and descend.
            consumed += common;
            node = node.edge_mut(label).expect("edge was just found");
            continue;
        }

        // Partial overlap: split the edge. An intermediate node takes the
        // common bytes; the displaced child is re-hung beneath it with its
        // prefix trimmed to the uncommon remainder.
        let mut displaced = node.update_edge(label, Box::new(Node::new(&search[..common])));
        let trimmed = Prefix::from_slice(&displaced.prefix[common..]);
        displaced.prefix = trimmed;

        let split = node.edge_mut(label).expect("split node was just installed");
        split.add_edge(displaced);

        let remainder = &search[common..];
        if remainder.is_empty() {
            // The inserted key ends exactly at the split point.
            split.leaf = Some(Leaf { key, value });
        } else {
            let prefix = Prefix::from_slice(remainder);
            split.add_edge(Box::new(Node::with_leaf(prefix, key, value)));
        }
        return None;
    }
}
