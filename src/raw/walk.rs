use crate::raw::Node;
use std::ops::ControlFlow;

/// Depth-first pre-order visit of every leaf under `node`: a node's own
/// leaf is reported before its children, children in ascending label
/// order. `Break` from the callback stops the whole walk.
pub(crate) fn walk_tree<K, V, F>(node: &Node<K, V>, f: &mut F) -> ControlFlow<()>
where
    F: FnMut(&K, &V) -> ControlFlow<()>,
{
    if let Some(leaf) = node.leaf.as_ref() {
        f(&leaf.key, &leaf.value)?;
    }
    for edge in &node.edges {
        walk_tree(&edge.node, f)?;
    }
    ControlFlow::Continue(())
}

/// Walk only the subtree of keys starting with `prefix`.
///
/// The descent consumes `prefix` against edge prefixes. If the search
/// prefix runs out exactly at (or inside) a node's prefix, that node's
/// whole subtree is within the prefix and is walked; if the descent
/// diverges instead, nothing matches and the callback is never invoked.
pub(crate) fn walk_prefix<K, V, F>(root: &Node<K, V>, prefix: &[u8], f: &mut F) -> ControlFlow<()>
where
    F: FnMut(&K, &V) -> ControlFlow<()>,
{
    let mut node = root;
    let mut search = prefix;
    loop {
        if search.is_empty() {
            return walk_tree(node, f);
        }
        match node.edge(search[0]) {
            Some(child) => node = child,
            None => return ControlFlow::Continue(()),
        }
        if let Some(rest) = search.strip_prefix(node.prefix.as_slice()) {
            search = rest;
        } else if node.prefix.starts_with(search) {
            // The search prefix ends inside this node's prefix, so every
            // key below extends it.
            return walk_tree(node, f);
        } else {
            return ControlFlow::Continue(());
        }
    }
}

/// Visit, from the root downward, every leaf whose key is a prefix of
/// `path` (including an exact match). The mirror image of [`walk_prefix`].
pub(crate) fn walk_path<K, V, F>(root: &Node<K, V>, path: &[u8], f: &mut F) -> ControlFlow<()>
where
    F: FnMut(&K, &V) -> ControlFlow<()>,
{
    let mut node = root;
    let mut search = path;
    loop {
        if let Some(leaf) = node.leaf.as_ref() {
            f(&leaf.key, &leaf.value)?;
        }
        if search.is_empty() {
            return ControlFlow::Continue(());
        }
        match node.edge(search[0]) {
            Some(child) => node = child,
            None => return ControlFlow::Continue(()),
        }
        match search.strip_prefix(node.prefix.as_slice()) {
            Some(rest) => search = rest,
            None => return ControlFlow::Continue(()),
        }
    }
}

/// Pre-order traversal that drops every leaf the predicate rejects,
/// repairing prefix compression as it unwinds.
///
/// Children may be removed or merged while their parent's edge list is
/// being scanned, so the loop re-reads the live edge count on every step
/// instead of caching it; removal happens at the scan index, which keeps
/// the position of the unvisited siblings stable.
///
/// Returns the number of leaves removed.
pub(crate) fn retain_tree<K, V, F>(node: &mut Node<K, V>, is_root: bool, f: &mut F) -> usize
where
    F: FnMut(&K, &mut V) -> bool,
{
    let mut removed = 0;
    if let Some(leaf) = node.leaf.as_mut() {
        if !f(&leaf.key, &mut leaf.value) {
            node.leaf = None;
            removed += 1;
        }
    }

    let mut index = 0;
    while index < node.edges.len() {
        let child = &mut node.edges[index].node;
        removed += retain_tree(child, false, f);
        if child.is_empty() {
            node.edges.remove(index);
        } else {
            index += 1;
        }
    }

    if !is_root && node.leaf.is_none() && node.edges.len() == 1 {
        node.merge_child();
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{insert_into, search, Node};

    fn build(keys: &[&str]) -> Node<String, u32> {
        let mut root = Node::new(b"");
        for (value, key) in keys.iter().enumerate() {
            insert_into(&mut root, (*key).to_owned(), value as u32);
        }
        root
    }

    fn visit_into(seen: &mut Vec<String>) -> impl FnMut(&String, &u32) -> ControlFlow<()> + '_ {
        |key, _| {
            seen.push(key.clone());
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn walk_is_preorder_lexicographic() {
        let root = build(&["romulus", "rubens", "romane", "romanus", "foo", "foobar"]);
        let mut seen = Vec::new();
        let _ = walk_tree(&root, &mut visit_into(&mut seen));
        assert_eq!(
            seen,
            vec!["foo", "foobar", "romane", "romanus", "romulus", "rubens"]
        );
    }

    #[test]
    fn walk_stops_early_on_break() {
        let root = build(&["a", "b", "c"]);
        let mut seen = Vec::new();
        let result = walk_tree(&root, &mut |key: &String, _: &u32| {
            seen.push(key.clone());
            if key == "b" {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(result, ControlFlow::Break(()));
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn walk_prefix_selects_matching_subtree() {
        let root = build(&["romane", "romanus", "romulus", "rubens"]);
        let mut seen = Vec::new();
        let _ = walk_prefix(&root, b"rom", &mut visit_into(&mut seen));
        assert_eq!(seen, vec!["romane", "romanus", "romulus"]);
    }

    #[test]
    fn walk_prefix_ending_inside_an_edge_still_matches() {
        let root = build(&["romane", "romanus"]);
        // "ro" ends inside the "roman" node's prefix.
        let mut seen = Vec::new();
        let _ = walk_prefix(&root, b"ro", &mut visit_into(&mut seen));
        assert_eq!(seen, vec!["romane", "romanus"]);
        // ...but a diverging byte matches nothing.
        seen.clear();
        let _ = walk_prefix(&root, b"rx", &mut visit_into(&mut seen));
        assert!(seen.is_empty());
    }

    #[test]
    fn walk_prefix_empty_prefix_walks_everything() {
        let root = build(&["b", "a"]);
        let mut seen = Vec::new();
        let _ = walk_prefix(&root, b"", &mut visit_into(&mut seen));
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn walk_path_visits_ancestors_in_order() {
        let root = build(&["f", "foo", "foobar", "foobarbaz", "fizz"]);
        let mut seen = Vec::new();
        let _ = walk_path(&root, b"foobar", &mut visit_into(&mut seen));
        assert_eq!(seen, vec!["f", "foo", "foobar"]);
    }

    #[test]
    fn walk_path_stops_where_descent_dies() {
        let root = build(&["foo", "foobar"]);
        let mut seen = Vec::new();
        let _ = walk_path(&root, b"foob", &mut visit_into(&mut seen));
        assert_eq!(seen, vec!["foo"]);
        seen.clear();
        let _ = walk_path(&root, b"quux", &mut visit_into(&mut seen));
        assert!(seen.is_empty());
    }

    #[test]
    fn retain_removes_rejected_leaves_and_recompresses() {
        let mut root = build(&["romane", "romanus", "romulus", "rubens"]);
        let removed = retain_tree(&mut root, true, &mut |key: &String, _: &mut u32| {
            !key.starts_with("roman")
        });
        assert_eq!(removed, 2);
        assert!(search(&root, b"romulus").is_some());
        assert!(search(&root, b"rubens").is_some());
        assert!(search(&root, b"romane").is_none());

        // With "romane"/"romanus" gone, "r" holds two proper children.
        let r = root.edge(b'r').unwrap();
        assert_eq!(r.prefix.as_slice(), b"r");
        assert_eq!(r.edges.len(), 2);
        assert_eq!(r.edge(b'o').unwrap().prefix.as_slice(), b"omulus");
    }

    #[test]
    fn retain_nothing_leaves_tree_untouched() {
        let mut root = build(&["a", "ab", "abc"]);
        assert_eq!(retain_tree(&mut root, true, &mut |_: &String, _| true), 0);
        assert_eq!(root.count_leaves(), 3);
    }

    #[test]
    fn retain_everything_empties_the_tree() {
        let mut root = build(&["a", "ab", "abc"]);
        assert_eq!(retain_tree(&mut root, true, &mut |_: &String, _| false), 3);
        assert!(root.is_empty());
    }
}
