use crate::{raw::Node, RadixMap};
use std::io::{self, Write};

/// A visitor over the tree that prints its structure in "dot" notation.
///
/// See ['DOT Language | Graphviz'](https://graphviz.org/doc/info/lang.html)
/// for information about the syntax and examples of the language.
pub struct DotPrinter<O: Write> {
    output: O,
    next_id: usize,
}

impl<O: Write> DotPrinter<O> {
    /// Write the dot-format of the given tree to the given output.
    pub fn print_tree<K, V>(output: O, map: &RadixMap<K, V>) -> io::Result<()> {
        let mut printer = DotPrinter { output, next_id: 0 };

        printer.output_prelude()?;
        let _ = printer.write_node(&map.root)?;
        printer.output_epilogue()
    }

    fn output_prelude(&mut self) -> io::Result<()> {
        writeln!(self.output, "strict digraph G {{")?;
        writeln!(self.output, "node [shape=record]")
    }

    fn output_epilogue(&mut self) -> io::Result<()> {
        writeln!(self.output, "}}")
    }

    fn get_id(&mut self) -> usize {
        let new_id = self.next_id;
        self.next_id += 1;
        new_id
    }

    fn write_node<K, V>(&mut self, node: &Node<K, V>) -> io::Result<usize> {
        let node_id = self.get_id();
        let kind = if node.is_leaf() { "leaf" } else { "inner" };
        writeln!(
            self.output,
            "n{node_id} [label=\"{{<h0> '{}' | {kind}}}\"]",
            node.prefix.escape_ascii()
        )?;

        for edge in &node.edges {
            let child_id = self.write_node(&edge.node)?;
            writeln!(
                self.output,
                "n{node_id} -> n{child_id} [label=\"{}\"]",
                edge.label.escape_ascii()
            )?;
        }

        Ok(node_id)
    }
}
