use std::fmt::Write;

use crate::gpu;

/// Renders a human-readable, depth-first dump of the tree; used for
/// debugging only.
pub struct BvhPrinter;

impl BvhPrinter {
    /// Prints the subtree rooted at `node_id`, one line per node.
    ///
    /// # Panics
    ///
    /// Panics if `node_id` (or any child index reachable from it) lies
    /// outside of `nodes`.
    pub fn print(nodes: &[gpu::BvhNode], node_id: u32) -> String {
        let mut out = String::new();

        Self::process(&mut out, nodes, node_id);

        out
    }

    fn process(out: &mut String, nodes: &[gpu::BvhNode], node_id: u32) {
        assert!(
            (node_id as usize) < nodes.len(),
            "node #{node_id} is out of bounds (there are {} nodes)",
            nodes.len(),
        );

        match nodes[node_id as usize].kind() {
            gpu::BvhNodeKind::Internal { first_child } => {
                _ = writeln!(
                    out,
                    "Node number {} : Left child {} | Right child : {}",
                    node_id,
                    first_child,
                    first_child + 1,
                );

                Self::process(out, nodes, first_child);
                Self::process(out, nodes, first_child + 1);
            }

            gpu::BvhNodeKind::Leaf {
                first_triangle,
                triangle_count,
            } => {
                _ = writeln!(
                    out,
                    "Node number {} : First triangle index : {} | Triangle count {}",
                    node_id, first_triangle, triangle_count,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<gpu::BvhNode> {
        vec![
            gpu::BvhNode::internal(1),
            gpu::BvhNode::internal(3),
            gpu::BvhNode::leaf(5, 3),
            gpu::BvhNode::leaf(0, 2),
            gpu::BvhNode::leaf(2, 3),
        ]
    }

    #[test]
    fn print() {
        let expected = "\
Node number 0 : Left child 1 | Right child : 2
Node number 1 : Left child 3 | Right child : 4
Node number 3 : First triangle index : 0 | Triangle count 2
Node number 4 : First triangle index : 2 | Triangle count 3
Node number 2 : First triangle index : 5 | Triangle count 3
";

        assert_eq!(expected, BvhPrinter::print(&nodes(), 0));
    }

    #[test]
    fn print_subtree() {
        let expected = "\
Node number 4 : First triangle index : 2 | Triangle count 3
";

        assert_eq!(expected, BvhPrinter::print(&nodes(), 4));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn print_out_of_bounds() {
        BvhPrinter::print(&nodes(), 5);
    }
}
