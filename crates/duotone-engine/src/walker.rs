use duotone_model::{TokenGroup, TokenLeaf, TokenNode, TokenPath};

/// Recursive descent over a token subtree in document order.
///
/// The visitor runs for every leaf; containers recurse with the path
/// extended by the child's key. Traversal order matches the document's key
/// enumeration order, which ordered outputs rely on.
pub fn walk_leaves<F>(group: &TokenGroup, path: &TokenPath, visit: &mut F)
where
    F: FnMut(&TokenPath, &TokenLeaf),
{
    for (name, node) in group.iter() {
        let child_path = path.child(name);
        match node {
            TokenNode::Leaf(leaf) => visit(&child_path, leaf),
            TokenNode::Container(children) => walk_leaves(children, &child_path, visit),
        }
    }
}
