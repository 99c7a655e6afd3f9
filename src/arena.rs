//! Index-based NNF circuits.
//!
//! [`NnfArena`] stores nodes in a flat vector, children before parents, the
//! way external compilers emit d-DNNF files. Every node refers to its children
//! by [`NodeId`], and the arena rejects a node whose children are not already
//! stored, so an arena is always acyclic and topologically sorted by
//! construction.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::nnf::Nnf;
use crate::types::{Lit, NodeId};

/// A node of an [`NnfArena`], with children of type `I`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<V, I = NodeId> {
    True,
    False,
    Lit(Lit<V>),
    And(Vec<I>),
    Or(Vec<I>),
}

impl<V, A> Node<V, A> {
    #[inline(always)]
    pub fn fmap<B, F>(self, f: F) -> Node<V, B>
    where
        F: FnMut(A) -> B,
    {
        match self {
            Node::True => Node::True,
            Node::False => Node::False,
            Node::Lit(lit) => Node::Lit(lit),
            Node::And(children) => Node::And(children.into_iter().map(f).collect()),
            Node::Or(children) => Node::Or(children.into_iter().map(f).collect()),
        }
    }

    pub fn children(&self) -> &[A] {
        match self {
            Node::And(children) | Node::Or(children) => children.as_slice(),
            Node::True | Node::False | Node::Lit(_) => &[],
        }
    }
}

impl<V> From<Node<V, Rc<Nnf<V>>>> for Nnf<V> {
    fn from(node: Node<V, Rc<Nnf<V>>>) -> Self {
        match node {
            Node::True => Nnf::True,
            Node::False => Nnf::False,
            Node::Lit(lit) => Nnf::Lit(lit),
            Node::And(children) => Nnf::And(children),
            Node::Or(children) => Nnf::Or(children),
        }
    }
}

/// Topologically sorted storage of NNF nodes.
#[derive(Debug, Clone)]
pub struct NnfArena<V> {
    nodes: Vec<Node<V>>,
}

impl<V> Default for NnfArena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NnfArena<V> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(id.index())
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id.index()]
    }

    /// Appends a node, returning its id.
    ///
    /// Fails with [`Error::MalformedNode`] if any child is not already in the arena.
    pub fn push(&mut self, node: Node<V>) -> Result<NodeId> {
        let id = NodeId::new(self.nodes.len());
        if let Some(child) = node.children().iter().find(|c| c.index() >= id.index()) {
            return Err(Error::malformed(
                id,
                format!("child {} does not precede its parent", child),
            ));
        }
        self.nodes.push(node);
        Ok(id)
    }

    /// Builds an arena from nodes listed children-first.
    pub fn from_nodes<I>(nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Node<V>>,
    {
        let mut arena = Self::new();
        for node in nodes {
            arena.push(node)?;
        }
        Ok(arena)
    }

    /// Checks that `root` refers to a node of this arena.
    pub fn check_root(&self, root: NodeId) -> Result<()> {
        if root.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::malformed(
                root,
                format!("root is outside the arena of {} nodes", self.nodes.len()),
            ))
        }
    }

    /// Ids of the nodes reachable from `root`, in increasing order (children first).
    pub fn reachable(&self, root: NodeId) -> Result<Vec<NodeId>> {
        self.check_root(root)?;
        Ok(self.reachable_from(root))
    }

    pub(crate) fn reachable_from(&self, root: NodeId) -> Vec<NodeId> {
        let mut seen = vec![false; root.index() + 1];
        let mut stack = vec![root];
        seen[root.index()] = true;

        while let Some(id) = stack.pop() {
            for &child in self.get(id).children() {
                if !seen[child.index()] {
                    seen[child.index()] = true;
                    stack.push(child);
                }
            }
        }

        seen.into_iter()
            .enumerate()
            .filter_map(|(i, s)| s.then_some(NodeId::new(i)))
            .collect()
    }

    /// Variables mentioned by literals reachable from `root`.
    pub fn vars(&self, root: NodeId) -> Result<HashSet<&V>>
    where
        V: Eq + Hash,
    {
        Ok(self
            .reachable(root)?
            .into_iter()
            .filter_map(|id| match self.get(id) {
                Node::Lit(lit) => Some(lit.name()),
                _ => None,
            })
            .collect())
    }
}

impl<V: Clone> NnfArena<V> {
    /// Flattens a pointer-based circuit into a new arena, returning the id of its root.
    ///
    /// Each distinct [`Rc`] allocation becomes exactly one arena node, so sharing is preserved.
    pub fn from_nnf(nnf: &Nnf<V>) -> (Self, NodeId) {
        let mut arena = Self::new();
        let root = arena.add_nnf(nnf);
        (arena, root)
    }

    /// Appends all nodes of `nnf` (post-order), returning the id of its root.
    pub fn add_nnf(&mut self, nnf: &Nnf<V>) -> NodeId {
        let mut ids: HashMap<*const Nnf<V>, NodeId> = HashMap::new();
        let mut stack: Vec<(&Nnf<V>, bool)> = vec![(nnf, false)];

        while let Some((node, expanded)) = stack.pop() {
            let key = node as *const Nnf<V>;
            if ids.contains_key(&key) {
                continue;
            }
            if !expanded {
                stack.push((node, true));
                for child in node.children().iter().rev() {
                    if !ids.contains_key(&Rc::as_ptr(child)) {
                        stack.push((child.as_ref(), false));
                    }
                }
                continue;
            }

            let flat = match node {
                Nnf::True => Node::True,
                Nnf::False => Node::False,
                Nnf::Lit(lit) => Node::Lit(lit.clone()),
                Nnf::And(children) => Node::And(children.iter().map(|c| ids[&Rc::as_ptr(c)]).collect()),
                Nnf::Or(children) => Node::Or(children.iter().map(|c| ids[&Rc::as_ptr(c)]).collect()),
            };
            let id = NodeId::new(self.nodes.len());
            self.nodes.push(flat);
            ids.insert(key, id);
        }

        ids[&(nnf as *const Nnf<V>)]
    }

    /// Rebuilds the pointer-based circuit rooted at `root`, sharing nodes the way the arena does.
    pub fn to_nnf(&self, root: NodeId) -> Result<Rc<Nnf<V>>> {
        let mut built: HashMap<NodeId, Rc<Nnf<V>>> = HashMap::new();
        for id in self.reachable(root)? {
            let node = self.get(id).clone().fmap(|c| built[&c].clone());
            built.insert(id, Rc::new(Nnf::from(node)));
        }
        Ok(built[&root].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn lit(name: &'static str, polarity: bool) -> Node<&'static str> {
        Node::Lit(Lit::new(name, polarity))
    }

    #[test]
    fn test_push() {
        let mut arena = NnfArena::new();
        let a = arena.push(lit("a", true)).unwrap();
        let b = arena.push(lit("b", false)).unwrap();
        let f = arena.push(Node::And(vec![a, b])).unwrap();
        assert_eq!(f, NodeId::new(2));
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.node(f), Some(&Node::And(vec![a, b])));
        assert_eq!(arena.node(NodeId::new(3)), None);
    }

    #[test]
    fn test_push_rejects_forward_reference() {
        let mut arena: NnfArena<&str> = NnfArena::new();
        let a = arena.push(lit("a", true)).unwrap();
        let err = arena.push(Node::Or(vec![a, NodeId::new(1)])).unwrap_err();
        assert!(matches!(err, Error::MalformedNode { node, .. } if node == NodeId::new(1)));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_from_nodes_rejects_self_reference() {
        let res = NnfArena::from_nodes([lit("a", true), Node::And(vec![NodeId::new(0), NodeId::new(1)])]);
        assert!(matches!(res, Err(Error::MalformedNode { .. })));
    }

    #[test]
    fn test_check_root() {
        let arena = NnfArena::from_nodes([Node::<&str>::True]).unwrap();
        assert!(arena.check_root(NodeId::new(0)).is_ok());
        assert!(matches!(
            arena.check_root(NodeId::new(1)),
            Err(Error::MalformedNode { .. })
        ));
    }

    #[test]
    fn test_reachable() {
        let arena = NnfArena::from_nodes([
            lit("a", true),                                  // 0
            lit("b", true),                                  // 1
            lit("c", true),                                  // 2
            Node::And(vec![NodeId::new(0), NodeId::new(2)]), // 3
            Node::Or(vec![NodeId::new(3), NodeId::new(0)]),  // 4
        ])
        .unwrap();
        let ids: Vec<usize> = arena.reachable(NodeId::new(4)).unwrap().into_iter().map(usize::from).collect();
        assert_eq!(ids, vec![0, 2, 3, 4]);

        let vars = arena.vars(NodeId::new(4)).unwrap();
        assert_eq!(vars.len(), 2);
        assert!(!vars.contains(&"b"));
    }

    #[test]
    fn test_from_nnf_preserves_sharing() {
        let a: Rc<Nnf<&str>> = Rc::new(Nnf::var("a"));
        let d: Rc<Nnf<&str>> = Rc::new(Nnf::or_shared([a.clone(), Rc::new(Nnf::lit("a", false))]));
        let f: Nnf<&str> = Nnf::and_shared([d.clone(), d, a]);

        let (arena, root) = NnfArena::from_nnf(&f);
        assert_eq!(arena.len(), 4);
        assert_eq!(root, NodeId::new(3));
        assert_eq!(arena.node(root).unwrap().children().len(), 3);

        let back = arena.to_nnf(root).unwrap();
        assert_eq!(back.to_string(), f.to_string());
        assert_eq!(back.size(), f.size());
    }

    #[test]
    fn test_fmap() {
        let node: Node<&str, usize> = Node::Or(vec![1, 2]);
        let ids: Node<&str, NodeId> = node.fmap(NodeId::new);
        assert_eq!(ids, Node::<&str, NodeId>::Or(vec![NodeId::new(1), NodeId::new(2)]));

        let leaf: Node<&str, usize> = Node::Lit(Lit::neg("x"));
        let shared: Node<&str, Rc<Nnf<&str>>> = leaf.fmap(|_| Rc::new(Nnf::True));
        assert_eq!(Nnf::from(shared).to_string(), "~x");
    }
}
