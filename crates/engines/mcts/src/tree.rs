//! Arena-backed search tree.
//!
//! Nodes live in one `Vec` and point at each other by index, so the tree
//! needs no reference counting and drops in one piece. A tree is built
//! fresh for every search call and never reused across moves.

pub type NodeId = usize;

/// The root is always the first slot.
pub const ROOT: NodeId = 0;

#[derive(Debug)]
pub struct Node<S, M> {
    pub state: S,
    /// Move that produced this node; `None` only at the root.
    pub mv: Option<M>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub visits: u64,
    /// Sum of every reward backpropagated through this node.
    pub value: f64,
    pub terminal: bool,
    /// Set once all legal children have been attached.
    pub expanded: bool,
}

#[derive(Debug)]
pub struct Tree<S, M> {
    nodes: Vec<Node<S, M>>,
}

impl<S, M> Tree<S, M> {
    pub fn new(root_state: S, terminal: bool) -> Tree<S, M> {
        Tree {
            nodes: vec![Node {
                state: root_state,
                mv: None,
                parent: None,
                children: Vec::new(),
                visits: 0,
                value: 0.0,
                terminal,
                expanded: false,
            }],
        }
    }

    /// Appends a child under `parent` and links it both ways.
    pub fn add_child(&mut self, parent: NodeId, state: S, mv: M, terminal: bool) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            state,
            mv: Some(mv),
            parent: Some(parent),
            children: Vec::new(),
            visits: 0,
            value: 0.0,
            terminal,
            expanded: false,
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node<S, M> {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<S, M> {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
