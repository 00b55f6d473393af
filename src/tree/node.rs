use crate::layout::geometry::{Direction, Rectangle};
use crate::tree::nested::{self, Nested};
use crate::tree::Weighted;

/// Aspect ratio of a laid-out child, `max(w/h, h/w)`. 1.0 is a square.
pub type AspectRatio = f64;

/// A node of a treemap, which is a treemap itself.
///
/// Nodes are values: every transformation consumes the receiver and returns
/// a new node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<C> {
    Leaf(LeafNode<C>),
    Internal(InternalNode<C>),
    /// Placeholder for a nested group that has not been laid out yet.
    /// Never part of a tree returned by squarify.
    Lazy(LazyNode<C>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode<C> {
    content: C,
    weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InternalNode<C> {
    children: Vec<Node<C>>,
    direction: Direction,
    weight: f64,
}

/// An unresolved subtree: it carries the nested group instead of children.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyNode<C> {
    lazy_content: Vec<Nested<Node<C>>>,
    weight: f64,
}

impl<C> Node<C> {
    pub fn leaf(content: C) -> Self
    where
        C: Weighted,
    {
        Node::Leaf(LeafNode::new(content))
    }

    /// A bare node is used as is; a nested group becomes a [`LazyNode`]
    /// weighing the sum of its leaves.
    pub fn from_nested(item: Nested<Node<C>>) -> Self {
        match item {
            Nested::Leaf(node) => node,
            Nested::Group(items) => Node::Lazy(LazyNode::from_group(items)),
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Node::Leaf(leaf) => leaf.weight,
            Node::Internal(internal) => internal.weight,
            Node::Lazy(lazy) => lazy.weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Node::Lazy(_))
    }

    /// Resolved children. Leaves and lazy nodes have none.
    pub fn children(&self) -> &[Node<C>] {
        match self {
            Node::Internal(internal) => &internal.children,
            Node::Leaf(_) | Node::Lazy(_) => &[],
        }
    }

    pub fn content(&self) -> Option<&C> {
        match self {
            Node::Leaf(leaf) => Some(&leaf.content),
            _ => None,
        }
    }

    /// Add a child.
    ///
    /// An internal node keeps its children and direction. Any other node is
    /// not kept: the result is a fresh `Row` node holding only `child`.
    pub fn inserting(self, child: Node<C>) -> InternalNode<C> {
        match self {
            Node::Internal(internal) => internal.inserting(child),
            Node::Leaf(_) | Node::Lazy(_) => InternalNode::new(vec![child], Direction::Row),
        }
    }

    /// Leaves of this subtree, depth-first in child order.
    pub fn leaves(&self) -> Vec<&LeafNode<C>> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf(leaf) => leaves.push(leaf),
                Node::Internal(internal) => stack.extend(internal.children.iter().rev()),
                Node::Lazy(_) => {}
            }
        }
        leaves
    }

    /// Whether any lazy placeholder is left in this subtree.
    pub fn contains_lazy(&self) -> bool {
        match self {
            Node::Leaf(_) => false,
            Node::Lazy(_) => true,
            Node::Internal(internal) => internal.children.iter().any(Node::contains_lazy),
        }
    }
}

impl<C> Weighted for Node<C> {
    fn weight(&self) -> f64 {
        Node::weight(self)
    }
}

impl<C> From<InternalNode<C>> for Node<C> {
    fn from(internal: InternalNode<C>) -> Self {
        Node::Internal(internal)
    }
}

impl<C> From<LeafNode<C>> for Node<C> {
    fn from(leaf: LeafNode<C>) -> Self {
        Node::Leaf(leaf)
    }
}

impl<C> From<LazyNode<C>> for Node<C> {
    fn from(lazy: LazyNode<C>) -> Self {
        Node::Lazy(lazy)
    }
}

impl<C: Weighted> LeafNode<C> {
    pub fn new(content: C) -> Self {
        let weight = content.weight();
        Self { content, weight }
    }
}

impl<C> LeafNode<C> {
    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn into_content(self) -> C {
        self.content
    }
}

impl<C> InternalNode<C> {
    /// Weight is the sum of the children's weights.
    pub fn new(children: Vec<Node<C>>, direction: Direction) -> Self {
        let weight = children.iter().map(Node::weight).fold(0.0, |sum, w| sum + w);
        Self {
            children,
            direction,
            weight,
        }
    }

    /// Explicit weight, independent of the children.
    pub fn with_weight(children: Vec<Node<C>>, direction: Direction, weight: f64) -> Self {
        Self {
            children,
            direction,
            weight,
        }
    }

    /// No children, weight 0.
    pub fn empty(direction: Direction) -> Self {
        Self::with_weight(Vec::new(), direction, 0.0)
    }

    pub fn children(&self) -> &[Node<C>] {
        &self.children
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn into_children(self) -> Vec<Node<C>> {
        self.children
    }

    /// Append a child, keeping the direction.
    pub fn inserting(self, child: Node<C>) -> Self {
        let mut children = self.children;
        children.push(child);
        Self::new(children, self.direction)
    }

    /// Undo the last [`InternalNode::inserting`].
    pub(crate) fn retracting(self) -> (Self, Option<Node<C>>) {
        let mut children = self.children;
        let last = children.pop();
        (Self::new(children, self.direction), last)
    }

    /// Same children, grouped in `direction`.
    pub fn oriented(self, direction: Direction) -> Self {
        Self::new(self.children, direction)
    }

    pub fn orientation_transposed(self) -> Self {
        let direction = self.direction.transposed();
        self.oriented(direction)
    }

    /// How far from square the children end up when this node fills `rectangle`.
    ///
    /// The layout side (width for `Row`, height for `Column`) is split in
    /// proportion to the children's weights; every child spans the whole
    /// flexible side. Returns the worst child ratio, lower is better.
    pub fn worst_aspect_ratio(&self, rectangle: Rectangle) -> AspectRatio {
        let (layout_side, flexible_side) = match self.direction {
            Direction::Row => (rectangle.width, rectangle.height),
            Direction::Column => (rectangle.height, rectangle.width),
        };

        self.children
            .iter()
            .map(|child| {
                let span = layout_side * child.weight() / self.weight;
                (span / flexible_side).max(flexible_side / span)
            })
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl<C> LazyNode<C> {
    pub fn new(lazy_content: Vec<Nested<Node<C>>>, weight: f64) -> Self {
        Self {
            lazy_content,
            weight,
        }
    }

    /// Weight taken from the leaves of `lazy_content`.
    pub fn from_group(lazy_content: Vec<Nested<Node<C>>>) -> Self {
        let weight = total_weight(&lazy_content);
        Self::new(lazy_content, weight)
    }

    pub fn lazy_content(&self) -> &[Nested<Node<C>>] {
        &self.lazy_content
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn into_lazy_content(self) -> Vec<Nested<Node<C>>> {
        self.lazy_content
    }
}

/// Sum of the node weights at the leaves of `items`.
pub fn total_weight<C>(items: &[Nested<Node<C>>]) -> f64 {
    nested::reduce_all(items, 0.0, weight_sum)
}

pub fn weight_sum<C>(sum: f64, node: &Node<C>) -> f64 {
    sum + node.weight()
}
