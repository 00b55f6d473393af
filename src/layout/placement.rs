use crate::layout::geometry::{Direction, Rectangle};
use crate::tree::node::{InternalNode, Node};

/// A node of a resolved treemap at its absolute position.
#[derive(Debug, Clone)]
pub struct PlacedRect<'a, C> {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Root = 0
    pub depth: u16,
    /// `None` for internal nodes
    pub content: Option<&'a C>,
}

impl<C> PlacedRect<'_, C> {
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn is_leaf(&self) -> bool {
        self.content.is_some()
    }
}

/// Configuration for turning a tree into positioned rectangles.
#[derive(Debug, Clone)]
pub struct PlacementConfig {
    /// Rectangles smaller than this (px²) are dropped along with their subtree
    pub min_area: f64,
    /// Nodes deeper than this are not placed. Every closed strip adds a level,
    /// so long flat inputs nest deeply.
    pub max_depth: u16,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_area: 0.0,
            max_depth: u16::MAX,
        }
    }
}

struct Frame<'a, C> {
    node: &'a InternalNode<C>,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    depth: u16,
}

/// Derive absolute rectangles from a resolved treemap.
///
/// A `Row` node splits its width among the children in proportion to their
/// weights, children sharing the full height; a `Column` node splits its height.
/// The root fills `bounds` at (`x`, `y`). Parents come before their children.
pub fn place<'a, C>(
    tree: &'a InternalNode<C>,
    x: f64,
    y: f64,
    bounds: Rectangle,
    config: &PlacementConfig,
) -> Vec<PlacedRect<'a, C>> {
    let mut rects = vec![PlacedRect {
        x,
        y,
        w: bounds.width,
        h: bounds.height,
        depth: 0,
        content: None,
    }];

    let mut stack = vec![Frame {
        node: tree,
        x,
        y,
        w: bounds.width,
        h: bounds.height,
        depth: 0,
    }];

    while let Some(frame) = stack.pop() {
        let parent = frame.node;
        if frame.depth >= config.max_depth {
            continue;
        }
        if parent.weight() <= 0.0 {
            tracing::debug!(
                "Skipping {} children of zero-weight node at depth {}",
                parent.children().len(),
                frame.depth
            );
            continue;
        }

        let child_depth = frame.depth + 1;
        let mut offset = 0.0;
        for child in parent.children() {
            let share = child.weight() / parent.weight();
            let (cx, cy, cw, ch) = match parent.direction() {
                Direction::Row => {
                    let span = frame.w * share;
                    (frame.x + offset, frame.y, span, frame.h)
                }
                Direction::Column => {
                    let span = frame.h * share;
                    (frame.x, frame.y + offset, frame.w, span)
                }
            };
            offset += match parent.direction() {
                Direction::Row => cw,
                Direction::Column => ch,
            };

            if cw * ch < config.min_area {
                continue;
            }

            rects.push(PlacedRect {
                x: cx,
                y: cy,
                w: cw,
                h: ch,
                depth: child_depth,
                content: child.content(),
            });

            match child {
                Node::Internal(internal) => stack.push(Frame {
                    node: internal,
                    x: cx,
                    y: cy,
                    w: cw,
                    h: ch,
                    depth: child_depth,
                }),
                Node::Lazy(_) => {
                    tracing::warn!("Unresolved nested group at depth {}, left empty", child_depth);
                }
                Node::Leaf(_) => {}
            }
        }
    }

    rects
}
