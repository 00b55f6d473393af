pub mod geometry;
pub mod placement;
pub mod preprocess;
pub mod squarify;

use crate::error::Result;
use crate::tree::nested::Nested;
use crate::tree::node::InternalNode;
use crate::tree::Weighted;

pub use geometry::{Direction, Rectangle};
pub use placement::{place, PlacedRect, PlacementConfig};
pub use preprocess::{pre_process, try_pre_process};
pub use squarify::{squarify, squarify_with};

/// Lay out raw weighted input in `rectangle`.
///
/// Sorts the input by decreasing weight at every level, then squarifies it.
/// Every call recomputes the whole tree.
pub fn compute_layout<C: Weighted>(input: Nested<C>, rectangle: Rectangle) -> InternalNode<C> {
    let items = pre_process(input);
    tracing::debug!(
        "Laying out {} top-level items in {:.0}x{:.0} area",
        items.len(),
        rectangle.width,
        rectangle.height
    );

    let tree = squarify(items, rectangle);
    tracing::debug!(
        "Treemap resolved: weight {}, {} top-level children, {}",
        tree.weight(),
        tree.children().len(),
        tree.direction()
    );
    tree
}

/// [`compute_layout`] for untrusted input: weights must be finite and
/// non-negative, the rectangle's sides as well.
pub fn try_compute_layout<C: Weighted>(
    input: Nested<C>,
    rectangle: Rectangle,
) -> Result<InternalNode<C>> {
    let rectangle = Rectangle::try_new(rectangle.width, rectangle.height)?;
    let items = try_pre_process(input)?;
    Ok(squarify(items, rectangle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::nested;
    use crate::tree::node::Node;

    #[test]
    fn unordered_input_is_laid_out_like_sorted_input() {
        let bounds = Rectangle::new(600.0, 400.0);
        let shuffled = compute_layout(nested![2.0, 6.0, 1.0, 3.0, 6.0, 2.0, 4.0], bounds);
        let sorted = squarify(
            [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0]
                .map(|w| Nested::leaf(Node::leaf(w)))
                .to_vec(),
            bounds,
        );
        assert_eq!(shuffled, sorted);
        assert_eq!(shuffled.weight(), 24.0);
    }

    #[test]
    fn single_value_input() {
        let tree = compute_layout(Nested::leaf(5.0), Rectangle::new(10.0, 20.0));
        assert_eq!(tree, InternalNode::new(vec![Node::leaf(5.0)], Direction::Row));
    }

    #[test]
    fn checked_layout_rejects_bad_input() {
        let bounds = Rectangle::new(100.0, 100.0);
        assert!(try_compute_layout(nested![1.0, [2.0]], bounds).is_ok());
        assert_eq!(
            try_compute_layout(nested![1.0], Rectangle::new(-1.0, 5.0)).unwrap_err(),
            LayoutError::InvalidRectangle { width: -1.0, height: 5.0 }
        );
        assert!(matches!(
            try_compute_layout(nested![1.0, (f64::INFINITY)], bounds),
            Err(LayoutError::NonFiniteWeight { index: 1, .. })
        ));
    }
}
