use std::collections::VecDeque;

use crate::layout::geometry::{Direction, Rectangle};
use crate::tree::nested::Nested;
use crate::tree::node::{InternalNode, Node};

/// Lay out `items` in `rectangle` with the squarify heuristic.
///
/// Items should already be sorted by decreasing weight (see
/// [`pre_process`](super::preprocess::pre_process)). Nested groups are laid out
/// as sub-treemaps perpendicular to the strip they land in. The result holds
/// no lazy nodes and weighs as much as all leaves of `items` together.
pub fn squarify<C>(items: Vec<Nested<Node<C>>>, rectangle: Rectangle) -> InternalNode<C> {
    squarify_with(items, None, rectangle)
}

/// [`squarify`] continuing an already started strip.
///
/// `accumulator` is the strip built so far; its children are no longer part
/// of `items`.
pub fn squarify_with<C>(
    items: Vec<Nested<Node<C>>>,
    accumulator: Option<InternalNode<C>>,
    rectangle: Rectangle,
) -> InternalNode<C> {
    let mut queue: VecDeque<Node<C>> = items.into_iter().map(Node::from_nested).collect();
    let mut current = accumulator;
    let mut rectangle = rectangle;
    // Finished strips, outermost first, with the direction of the node that
    // pairs each strip with the treemap of everything after it.
    let mut strips: Vec<(InternalNode<C>, Direction)> = Vec::new();

    let rest = loop {
        let Some(first) = queue.pop_front() else {
            break InternalNode::empty(Direction::Column);
        };

        let Some(strip) = current.take() else {
            // Start on the short side: a column on the left or a row on top.
            let direction = if rectangle.is_wider_than_tall() {
                Direction::Column
            } else {
                Direction::Row
            };
            let strip = InternalNode::new(vec![first], direction);
            if queue.is_empty() {
                break resolved(strip, rectangle);
            }
            current = Some(strip);
            continue;
        };

        if queue.is_empty() {
            // The last item joins the strip, which then follows the long side.
            let direction = if rectangle.is_wider_than_tall() {
                Direction::Row
            } else {
                Direction::Column
            };
            break resolved(strip.inserting(first).oriented(direction), rectangle);
        }

        let total_weight = queue
            .iter()
            .fold(strip.weight() + first.weight(), |sum, node| sum + node.weight());

        let current_share = strip.weight() / total_weight;
        let current_target = rectangle.portion(current_share, strip.direction());
        let current_worst = strip.worst_aspect_ratio(current_target);

        let candidate = strip.inserting(first);
        let candidate_share = candidate.weight() / total_weight;
        let candidate_target = rectangle.portion(candidate_share, candidate.direction());
        let candidate_worst = candidate.worst_aspect_ratio(candidate_target);

        tracing::trace!(
            "Strip of {} ({}): worst ratio {:.3} now, {:.3} with next item",
            candidate.children().len() - 1,
            candidate.direction(),
            current_worst,
            candidate_worst
        );

        if candidate_worst < current_worst {
            current = Some(candidate);
            continue;
        }

        // Not worth it: close the strip and lay out the rest next to it.
        let (strip, first) = candidate.retracting();
        if let Some(first) = first {
            queue.push_front(first);
        }

        let direction = strip.direction().transposed();
        rectangle = rectangle.shaving(current_share, strip.direction());
        strips.push((resolved(strip, current_target), direction));
    };

    strips
        .into_iter()
        .rev()
        .fold(rest, |rest, (strip, direction)| {
            InternalNode::new(vec![strip.into(), rest.into()], direction)
        })
}

/// Squarify the lazy children of a finished strip inside `target`.
///
/// Each nested group gets the share of `target` matching its weight, cut
/// across the strip, so it runs perpendicular to its siblings.
fn resolved<C>(strip: InternalNode<C>, target: Rectangle) -> InternalNode<C> {
    let direction = strip.direction();
    let cut = direction.transposed();
    let weight = strip.weight();

    let children = strip
        .into_children()
        .into_iter()
        .map(|child| match child {
            Node::Lazy(lazy) => {
                let share = lazy.weight() / weight;
                let subtree = squarify(lazy.into_lazy_content(), target.portion(share, cut));
                Node::Internal(subtree)
            }
            other => other,
        })
        .collect();

    InternalNode::new(children, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::total_weight;
    use Direction::{Column, Row};

    fn leaf(weight: f64) -> Node<f64> {
        Node::leaf(weight)
    }

    fn item(weight: f64) -> Nested<Node<f64>> {
        Nested::leaf(leaf(weight))
    }

    fn group(weights: &[f64]) -> Nested<Node<f64>> {
        Nested::group(weights.iter().copied().map(item).collect())
    }

    fn internal(children: Vec<Node<f64>>, direction: Direction) -> Node<f64> {
        InternalNode::new(children, direction).into()
    }

    fn root(children: Vec<Node<f64>>, direction: Direction) -> InternalNode<f64> {
        InternalNode::new(children, direction)
    }

    fn assert_weights_conserved(node: &Node<f64>) {
        if let Node::Internal(internal) = node {
            let sum: f64 = internal.children().iter().map(Node::weight).sum();
            assert!((sum - internal.weight()).abs() < 1e-9);
            internal.children().iter().for_each(assert_weights_conserved);
        }
    }

    #[test]
    fn empty_input_gives_empty_tree() {
        for rect in [Rectangle::new(200.0, 100.0), Rectangle::new(0.0, 0.0)] {
            let treemap = squarify::<f64>(vec![], rect);
            assert_eq!(treemap.weight(), 0.0);
            assert!(treemap.children().is_empty());
        }
    }

    #[test]
    fn single_item_in_wide_rectangle() {
        let treemap = squarify(vec![item(10.0)], Rectangle::new(200.0, 100.0));
        assert_eq!(treemap, root(vec![leaf(10.0)], Column));
    }

    #[test]
    fn single_item_in_tall_rectangle() {
        let treemap = squarify(vec![item(10.0)], Rectangle::new(100.0, 200.0));
        assert_eq!(treemap, root(vec![leaf(10.0)], Row));
    }

    #[test]
    fn wide_rectangle_is_arranged_in_a_row() {
        let treemap = squarify(vec![item(3.0), item(3.0)], Rectangle::new(200.0, 100.0));
        assert_eq!(treemap.direction(), Row);
    }

    #[test]
    fn tall_rectangle_is_arranged_in_a_column() {
        let treemap = squarify(vec![item(3.0), item(3.0)], Rectangle::new(100.0, 200.0));
        assert_eq!(treemap.direction(), Column);
    }

    #[test]
    fn reference_treemap() {
        let items = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0].map(item).to_vec();
        let treemap = squarify(items, Rectangle::new(600.0, 400.0));

        let expected = root(
            vec![
                internal(vec![leaf(6.0), leaf(6.0)], Column),
                internal(
                    vec![
                        internal(vec![leaf(4.0), leaf(3.0)], Row),
                        internal(
                            vec![
                                internal(vec![leaf(2.0)], Column),
                                internal(vec![leaf(2.0), leaf(1.0)], Row),
                            ],
                            Row,
                        ),
                    ],
                    Column,
                ),
            ],
            Row,
        );
        assert_eq!(treemap, expected);
    }

    #[test]
    fn equal_aspect_ratios_start_a_new_strip() {
        let items = vec![item(1.0), item(1.0), item(2.0)];
        let treemap = squarify(items, Rectangle::new(200.0, 100.0));

        let expected = root(
            vec![
                internal(vec![leaf(1.0)], Column),
                internal(vec![leaf(1.0), leaf(2.0)], Row),
            ],
            Row,
        );
        assert_eq!(treemap, expected);
    }

    #[test]
    fn nested_groups_in_tall_rectangle() {
        let items = vec![group(&[3.0, 3.0, 1.0]), group(&[5.0, 1.0]), item(2.0)];
        let treemap = squarify(items, Rectangle::new(200.0, 300.0));

        let expected = root(
            vec![
                internal(
                    vec![internal(
                        vec![
                            internal(vec![leaf(3.0)], Column),
                            internal(vec![leaf(3.0), leaf(1.0)], Column),
                        ],
                        Row,
                    )],
                    Row,
                ),
                internal(
                    vec![internal(vec![leaf(5.0), leaf(1.0)], Column), leaf(2.0)],
                    Row,
                ),
            ],
            Column,
        );
        assert_eq!(treemap, expected);
    }

    #[test]
    fn nested_groups_in_wide_rectangle() {
        let items = vec![group(&[3.0, 3.0, 1.0]), group(&[5.0, 1.0]), item(2.0)];
        let treemap = squarify(items, Rectangle::new(300.0, 200.0));

        let expected = root(
            vec![
                internal(
                    vec![internal(
                        vec![
                            internal(vec![leaf(3.0)], Row),
                            internal(vec![leaf(3.0), leaf(1.0)], Row),
                        ],
                        Column,
                    )],
                    Column,
                ),
                internal(
                    vec![internal(vec![leaf(5.0), leaf(1.0)], Row), leaf(2.0)],
                    Column,
                ),
            ],
            Row,
        );
        assert_eq!(treemap, expected);
    }

    #[test]
    fn single_nested_group() {
        let treemap = squarify(vec![group(&[2.0, 1.0])], Rectangle::new(200.0, 300.0));
        let expected = root(vec![internal(vec![leaf(2.0), leaf(1.0)], Column)], Row);
        assert_eq!(treemap, expected);
    }

    #[test]
    fn deeply_nested_input_is_fully_resolved() {
        let items = vec![
            item(10.0),
            item(6.0),
            Nested::group(vec![item(3.0), item(3.0), group(&[1.0, 1.0])]),
            item(2.0),
        ];
        let expected_weight = total_weight(&items);
        let treemap = squarify(items, Rectangle::new(200.0, 200.0));

        assert_eq!(treemap.children().len(), 2);
        assert_eq!(treemap.weight(), expected_weight);

        let node = Node::from(treemap);
        assert!(!node.contains_lazy());
        assert_weights_conserved(&node);
        assert_eq!(node.leaves().len(), 7);
    }

    #[test]
    fn long_flat_input_conserves_weight() {
        let items: Vec<_> = (1..=2000).rev().map(|w| item(w as f64)).collect();
        let expected = total_weight(&items);
        let treemap = Node::from(squarify(items, Rectangle::new(1920.0, 1080.0)));

        assert!((treemap.weight() - expected).abs() < 1e-6);
        assert_eq!(treemap.leaves().len(), 2000);
        assert_weights_conserved(&treemap);
    }

    #[test]
    fn continuing_a_started_strip() {
        let started = InternalNode::new(vec![leaf(6.0)], Column);
        let rest = [6.0, 4.0, 3.0, 2.0, 2.0, 1.0].map(item).to_vec();
        let continued = squarify_with(rest, Some(started), Rectangle::new(600.0, 400.0));

        let all = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0].map(item).to_vec();
        assert_eq!(continued, squarify(all, Rectangle::new(600.0, 400.0)));
    }
}
