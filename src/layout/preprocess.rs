use std::cmp::Ordering;

use crate::error::{LayoutError, Result};
use crate::tree::nested::Nested;
use crate::tree::node::{weight_sum, Node};
use crate::tree::Weighted;

/// Turn raw input into the item list [`squarify`](super::squarify::squarify) expects.
///
/// Every leaf is wrapped in a leaf node, a bare leaf becomes a one-item list,
/// and every level is sorted by decreasing aggregate weight (groups weigh
/// the sum of their leaves). Squarify relies on that order for good ratios.
pub fn pre_process<C: Weighted>(input: Nested<C>) -> Vec<Nested<Node<C>>> {
    let items = match input.into_map(Node::leaf) {
        Nested::Group(items) => items,
        single => vec![single],
    };

    match Nested::Group(items).sorted_by(by_weight_descending) {
        Nested::Group(items) => items,
        single => vec![single],
    }
}

/// [`pre_process`] after checking that every weight is finite and non-negative.
///
/// Errors name the offending leaf by its depth-first index.
pub fn try_pre_process<C: Weighted>(input: Nested<C>) -> Result<Vec<Nested<Node<C>>>> {
    validate_weights(&input)?;
    Ok(pre_process(input))
}

pub fn validate_weights<C: Weighted>(input: &Nested<C>) -> Result<()> {
    input.reduce(Ok(0usize), |index, content| {
        let index = index?;
        let weight = content.weight();
        if !weight.is_finite() {
            return Err(LayoutError::NonFiniteWeight { index, weight });
        }
        if weight < 0.0 {
            return Err(LayoutError::NegativeWeight { index, weight });
        }
        Ok(index + 1)
    })?;
    Ok(())
}

fn by_weight_descending<C>(a: &Nested<Node<C>>, b: &Nested<Node<C>>) -> Ordering {
    let weight_of = |item: &Nested<Node<C>>| item.reduce(0.0, weight_sum);
    weight_of(b)
        .partial_cmp(&weight_of(a))
        .unwrap_or(Ordering::Equal)
}
