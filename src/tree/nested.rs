use std::cmp::Ordering;

/// A value that is either a single element or an ordered group of nested values.
///
/// Groups may be empty at any level. All traversals recurse once per nesting
/// level, so stack usage grows with input depth, not with the number of leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Leaf(T),
    Group(Vec<Nested<T>>),
}

/// Build a [`Nested`] group literal: bracketed lists become sub-groups, anything
/// else a leaf.
///
/// Leaves must be single token trees; wrap longer expressions in parentheses.
///
/// ```
/// use squarify_rs::nested;
/// let values = nested![5.0, [4.0, 9.0], [0.0]];
/// assert_eq!(values.reduce(0.0, |sum, x| sum + x), 18.0);
/// ```
#[macro_export]
macro_rules! nested {
    ($($item:tt),* $(,)?) => {
        $crate::tree::nested::Nested::Group(vec![$($crate::__nested_item!($item)),*])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __nested_item {
    ([$($item:tt),* $(,)?]) => {
        $crate::tree::nested::Nested::Group(vec![$($crate::__nested_item!($item)),*])
    };
    ($leaf:expr) => {
        $crate::tree::nested::Nested::Leaf($leaf)
    };
}

impl<T> Nested<T> {
    pub fn leaf(value: T) -> Self {
        Nested::Leaf(value)
    }

    pub fn group(items: Vec<Nested<T>>) -> Self {
        Nested::Group(items)
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Nested::Group(_))
    }

    /// Same shape, every leaf replaced by `transform(leaf)`.
    pub fn map<U, F>(&self, mut transform: F) -> Nested<U>
    where
        F: FnMut(&T) -> U,
    {
        self.map_with(&mut transform)
    }

    fn map_with<U, F>(&self, transform: &mut F) -> Nested<U>
    where
        F: FnMut(&T) -> U,
    {
        match self {
            Nested::Leaf(value) => Nested::Leaf(transform(value)),
            Nested::Group(items) => {
                Nested::Group(items.iter().map(|item| item.map_with(transform)).collect())
            }
        }
    }

    /// Consuming variant of [`Nested::map`].
    pub fn into_map<U, F>(self, mut transform: F) -> Nested<U>
    where
        F: FnMut(T) -> U,
    {
        self.into_map_with(&mut transform)
    }

    fn into_map_with<U, F>(self, transform: &mut F) -> Nested<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Nested::Leaf(value) => Nested::Leaf(transform(value)),
            Nested::Group(items) => Nested::Group(
                items
                    .into_iter()
                    .map(|item| item.into_map_with(transform))
                    .collect(),
            ),
        }
    }

    /// Sort every group by its direct elements, then recurse into each element.
    ///
    /// The comparator sees whole elements, so it has to order a leaf against a
    /// group (callers usually compare aggregate weights via [`Nested::reduce`]).
    /// The sort is stable. A bare leaf comes back unchanged.
    pub fn sorted_by<F>(mut self, mut compare: F) -> Self
    where
        F: FnMut(&Nested<T>, &Nested<T>) -> Ordering,
    {
        self.sort_with(&mut compare);
        self
    }

    fn sort_with<F>(&mut self, compare: &mut F)
    where
        F: FnMut(&Nested<T>, &Nested<T>) -> Ordering,
    {
        if let Nested::Group(items) = self {
            items.sort_by(|a, b| compare(a, b));
            for item in items.iter_mut() {
                item.sort_with(compare);
            }
        }
    }

    /// Depth-first, left-to-right fold over every leaf.
    pub fn reduce<U, F>(&self, initial: U, mut combine: F) -> U
    where
        F: FnMut(U, &T) -> U,
    {
        self.reduce_with(initial, &mut combine)
    }

    fn reduce_with<U, F>(&self, initial: U, combine: &mut F) -> U
    where
        F: FnMut(U, &T) -> U,
    {
        match self {
            Nested::Leaf(value) => combine(initial, value),
            Nested::Group(items) => items
                .iter()
                .fold(initial, |acc, item| item.reduce_with(acc, combine)),
        }
    }
}

/// Fold a list of nested values as if it were one group.
pub fn reduce_all<T, U, F>(items: &[Nested<T>], initial: U, mut combine: F) -> U
where
    F: FnMut(U, &T) -> U,
{
    items
        .iter()
        .fold(initial, |acc, item| item.reduce_with(acc, &mut combine))
}
