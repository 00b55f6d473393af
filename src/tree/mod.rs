pub mod nested;
pub mod node;

/// Content that can be placed in a treemap.
///
/// The layout only ever reads the weight; everything else about the content
/// belongs to whoever draws it.
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for f64 {
    fn weight(&self) -> f64 {
        *self
    }
}
