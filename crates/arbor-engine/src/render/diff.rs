/// A single per-path difference between two render trees.
///
/// "First" is the tree the comparison is called on, "second" the one passed
/// in — so when diffing new against old, `SecondMissing` means an addition
/// and `FirstMissing` a removal. Paths present in both emit one difference
/// per changed attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderDifference {
    FirstMissing,
    SecondMissing,
    Pos,
    Bounds,
    Color,
    Text,
}
