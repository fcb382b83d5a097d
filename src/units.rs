#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

/// Viewport extents in continuous (physics/rendering) coordinates.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Width(pub f64);
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Height(pub f64);
