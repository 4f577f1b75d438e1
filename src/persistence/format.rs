//! Text format constants for spline files.

/// Lines starting with this character are ignored.
pub const COMMENT_MARKER: char = '#';

/// Spline count, control point count, sample time.
pub const HEADER_LINES: usize = 3;

/// Each control point is a position line followed by a rotation line.
pub const LINES_PER_POINT: usize = 2;

pub const COMPONENT_SEPARATOR: char = ',';
pub const COMPONENTS_PER_LINE: usize = 3;
