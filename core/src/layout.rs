//! Geometry types shared by the layout and paint passes.
//!
//! All values are logical pixels. Offsets stored on a node are relative to
//! the node's parent frame; content offsets are relative to the node's own
//! frame.

// ============================================================================
// Axis
// ============================================================================

/// Main axis of a linear container or a slider track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Axis {
    /// Children flow left to right.
    #[default]
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

impl Axis {
    /// Returns the extent of `size` along this axis.
    #[must_use]
    pub const fn main(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Returns the extent of `size` across this axis.
    #[must_use]
    pub const fn cross(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Builds a size from main and cross extents.
    #[must_use]
    pub const fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    /// Builds a point from main and cross coordinates.
    #[must_use]
    pub const fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Self::Horizontal => Point::new(main, cross),
            Self::Vertical => Point::new(cross, main),
        }
    }
}

// ============================================================================
// Geometry Types
// ============================================================================

/// Axis-aligned rectangle relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// Creates a new [`Rect`] with the provided `origin` and `size`.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Creates a rectangle from origin (0, 0) with the given size.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::zero(),
            size,
        }
    }

    /// Returns the rectangle's origin (top-left corner).
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the rectangle's size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns the rectangle's x-coordinate (left edge).
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.origin.x
    }

    /// Returns the rectangle's y-coordinate (top edge).
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.origin.y
    }

    /// Returns the rectangle's width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.size.width
    }

    /// Returns the rectangle's height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.size.height
    }

    /// Returns the maximum x-coordinate (right edge).
    #[must_use]
    pub const fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Returns the maximum y-coordinate (bottom edge).
    #[must_use]
    pub const fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Returns the center point of the rectangle.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns this rectangle moved by `offset`.
    #[must_use]
    pub const fn translate(&self, offset: Point) -> Self {
        Self::new(
            Point::new(self.origin.x + offset.x, self.origin.y + offset.y),
            self.size,
        )
    }

    /// Inset the rectangle by the given edge insets.
    #[must_use]
    pub fn inset(&self, insets: EdgeInsets) -> Self {
        Self::new(
            Point::new(self.origin.x + insets.left, self.origin.y + insets.top),
            insets.deflate(self.size),
        )
    }
}

// ============================================================================
// Size
// ============================================================================

/// Two-dimensional size expressed in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Size {
    /// The width in logical pixels.
    pub width: f32,
    /// The height in logical pixels.
    pub height: f32,
}

impl Size {
    /// Constructs a [`Size`] with the given `width` and `height`.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Creates a [`Size`] with zero width and height.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Returns true if both dimensions are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Returns true if both dimensions are strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Component-wise maximum.
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        Self::new(
            self.width.max(other.width),
            self.height.max(other.height),
        )
    }

    /// Component-wise minimum.
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        Self::new(
            self.width.min(other.width),
            self.height.min(other.height),
        )
    }

    /// Returns the size scaled uniformly by `factor`.
    #[must_use]
    pub const fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

// ============================================================================
// Point
// ============================================================================

/// Coordinate relative to a parent frame's origin.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    /// The x-coordinate in logical pixels.
    pub x: f32,
    /// The y-coordinate in logical pixels.
    pub y: f32,
}

impl Point {
    /// Constructs a [`Point`] at the given `x` and `y`.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a [`Point`] at the origin (0, 0).
    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

// ============================================================================
// OptionalSize
// ============================================================================

/// A size where each dimension may be left unspecified.
///
/// Used for user-requested ("ideal") sizes: a `None` dimension is resolved by
/// the node's layout algorithm from its content.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct OptionalSize {
    /// Requested width, if any.
    pub width: Option<f32>,
    /// Requested height, if any.
    pub height: Option<f32>,
}

impl OptionalSize {
    /// Creates an [`OptionalSize`] from optional width and height.
    #[must_use]
    pub fn new(width: impl Into<Option<f32>>, height: impl Into<Option<f32>>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Neither dimension is specified.
    pub const UNSPECIFIED: Self = Self {
        width: None,
        height: None,
    };

    /// Returns true when both dimensions are specified.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// Returns the fixed size when both dimensions are specified.
    #[must_use]
    pub fn to_size(&self) -> Option<Size> {
        Some(Size::new(self.width?, self.height?))
    }

    /// Fills unspecified dimensions from `fallback`.
    #[must_use]
    pub fn unwrap_or(&self, fallback: Size) -> Size {
        Size::new(
            self.width.unwrap_or(fallback.width),
            self.height.unwrap_or(fallback.height),
        )
    }
}

// ============================================================================
// EdgeInsets
// ============================================================================

/// Padding applied between a node's frame and its content.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct EdgeInsets {
    /// Top inset.
    pub top: f32,
    /// Right inset.
    pub right: f32,
    /// Bottom inset.
    pub bottom: f32,
    /// Left inset.
    pub left: f32,
}

impl EdgeInsets {
    /// Creates insets with explicit values for each edge.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates equal insets on every edge.
    #[must_use]
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of the left and right insets.
    #[must_use]
    pub const fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    #[must_use]
    pub const fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Offset of the content box inside the frame.
    #[must_use]
    pub const fn offset(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Shrinks `size` by the insets, never below zero.
    #[must_use]
    pub fn deflate(&self, size: Size) -> Size {
        Size::new(
            (size.width - self.horizontal()).max(0.0),
            (size.height - self.vertical()).max(0.0),
        )
    }

    /// Grows `size` by the insets.
    #[must_use]
    pub fn inflate(&self, size: Size) -> Size {
        Size::new(
            size.width + self.horizontal(),
            size.height + self.vertical(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
