//! Settled geometry of a frame node.

use crate::constraint::LayoutConstraint;
use crate::layout::{Point, Rect, Size};

/// Frame and content rectangles produced by measure and layout.
///
/// The frame offset is relative to the parent's frame, the content offset is
/// relative to the node's own frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryNode {
    frame: Rect,
    content: Option<Rect>,
    parent_layout_constraint: Option<LayoutConstraint>,
}

impl GeometryNode {
    /// Creates an empty geometry node.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame: Rect::new(Point::zero(), Size::zero()),
            content: None,
            parent_layout_constraint: None,
        }
    }

    /// Frame rectangle.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Frame size.
    #[must_use]
    pub const fn frame_size(&self) -> Size {
        self.frame.size()
    }

    /// Frame offset within the parent.
    #[must_use]
    pub const fn frame_offset(&self) -> Point {
        self.frame.origin()
    }

    /// Sets the frame size, keeping the offset.
    pub fn set_frame_size(&mut self, size: Size) {
        self.frame = Rect::new(self.frame.origin(), size);
    }

    /// Sets the frame offset, keeping the size.
    pub fn set_frame_offset(&mut self, offset: Point) {
        self.frame = Rect::new(offset, self.frame.size());
    }

    /// Content rectangle, once measured.
    #[must_use]
    pub const fn content(&self) -> Option<Rect> {
        self.content
    }

    /// Content size, or zero before the first measure.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content.map_or_else(Size::zero, |content| content.size())
    }

    /// Content offset, or zero before the first measure.
    #[must_use]
    pub fn content_offset(&self) -> Point {
        self.content.map_or_else(Point::zero, |content| content.origin())
    }

    /// Sets the content size, keeping the offset.
    pub fn set_content_size(&mut self, size: Size) {
        self.content = Some(Rect::new(self.content_offset(), size));
    }

    /// Sets the content offset, keeping the size.
    pub fn set_content_offset(&mut self, offset: Point) {
        self.content = Some(Rect::new(offset, self.content_size()));
    }

    /// Constraint the parent imposed during the last measure.
    #[must_use]
    pub const fn parent_layout_constraint(&self) -> Option<&LayoutConstraint> {
        self.parent_layout_constraint.as_ref()
    }

    /// Records the constraint the parent imposed.
    pub fn set_parent_layout_constraint(&mut self, constraint: LayoutConstraint) {
        self.parent_layout_constraint = Some(constraint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_and_content_setters_are_independent() {
        let mut geometry = GeometryNode::new();
        geometry.set_frame_offset(Point::new(5.0, 6.0));
        geometry.set_frame_size(Size::new(50.0, 60.0));
        assert_eq!(geometry.frame(), Rect::new(Point::new(5.0, 6.0), Size::new(50.0, 60.0)));

        assert_eq!(geometry.content_size(), Size::zero());
        geometry.set_content_size(Size::new(40.0, 40.0));
        geometry.set_content_offset(Point::new(2.0, 3.0));
        assert_eq!(
            geometry.content(),
            Some(Rect::new(Point::new(2.0, 3.0), Size::new(40.0, 40.0)))
        );
    }
}
