//! Layout constraints passed from a parent to its children during measure.

use crate::layout::{EdgeInsets, OptionalSize, Size};

/// Bounds a node must respect when choosing its frame size.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LayoutConstraint {
    /// Smallest size the node may take.
    pub min_size: Size,
    /// Largest size the node may take.
    pub max_size: Size,
    /// Reference size used to resolve percentage lengths.
    pub percent_reference: Size,
    /// Size the node asked for itself, after resolution against the parent.
    pub self_ideal_size: OptionalSize,
    /// Ideal size of the parent, when it has one.
    pub parent_ideal_size: OptionalSize,
}

impl LayoutConstraint {
    /// Constraint applied to a root node of the given size.
    ///
    /// The ideal size is fixed to `size`, so the root fills the surface.
    #[must_use]
    pub fn root(size: Size) -> Self {
        Self {
            min_size: Size::zero(),
            max_size: size,
            percent_reference: size,
            self_ideal_size: OptionalSize::new(size.width, size.height),
            parent_ideal_size: OptionalSize::new(size.width, size.height),
        }
    }

    /// Clamps `size` into `[min_size, max_size]`.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        let max = self.max_size.max(self.min_size);
        Size::new(
            size.width.clamp(self.min_size.width, max.width),
            size.height.clamp(self.min_size.height, max.height),
        )
    }

    /// Applies a user-requested ideal size to this constraint.
    ///
    /// Requested dimensions are clamped to the current bounds and then become
    /// both minimum and maximum of that dimension.
    pub fn apply_ideal_size(&mut self, ideal: OptionalSize) {
        if let Some(width) = ideal.width {
            let width = width.clamp(self.min_size.width, self.max_size.width.max(self.min_size.width));
            self.min_size.width = width;
            self.max_size.width = width;
            self.self_ideal_size.width = Some(width);
        }
        if let Some(height) = ideal.height {
            let height =
                height.clamp(self.min_size.height, self.max_size.height.max(self.min_size.height));
            self.min_size.height = height;
            self.max_size.height = height;
            self.self_ideal_size.height = Some(height);
        }
    }

    /// Shrinks every bound by `padding`, producing the content constraint.
    #[must_use]
    pub fn deflate(&self, padding: EdgeInsets) -> Self {
        let shrink = |value: Option<f32>, by: f32| value.map(|v| (v - by).max(0.0));
        Self {
            min_size: padding.deflate(self.min_size),
            max_size: padding.deflate(self.max_size),
            percent_reference: padding.deflate(self.percent_reference),
            self_ideal_size: OptionalSize {
                width: shrink(self.self_ideal_size.width, padding.horizontal()),
                height: shrink(self.self_ideal_size.height, padding.vertical()),
            },
            parent_ideal_size: self.parent_ideal_size,
        }
    }

    /// Constraint handed to children measured inside this (content) constraint.
    ///
    /// Children may be as small as they like but no larger than the content box.
    #[must_use]
    pub fn child_constraint(&self) -> Self {
        Self {
            min_size: Size::zero(),
            max_size: self.max_size,
            percent_reference: self.max_size,
            self_ideal_size: OptionalSize::UNSPECIFIED,
            parent_ideal_size: self.self_ideal_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_constraint_spans_surface() {
        let root = LayoutConstraint::root(Size::new(720.0, 1280.0));
        assert_eq!(root.max_size, Size::new(720.0, 1280.0));
        assert_eq!(root.percent_reference, root.max_size);
        assert_eq!(root.self_ideal_size.to_size(), Some(root.max_size));
    }

    #[test]
    fn constrain_clamps_both_ends() {
        let constraint = LayoutConstraint {
            min_size: Size::new(10.0, 10.0),
            max_size: Size::new(100.0, 50.0),
            ..LayoutConstraint::default()
        };
        assert_eq!(constraint.constrain(Size::new(5.0, 80.0)), Size::new(10.0, 50.0));
        assert_eq!(constraint.constrain(Size::new(40.0, 20.0)), Size::new(40.0, 20.0));
    }

    #[test]
    fn ideal_size_fixes_dimension() {
        let mut constraint = LayoutConstraint::root(Size::new(300.0, 300.0));
        constraint.self_ideal_size = OptionalSize::UNSPECIFIED;
        constraint.apply_ideal_size(OptionalSize::new(500.0, None));

        assert_eq!(constraint.min_size.width, 300.0);
        assert_eq!(constraint.max_size.width, 300.0);
        assert_eq!(constraint.max_size.height, 300.0);
        assert_eq!(constraint.self_ideal_size, OptionalSize::new(300.0, None));
    }

    #[test]
    fn deflate_and_child_constraint() {
        let constraint = LayoutConstraint::root(Size::new(200.0, 100.0));
        let content = constraint.deflate(EdgeInsets::all(10.0));
        assert_eq!(content.max_size, Size::new(180.0, 80.0));
        assert_eq!(content.self_ideal_size, OptionalSize::new(180.0, 80.0));

        let child = content.child_constraint();
        assert_eq!(child.min_size, Size::zero());
        assert_eq!(child.max_size, Size::new(180.0, 80.0));
        assert_eq!(child.parent_ideal_size, OptionalSize::new(180.0, 80.0));
        assert!(!child.self_ideal_size.is_fixed());
    }
}
