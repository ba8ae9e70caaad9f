//! Change flags describing which pipeline stages a property update invalidates.

use bitflags::bitflags;

bitflags! {
    /// Accumulated property changes of a single frame node.
    ///
    /// Layout and paint properties each carry one of these. The tree merges
    /// both when a node is marked dirty and uses the predicates below to decide
    /// whether the node goes to the layout queue, the render queue, or neither.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PropertyChangeFlag: u32 {
        /// Full re-measure of the node and its ancestors up to a measure boundary.
        const MEASURE                 = 1;
        /// Re-position only, sizes stay valid.
        const LAYOUT                  = 1 << 1;
        /// Re-measure the node itself without touching its parent.
        const MEASURE_SELF            = 1 << 3;
        /// Re-measure the node and request a measure from its parent.
        const MEASURE_SELF_AND_PARENT = 1 << 4;
        /// A child asked this node to re-measure.
        const BY_CHILD_REQUEST        = 1 << 5;
        /// Repaint the node.
        const RENDER                  = 1 << 6;
        /// A child outside a render boundary asked this node to repaint.
        const RENDER_BY_CHILD_REQUEST = 1 << 7;
        /// Re-measure the node and force every child to re-measure too.
        const MEASURE_SELF_AND_CHILD  = 1 << 9;
    }
}

impl PropertyChangeFlag {
    const MEASURE_MASK: Self = Self::MEASURE
        .union(Self::MEASURE_SELF)
        .union(Self::MEASURE_SELF_AND_PARENT)
        .union(Self::BY_CHILD_REQUEST)
        .union(Self::MEASURE_SELF_AND_CHILD);

    /// Returns true if any measure-affecting flag is set.
    #[inline]
    #[must_use]
    pub const fn needs_measure(self) -> bool {
        self.intersects(Self::MEASURE_MASK)
    }

    /// Returns true if the node must be re-positioned.
    #[inline]
    #[must_use]
    pub const fn needs_layout(self) -> bool {
        self.contains(Self::LAYOUT)
    }

    /// Returns true if the node needs either a measure or a layout pass.
    #[inline]
    #[must_use]
    pub const fn needs_measure_or_layout(self) -> bool {
        self.needs_measure() || self.needs_layout()
    }

    /// Returns true if the node must be repainted.
    #[inline]
    #[must_use]
    pub const fn needs_render(self) -> bool {
        self.intersects(Self::RENDER.union(Self::RENDER_BY_CHILD_REQUEST))
    }

    /// Returns true if the change has to be propagated to the parent's measure.
    ///
    /// Child requests travel upwards until they reach a measure boundary.
    #[inline]
    #[must_use]
    pub const fn needs_parent_measure(self) -> bool {
        self.intersects(
            Self::MEASURE
                .union(Self::MEASURE_SELF_AND_PARENT)
                .union(Self::BY_CHILD_REQUEST),
        )
    }

    /// Returns true if every child must be measured again regardless of its own flags.
    #[inline]
    #[must_use]
    pub const fn forces_child_measure(self) -> bool {
        self.intersects(Self::MEASURE.union(Self::MEASURE_SELF_AND_CHILD))
    }

    /// Returns true if the flag only carries a request from a child.
    #[inline]
    #[must_use]
    pub fn is_child_request_only(self) -> bool {
        self == Self::BY_CHILD_REQUEST
    }
}
