//! Measure and layout of wrapper trees.

mod box_layout;
mod wrapper;

use core::any::Any;
use core::fmt::Debug;

pub use box_layout::BoxLayoutAlgorithm;
pub use wrapper::LayoutWrapper;

/// Sizes and positions a node and its children.
///
/// Algorithms are created fresh by the node's pattern for every layout task
/// and stay attached to the wrapper until it has been mounted, so a swap hook
/// can read values the algorithm computed.
pub trait LayoutAlgorithm: Debug + Any {
    /// Measures the children and sets the wrapper's frame and content size.
    fn measure(&mut self, wrapper: &mut LayoutWrapper);

    /// Positions the children inside the wrapper's content box and lays them out.
    fn layout(&mut self, wrapper: &mut LayoutWrapper);
}
