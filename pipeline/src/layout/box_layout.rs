use tideui_core::Size;

use super::{LayoutAlgorithm, LayoutWrapper};

/// Stacks every child at the top-left corner of the content box.
///
/// Without an ideal size the node wraps its largest active child.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxLayoutAlgorithm;

impl LayoutAlgorithm for BoxLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper) {
        let child_constraint = wrapper.content_constraint().child_constraint();
        let mut largest = Size::zero();
        for child in wrapper.children_mut() {
            child.measure(child_constraint);
            if child.is_active() {
                largest = largest.max(child.geometry().frame_size());
            }
        }
        let frame = wrapper.resolve_frame_size(largest);
        wrapper.set_measured_size(frame);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper) {
        let origin = wrapper.geometry().content_offset();
        for child in wrapper.children_mut() {
            if !child.is_active() {
                continue;
            }
            child.geometry_mut().set_frame_offset(origin);
            child.layout();
        }
    }
}
