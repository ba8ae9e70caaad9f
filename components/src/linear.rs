//! Row and column containers.

use tideui_core::{Axis, Point, Size};
use tideui_pipeline::{LayoutAlgorithm, LayoutWrapper, Pattern};

/// Container placing its children one after another along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearPattern {
    axis: Axis,
    space: f32,
}

impl LinearPattern {
    /// Creates a container flowing along `axis` with `space` between children.
    #[must_use]
    pub const fn new(axis: Axis, space: f32) -> Self {
        Self { axis, space }
    }

    /// Left-to-right container.
    #[must_use]
    pub const fn row(space: f32) -> Self {
        Self::new(Axis::Horizontal, space)
    }

    /// Top-to-bottom container.
    #[must_use]
    pub const fn column(space: f32) -> Self {
        Self::new(Axis::Vertical, space)
    }

    /// Direction children flow in.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Gap between two adjacent children.
    #[must_use]
    pub const fn space(&self) -> f32 {
        self.space
    }
}

impl Pattern for LinearPattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(LinearLayoutAlgorithm {
            axis: self.axis,
            space: self.space,
        })
    }
}

/// Measures children along the main axis and stacks them with a fixed gap.
///
/// Without an ideal size the container wraps its children: the main extent
/// is the sum of the active children plus the gaps, the cross extent is the
/// largest child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearLayoutAlgorithm {
    axis: Axis,
    space: f32,
}

#[allow(clippy::cast_precision_loss)]
impl LayoutAlgorithm for LinearLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper) {
        let child_constraint = wrapper.content_constraint().child_constraint();
        let mut main = 0.0_f32;
        let mut cross = 0.0_f32;
        let mut active = 0usize;
        for child in wrapper.children_mut() {
            child.measure(child_constraint);
            if !child.is_active() {
                continue;
            }
            let size = child.geometry().frame_size();
            main += self.axis.main(size);
            cross = cross.max(self.axis.cross(size));
            active += 1;
        }
        main += self.space * active.saturating_sub(1) as f32;
        let frame = wrapper.resolve_frame_size(self.axis.size(main, cross));
        wrapper.set_measured_size(frame);
    }

    fn layout(&mut self, wrapper: &mut LayoutWrapper) {
        let origin = wrapper.geometry().content_offset();
        let mut position = 0.0_f32;
        for child in wrapper.children_mut() {
            if !child.is_active() {
                continue;
            }
            let step = self.axis.point(position, 0.0);
            child
                .geometry_mut()
                .set_frame_offset(Point::new(origin.x + step.x, origin.y + step.y));
            child.layout();
            position += self.axis.main(child.geometry().frame_size()) + self.space;
        }
    }
}

#[cfg(test)]
mod tests {
    use tideui_core::{EdgeInsets, OptionalSize, Visibility};
    use tideui_pipeline::{NodeId, PipelineConfig, PipelineContext};

    use super::*;

    fn pipeline() -> PipelineContext {
        PipelineContext::new(PipelineConfig {
            root_width: 200.0,
            root_height: 100.0,
            ..PipelineConfig::default()
        })
    }

    fn fixed(ctx: &mut PipelineContext, parent: NodeId, width: f32, height: f32) -> NodeId {
        let id = ctx.create_node("fixed", LinearPattern::default());
        ctx.update_layout_property(id, |property| {
            property.set_ideal_size(OptionalSize::new(width, height));
        });
        ctx.mount_to_parent(parent, id).unwrap();
        id
    }

    fn frame(ctx: &PipelineContext, id: NodeId) -> (Point, Size) {
        let geometry = ctx.node(id).unwrap().geometry();
        (geometry.frame_offset(), geometry.frame_size())
    }

    #[test]
    fn row_places_children_with_spacing() {
        let mut ctx = pipeline();
        let row = ctx.create_node("row", LinearPattern::row(10.0));
        ctx.mount_to_parent(ctx.root(), row).unwrap();
        let first = fixed(&mut ctx, row, 30.0, 20.0);
        let second = fixed(&mut ctx, row, 40.0, 50.0);
        ctx.flush_pipeline_immediately();

        assert_eq!(frame(&ctx, row), (Point::zero(), Size::new(80.0, 50.0)));
        assert_eq!(frame(&ctx, first), (Point::zero(), Size::new(30.0, 20.0)));
        assert_eq!(frame(&ctx, second), (Point::new(40.0, 0.0), Size::new(40.0, 50.0)));
    }

    #[test]
    fn column_respects_padding() {
        let mut ctx = pipeline();
        let column = ctx.create_node("column", LinearPattern::column(5.0));
        ctx.update_layout_property(column, |property| {
            property.set_padding(EdgeInsets::new(2.0, 0.0, 0.0, 4.0));
        });
        ctx.mount_to_parent(ctx.root(), column).unwrap();
        let first = fixed(&mut ctx, column, 30.0, 20.0);
        let second = fixed(&mut ctx, column, 40.0, 10.0);
        ctx.flush_pipeline_immediately();

        assert_eq!(frame(&ctx, column).1, Size::new(44.0, 37.0));
        assert_eq!(frame(&ctx, first).0, Point::new(4.0, 2.0));
        assert_eq!(frame(&ctx, second).0, Point::new(4.0, 27.0));
    }

    #[test]
    fn gone_child_takes_no_space() {
        let mut ctx = pipeline();
        let row = ctx.create_node("row", LinearPattern::row(10.0));
        ctx.mount_to_parent(ctx.root(), row).unwrap();
        fixed(&mut ctx, row, 30.0, 20.0);
        let hidden = fixed(&mut ctx, row, 40.0, 50.0);
        let last = fixed(&mut ctx, row, 10.0, 10.0);
        ctx.flush_pipeline_immediately();
        assert_eq!(frame(&ctx, last).0, Point::new(90.0, 0.0));

        ctx.update_layout_property(hidden, |property| {
            property.set_visibility(Visibility::Gone);
        });
        ctx.flush_pipeline_immediately();

        assert!(!ctx.node(hidden).unwrap().is_active());
        assert_eq!(frame(&ctx, row).1, Size::new(50.0, 20.0));
        assert_eq!(frame(&ctx, last).0, Point::new(40.0, 0.0));
    }

    #[test]
    fn growing_child_relayouts_siblings() {
        let mut ctx = pipeline();
        let row = ctx.create_node("row", LinearPattern::row(0.0));
        ctx.mount_to_parent(ctx.root(), row).unwrap();
        let first = fixed(&mut ctx, row, 30.0, 20.0);
        let second = fixed(&mut ctx, row, 40.0, 20.0);
        ctx.flush_pipeline_immediately();

        ctx.update_layout_property(first, |property| {
            property.set_ideal_size(OptionalSize::new(60.0, 20.0));
        });
        ctx.flush_pipeline_immediately();

        assert_eq!(frame(&ctx, row).1, Size::new(100.0, 20.0));
        assert_eq!(frame(&ctx, second).0, Point::new(60.0, 0.0));
    }

    #[test]
    fn row_with_more_children_than_u16_counts() {
        let mut ctx = pipeline();
        let row = ctx.create_node("row", LinearPattern::row(1.0));
        ctx.mount_to_parent(ctx.root(), row).unwrap();
        let mut last = row;
        for _ in 0..=usize::from(u16::MAX) {
            last = ctx.create_node("empty", LinearPattern::default());
            ctx.mount_to_parent(row, last).unwrap();
        }
        ctx.flush_pipeline_immediately();

        assert_eq!(ctx.tree().children(row).len(), 65_536);
        assert_eq!(frame(&ctx, last).0, Point::new(65_535.0, 0.0));
    }
}
