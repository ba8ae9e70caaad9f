//! Slider: a track with a selected portion and a draggable block.
//!
//! The layout algorithm decides how thick the track and how large the block
//! can be for the space it got. The pattern reads those values back when the
//! layout is swapped in and derives the usable track length from them, so
//! painting never has to re-run any sizing logic.

use tideui_core::{Axis, Color, PaintProperty, PaintValue, Point, Rect, Size};
use tideui_pipeline::{
    DirtySwapConfig, DrawCommand, LayoutAlgorithm, LayoutWrapper, NodePaintMethod, PaintWrapper,
    Pattern, PatternContext, SceneBuilder,
};
use tracing::trace;

/// Paint property key of the current value.
pub const VALUE: &str = "value";
/// Paint property key of the lower bound.
pub const MIN: &str = "min";
/// Paint property key of the upper bound.
pub const MAX: &str = "max";
/// Paint property key of the selected track color.
pub const SELECTED_COLOR: &str = "selected_color";
/// Paint property key of the track color.
pub const TRACK_COLOR: &str = "track_color";
/// Paint property key of the block color.
pub const BLOCK_COLOR: &str = "block_color";

const DEFAULT_TRACK_THICKNESS: f32 = 4.0;
const DEFAULT_BLOCK_DIAMETER: f32 = 16.0;
const HOT_BLOCK_SHADOW_WIDTH: f32 = 4.0;

/// A value picker over a continuous range.
#[derive(Debug, Clone)]
pub struct SliderPattern {
    axis: Axis,
    preferred_track_thickness: f32,
    preferred_block_diameter: f32,
    track_thickness: f32,
    block_diameter: f32,
    border_blank: f32,
    slider_length: f32,
}

impl SliderPattern {
    /// Creates a slider along `axis` with the default track and block sizes.
    #[must_use]
    pub const fn new(axis: Axis) -> Self {
        Self {
            axis,
            preferred_track_thickness: DEFAULT_TRACK_THICKNESS,
            preferred_block_diameter: DEFAULT_BLOCK_DIAMETER,
            track_thickness: 0.0,
            block_diameter: 0.0,
            border_blank: 0.0,
            slider_length: 0.0,
        }
    }

    /// Overrides the preferred track thickness and block diameter.
    #[must_use]
    pub const fn with_sizes(mut self, track_thickness: f32, block_diameter: f32) -> Self {
        self.preferred_track_thickness = track_thickness;
        self.preferred_block_diameter = block_diameter;
        self
    }

    /// Direction of the track.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Track thickness chosen by the last measure.
    #[must_use]
    pub const fn track_thickness(&self) -> f32 {
        self.track_thickness
    }

    /// Block diameter chosen by the last measure.
    #[must_use]
    pub const fn block_diameter(&self) -> f32 {
        self.block_diameter
    }

    /// Distance between the content edge and the start of the track.
    #[must_use]
    pub const fn border_blank(&self) -> f32 {
        self.border_blank
    }

    /// Usable length of the track.
    #[must_use]
    pub const fn slider_length(&self) -> f32 {
        self.slider_length
    }
}

impl Default for SliderPattern {
    fn default() -> Self {
        Self::new(Axis::Horizontal)
    }
}

impl Pattern for SliderPattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(SliderLayoutAlgorithm {
            axis: self.axis,
            track_thickness: self.preferred_track_thickness,
            block_diameter: self.preferred_block_diameter,
        })
    }

    fn create_paint_property(&self) -> PaintProperty {
        PaintProperty::new()
            .with(VALUE, PaintValue::Float(0.0))
            .with(MIN, PaintValue::Float(0.0))
            .with(MAX, PaintValue::Float(100.0))
            .with(SELECTED_COLOR, PaintValue::Color(Color::BLUE))
            .with(TRACK_COLOR, PaintValue::Color(Color::LIGHT_GRAY))
            .with(BLOCK_COLOR, PaintValue::Color(Color::WHITE))
    }

    fn create_node_paint_method(&self) -> Option<Box<dyn NodePaintMethod>> {
        Some(Box::new(SliderPaintMethod {
            axis: self.axis,
            track_thickness: self.track_thickness,
            block_diameter: self.block_diameter,
            border_blank: self.border_blank,
            slider_length: self.slider_length,
        }))
    }

    fn on_dirty_layout_wrapper_swap(
        &mut self,
        dirty: &LayoutWrapper,
        config: DirtySwapConfig,
        _ctx: &mut PatternContext<'_>,
    ) -> bool {
        if config.skip_measure {
            return false;
        }
        let Some(algorithm) = dirty.layout_algorithm_as::<SliderLayoutAlgorithm>() else {
            return false;
        };
        self.track_thickness = algorithm.track_thickness();
        self.block_diameter = algorithm.block_diameter();

        let length = self.axis.main(dirty.geometry().content_size());
        let border_blank = self
            .track_thickness
            .max(self.block_diameter + HOT_BLOCK_SHADOW_WIDTH / 2.0);
        self.slider_length = if length >= border_blank {
            length - border_blank
        } else {
            1.0
        };
        self.border_blank = (length - self.slider_length) / 2.0;
        trace!(
            length,
            slider_length = self.slider_length,
            border_blank = self.border_blank,
            "slider track"
        );
        true
    }
}

/// Fills the main axis and sizes the cross axis to the block.
///
/// The block shrinks to the cross extent of the content box when that is
/// smaller than the preferred diameter, and the track is never thicker than
/// the block.
#[derive(Debug, Clone, Copy)]
pub struct SliderLayoutAlgorithm {
    axis: Axis,
    track_thickness: f32,
    block_diameter: f32,
}

impl SliderLayoutAlgorithm {
    /// Track thickness decided by measure.
    #[must_use]
    pub const fn track_thickness(&self) -> f32 {
        self.track_thickness
    }

    /// Block diameter decided by measure.
    #[must_use]
    pub const fn block_diameter(&self) -> f32 {
        self.block_diameter
    }
}

impl LayoutAlgorithm for SliderLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper) {
        let available = wrapper.content_constraint().max_size;
        let cross = self.block_diameter.max(self.track_thickness);
        let frame = wrapper.resolve_frame_size(self.axis.size(self.axis.main(available), cross));
        wrapper.set_measured_size(frame);

        let content_cross = self.axis.cross(wrapper.geometry().content_size());
        self.block_diameter = self.block_diameter.min(content_cross);
        self.track_thickness = self.track_thickness.min(self.block_diameter);
    }

    fn layout(&mut self, _wrapper: &mut LayoutWrapper) {}
}

#[derive(Debug)]
struct SliderPaintMethod {
    axis: Axis,
    track_thickness: f32,
    block_diameter: f32,
    border_blank: f32,
    slider_length: f32,
}

impl SliderPaintMethod {
    fn ratio(property: &PaintProperty) -> f32 {
        let value = property.float(VALUE).unwrap_or(0.0);
        let min = property.float(MIN).unwrap_or(0.0);
        let max = property.float(MAX).unwrap_or(100.0);
        if max <= min {
            return 0.0;
        }
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }

    fn track_rect(&self, content: Rect, length: f32) -> Rect {
        let center = self.axis.cross(content.size()) / 2.0;
        let origin = self
            .axis
            .point(self.border_blank, center - self.track_thickness / 2.0);
        Rect::new(origin, self.axis.size(length, self.track_thickness)).translate(content.origin())
    }
}

impl NodePaintMethod for SliderPaintMethod {
    fn paint_content(&self, wrapper: &PaintWrapper, builder: &mut SceneBuilder) {
        let property = wrapper.paint_property();
        let content = wrapper.content_rect();
        let selected = self.slider_length * Self::ratio(property);

        builder.push(DrawCommand::SolidRect {
            rect: self.track_rect(content, self.slider_length),
            color: property.color(TRACK_COLOR).unwrap_or(Color::LIGHT_GRAY),
        });
        if selected > 0.0 {
            builder.push(DrawCommand::SolidRect {
                rect: self.track_rect(content, selected),
                color: property.color(SELECTED_COLOR).unwrap_or(Color::BLUE),
            });
        }
        let center = self.axis.point(
            self.border_blank + selected,
            self.axis.cross(content.size()) / 2.0,
        );
        builder.push(DrawCommand::Circle {
            center: Point::new(content.x() + center.x, content.y() + center.y),
            radius: self.block_diameter / 2.0,
            color: property.color(BLOCK_COLOR).unwrap_or(Color::WHITE),
        });
    }
}
