//! Square QR code view.

use tideui_core::{Color, PaintProperty, PaintValue, Point, Rect, Size};
use tideui_pipeline::{
    DirtySwapConfig, DrawCommand, LayoutAlgorithm, LayoutWrapper, NodePaintMethod, PaintWrapper,
    Pattern, PatternContext, SceneBuilder,
};

/// Paint property key of the encoded payload.
pub const VALUE: &str = "value";
/// Paint property key of the module color.
pub const COLOR: &str = "color";
/// Paint property key of the background color.
pub const BACKGROUND_COLOR: &str = "background_color";

/// Draws its payload as a QR code in the largest square fitting the content
/// box.
#[derive(Debug, Clone, Default)]
pub struct QrCodePattern {
    value: String,
    qr_code_size: f32,
}

impl QrCodePattern {
    /// Creates a QR code view encoding `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            qr_code_size: 0.0,
        }
    }

    /// Side length of the square computed by the last layout.
    #[must_use]
    pub const fn qr_code_size(&self) -> f32 {
        self.qr_code_size
    }
}

impl Pattern for QrCodePattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(QrCodeLayoutAlgorithm)
    }

    fn create_paint_property(&self) -> PaintProperty {
        PaintProperty::new()
            .with(VALUE, PaintValue::Text(self.value.clone()))
            .with(COLOR, PaintValue::Color(Color::BLACK))
            .with(BACKGROUND_COLOR, PaintValue::Color(Color::WHITE))
    }

    fn create_node_paint_method(&self) -> Option<Box<dyn NodePaintMethod>> {
        Some(Box::new(QrCodePaintMethod {
            size: self.qr_code_size,
        }))
    }

    fn on_dirty_layout_wrapper_swap(
        &mut self,
        dirty: &LayoutWrapper,
        config: DirtySwapConfig,
        _ctx: &mut PatternContext<'_>,
    ) -> bool {
        if config.skipped_all() {
            return false;
        }
        let content = dirty.geometry().content_size();
        self.qr_code_size = content.width.min(content.height);
        true
    }
}

/// Takes the largest square the constraint allows unless an ideal size is set.
#[derive(Debug, Clone, Copy)]
struct QrCodeLayoutAlgorithm;

impl LayoutAlgorithm for QrCodeLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper) {
        let available = wrapper.content_constraint().max_size;
        let side = available.width.min(available.height);
        let frame = wrapper.resolve_frame_size(Size::new(side, side));
        wrapper.set_measured_size(frame);
    }

    fn layout(&mut self, _wrapper: &mut LayoutWrapper) {}
}

#[derive(Debug)]
struct QrCodePaintMethod {
    size: f32,
}

impl NodePaintMethod for QrCodePaintMethod {
    fn paint_content(&self, wrapper: &PaintWrapper, builder: &mut SceneBuilder) {
        if self.size <= 0.0 {
            return;
        }
        let property = wrapper.paint_property();
        let content = wrapper.content_rect();
        let origin = Point::new(
            content.x() + (content.width() - self.size) / 2.0,
            content.y() + (content.height() - self.size) / 2.0,
        );
        builder.push(DrawCommand::QrCode {
            value: property.text(VALUE).unwrap_or_default().to_owned(),
            rect: Rect::new(origin, Size::new(self.size, self.size)),
            color: property.color(COLOR).unwrap_or(Color::BLACK),
            background: property.color(BACKGROUND_COLOR).unwrap_or(Color::WHITE),
        });
    }
}
