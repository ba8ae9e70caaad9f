//! Image display with fit modes.
//!
//! The pattern knows nothing about decoding. The host hands it an
//! [`ImageInfo`] once the image is available and marks the node for measure;
//! the source and destination rectangles are recomputed every time the
//! settled layout is swapped in.

use tideui_core::{Point, Rect, Size};
use tideui_pipeline::{
    DirtySwapConfig, DrawCommand, LayoutAlgorithm, LayoutWrapper, NodePaintMethod, PaintWrapper,
    Pattern, PatternContext, SceneBuilder,
};
use tracing::trace;

/// How an image is scaled into the content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFit {
    /// Stretch to fill the box, ignoring the aspect ratio.
    Fill,
    /// Scale to fit entirely inside the box.
    Contain,
    /// Scale to cover the box, cropping the overflow.
    #[default]
    Cover,
    /// Keep the natural size, centered and cropped to the box.
    None,
}

impl ImageFit {
    /// Returns the `(src, dst)` pair for an image of `image` pixels drawn
    /// into a box of `target` size.
    ///
    /// `src` is in image pixels, `dst` is relative to the box origin.
    #[must_use]
    pub fn apply(self, image: Size, target: Size) -> (Rect, Rect) {
        let whole_image = Rect::from_size(image);
        let whole_target = Rect::from_size(target);
        if !image.is_positive() || !target.is_positive() {
            return (Rect::default(), Rect::default());
        }
        let scale_x = target.width / image.width;
        let scale_y = target.height / image.height;
        match self {
            Self::Fill => (whole_image, whole_target),
            Self::Contain => {
                let drawn = image.scale(scale_x.min(scale_y));
                (whole_image, centered(target, drawn))
            }
            Self::Cover => {
                let sampled = target.scale(1.0 / scale_x.max(scale_y));
                (centered(image, sampled), whole_target)
            }
            Self::None => {
                let visible = image.min(target);
                (centered(image, visible), centered(target, visible))
            }
        }
    }
}

fn centered(outer: Size, inner: Size) -> Rect {
    Rect::new(
        Point::new(
            (outer.width - inner.width) / 2.0,
            (outer.height - inner.height) / 2.0,
        ),
        inner,
    )
}

/// A decoded image as far as layout and paint are concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    /// Identifier the backend resolves to pixels.
    pub source: String,
    /// Natural size in pixels.
    pub size: Size,
}

impl ImageInfo {
    /// Creates a new image description.
    #[must_use]
    pub fn new(source: impl Into<String>, size: Size) -> Self {
        Self {
            source: source.into(),
            size,
        }
    }
}

/// Displays an [`ImageInfo`] according to an [`ImageFit`].
#[derive(Debug, Clone, Default)]
pub struct ImagePattern {
    fit: ImageFit,
    image: Option<ImageInfo>,
    src_rect: Rect,
    dst_rect: Rect,
}

impl ImagePattern {
    /// Creates an empty image view.
    #[must_use]
    pub fn new(fit: ImageFit) -> Self {
        Self {
            fit,
            ..Self::default()
        }
    }

    /// Current fit mode.
    #[must_use]
    pub const fn fit(&self) -> ImageFit {
        self.fit
    }

    /// Changes the fit mode. Takes effect on the next layout of the node.
    pub fn set_fit(&mut self, fit: ImageFit) {
        self.fit = fit;
    }

    /// Image being displayed, if loaded.
    #[must_use]
    pub const fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    /// Stores a loaded image. The node must be marked for measure afterwards.
    pub fn on_image_loaded(&mut self, image: ImageInfo) {
        self.image = Some(image);
    }

    /// Region of the image sampled by the last layout, in image pixels.
    #[must_use]
    pub const fn src_rect(&self) -> Rect {
        self.src_rect
    }

    /// Region painted by the last layout, in node coordinates.
    #[must_use]
    pub const fn dst_rect(&self) -> Rect {
        self.dst_rect
    }
}

impl Pattern for ImagePattern {
    fn create_layout_algorithm(&self) -> Box<dyn LayoutAlgorithm> {
        Box::new(ImageLayoutAlgorithm {
            natural_size: self.image.as_ref().map(|image| image.size),
        })
    }

    fn create_node_paint_method(&self) -> Option<Box<dyn NodePaintMethod>> {
        let image = self.image.as_ref()?;
        Some(Box::new(ImagePaintMethod {
            source: image.source.clone(),
            src: self.src_rect,
            dst: self.dst_rect,
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
        let Some(image) = &self.image else {
            return false;
        };
        let geometry = dirty.geometry();
        let (src, dst) = self.fit.apply(image.size, geometry.content_size());
        self.src_rect = src;
        self.dst_rect = dst.translate(geometry.content_offset());
        trace!(src = ?self.src_rect, dst = ?self.dst_rect, fit = ?self.fit, "image rects");
        true
    }
}

/// Sizes the node to the image's natural size unless an ideal size is set.
#[derive(Debug, Clone, Copy)]
struct ImageLayoutAlgorithm {
    natural_size: Option<Size>,
}

impl LayoutAlgorithm for ImageLayoutAlgorithm {
    fn measure(&mut self, wrapper: &mut LayoutWrapper) {
        let content = self.natural_size.unwrap_or_default();
        let frame = wrapper.resolve_frame_size(content);
        wrapper.set_measured_size(frame);
    }

    fn layout(&mut self, _wrapper: &mut LayoutWrapper) {}
}

#[derive(Debug)]
struct ImagePaintMethod {
    source: String,
    src: Rect,
    dst: Rect,
}

impl NodePaintMethod for ImagePaintMethod {
    fn paint_content(&self, _wrapper: &PaintWrapper, builder: &mut SceneBuilder) {
        if self.dst.size().is_zero() {
            return;
        }
        builder.push(DrawCommand::Image {
            source: self.source.clone(),
            src: self.src,
            dst: self.dst,
        });
    }
}

#[cfg(test)]
mod tests {
    use tideui_core::{OptionalSize, PropertyChangeFlag};
    use tideui_pipeline::{NodeId, PipelineConfig, PipelineContext};

    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect::new(Point::new(x, y), Size::new(width, height))
    }

    fn mounted_image(ctx: &mut PipelineContext, fit: ImageFit) -> NodeId {
        let id = ctx.create_node("image", ImagePattern::new(fit));
        ctx.update_layout_property(id, |property| {
            property.set_ideal_size(OptionalSize::new(100.0, 100.0));
        });
        ctx.mount_to_parent(ctx.root(), id).unwrap();
        ctx.flush_pipeline_immediately();
        id
    }

    fn load(ctx: &mut PipelineContext, id: NodeId) {
        ctx.with_pattern::<ImagePattern, _>(id, |pattern| {
            pattern.on_image_loaded(ImageInfo::new("photo.png", Size::new(200.0, 100.0)));
        })
        .unwrap();
        ctx.mark_dirty_node(id, PropertyChangeFlag::MEASURE_SELF);
        ctx.flush_pipeline_immediately();
    }

    fn rects(ctx: &mut PipelineContext, id: NodeId) -> (Rect, Rect) {
        ctx.with_pattern::<ImagePattern, _>(id, |pattern| (pattern.src_rect(), pattern.dst_rect()))
            .unwrap()
    }

    #[test]
    fn fit_modes() {
        let image = Size::new(200.0, 100.0);
        let target = Size::new(100.0, 100.0);
        assert_eq!(
            ImageFit::Fill.apply(image, target),
            (rect(0.0, 0.0, 200.0, 100.0), rect(0.0, 0.0, 100.0, 100.0))
        );
        assert_eq!(
            ImageFit::Contain.apply(image, target),
            (rect(0.0, 0.0, 200.0, 100.0), rect(0.0, 25.0, 100.0, 50.0))
        );
        assert_eq!(
            ImageFit::Cover.apply(image, target),
            (rect(50.0, 0.0, 100.0, 100.0), rect(0.0, 0.0, 100.0, 100.0))
        );
        assert_eq!(
            ImageFit::None.apply(image, target),
            (rect(50.0, 0.0, 100.0, 100.0), rect(0.0, 0.0, 100.0, 100.0))
        );
        assert_eq!(
            ImageFit::Cover.apply(Size::zero(), target),
            (Rect::default(), Rect::default())
        );
    }

    #[test]
    fn nothing_is_painted_before_load() {
        let mut ctx = PipelineContext::default();
        let id = mounted_image(&mut ctx, ImageFit::Contain);

        let node = ctx.node(id).unwrap();
        assert!(node.render_context().scene().is_empty());
        assert_eq!(node.render_context().paint_count(), 0);
        assert!(node.paint_property().change_flag().is_empty());
        assert_eq!(rects(&mut ctx, id), (Rect::default(), Rect::default()));
    }

    #[test]
    fn loaded_image_caches_rects_and_paints() {
        let mut ctx = PipelineContext::default();
        let id = mounted_image(&mut ctx, ImageFit::Contain);
        load(&mut ctx, id);

        assert_eq!(
            rects(&mut ctx, id),
            (rect(0.0, 0.0, 200.0, 100.0), rect(0.0, 25.0, 100.0, 50.0))
        );
        let node = ctx.node(id).unwrap();
        assert_eq!(
            node.render_context().scene().commands(),
            &[DrawCommand::Image {
                source: "photo.png".to_owned(),
                src: rect(0.0, 0.0, 200.0, 100.0),
                dst: rect(0.0, 25.0, 100.0, 50.0),
            }]
        );
    }

    #[test]
    fn fit_change_recomputes_on_next_layout() {
        let mut ctx = PipelineContext::default();
        let id = mounted_image(&mut ctx, ImageFit::Contain);
        load(&mut ctx, id);

        ctx.with_pattern::<ImagePattern, _>(id, |pattern| pattern.set_fit(ImageFit::Cover));
        ctx.mark_dirty_node(id, PropertyChangeFlag::MEASURE_SELF);
        ctx.flush_pipeline_immediately();
        assert_eq!(
            rects(&mut ctx, id),
            (rect(50.0, 0.0, 100.0, 100.0), rect(0.0, 0.0, 100.0, 100.0))
        );
    }
}
