//! Paint wrappers and the per-node render context.

mod scene;

use core::fmt::{self, Debug};

use tideui_core::{GeometryNode, PaintProperty, Rect};

pub use scene::{DrawCommand, Scene, SceneBuilder};

use crate::tree::{FrameTree, NodeId};

/// Paints a node from snapshots of its geometry and paint property.
pub trait NodePaintMethod: Debug {
    /// Draws the node's content.
    fn paint_content(&self, wrapper: &PaintWrapper, builder: &mut SceneBuilder);

    /// Draws on top of the content.
    fn paint_foreground(&self, wrapper: &PaintWrapper, builder: &mut SceneBuilder) {
        let _ = (wrapper, builder);
    }
}

/// Painted output attached to every node.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    frame: Rect,
    scene: Scene,
    paint_count: u32,
}

impl RenderContext {
    /// Frame the node is drawn into, relative to its parent.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Commands recorded by the last paint.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// How many times the node has been painted.
    #[must_use]
    pub const fn paint_count(&self) -> u32 {
        self.paint_count
    }

    pub(crate) const fn sync_geometry(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn update_content(&mut self, scene: Scene) {
        self.scene = scene;
        self.paint_count += 1;
    }

    pub(crate) fn clear_content(&mut self) {
        self.scene = Scene::default();
    }
}

/// Transient handle pairing a node's paint method with property snapshots.
pub struct PaintWrapper {
    host: NodeId,
    geometry: GeometryNode,
    paint_property: PaintProperty,
    method: Box<dyn NodePaintMethod>,
}

impl PaintWrapper {
    pub(crate) fn new(
        host: NodeId,
        geometry: GeometryNode,
        paint_property: PaintProperty,
        method: Box<dyn NodePaintMethod>,
    ) -> Self {
        Self {
            host,
            geometry,
            paint_property,
            method,
        }
    }

    /// Node being painted.
    #[must_use]
    pub const fn host(&self) -> NodeId {
        self.host
    }

    /// Geometry at the time the wrapper was created.
    #[must_use]
    pub const fn geometry(&self) -> &GeometryNode {
        &self.geometry
    }

    /// Paint property at the time the wrapper was created.
    #[must_use]
    pub const fn paint_property(&self) -> &PaintProperty {
        &self.paint_property
    }

    /// Content box in the node's local coordinates.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect::new(self.geometry.content_offset(), self.geometry.content_size())
    }

    /// Runs the paint method and stores the scene on the host.
    ///
    /// The host's paint flag is cleaned afterwards. A host removed in the
    /// meantime is skipped.
    pub(crate) fn flush_render(self, tree: &mut FrameTree) {
        let mut builder = SceneBuilder::new();
        self.method.paint_content(&self, &mut builder);
        builder.begin_foreground();
        self.method.paint_foreground(&self, &mut builder);
        let Some(node) = tree.get_mut(self.host) else {
            return;
        };
        node.render_context.update_content(builder.finish());
        node.paint_property.clean_dirty();
    }
}

impl Debug for PaintWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaintWrapper")
            .field("host", &self.host)
            .field("frame", &self.geometry.frame())
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}
