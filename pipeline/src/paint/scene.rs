//! Recorded output of a node paint.

use tideui_core::{Color, Point, Rect};

/// Draw commands produced by one paint of a node.
///
/// Content commands come first and foreground commands follow them, so a
/// backend can draw child nodes in between.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
    foreground_start: usize,
}

impl Scene {
    /// Every command, content first.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands drawn below the node's children.
    #[must_use]
    pub fn content(&self) -> &[DrawCommand] {
        self.commands
            .get(..self.foreground_start)
            .unwrap_or_default()
    }

    /// Commands drawn above the node's children.
    #[must_use]
    pub fn foreground(&self) -> &[DrawCommand] {
        self.commands
            .get(self.foreground_start..)
            .unwrap_or_default()
    }

    /// Returns true if the paint recorded nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Collects the commands of a [`crate::NodePaintMethod`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    commands: Vec<DrawCommand>,
    foreground_start: Option<usize>,
}

impl SceneBuilder {
    /// Creates a builder recording content commands.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
            foreground_start: None,
        }
    }

    /// Appends a command to the current layer.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Routes the following commands to the foreground. Only the first call
    /// counts.
    pub(crate) fn begin_foreground(&mut self) {
        if self.foreground_start.is_none() {
            self.foreground_start = Some(self.commands.len());
        }
    }

    /// Seals the recording.
    #[must_use]
    pub fn finish(self) -> Scene {
        let foreground_start = self.foreground_start.unwrap_or(self.commands.len());
        Scene {
            commands: self.commands,
            foreground_start,
        }
    }
}

/// Primitive drawing operations, in the painted node's local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill a solid rectangle.
    SolidRect {
        /// Rectangle to fill.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Fill a circle.
    Circle {
        /// Center point.
        center: Point,
        /// Radius in logical pixels.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Draw part of an image into a destination rectangle.
    Image {
        /// Image source identifier.
        source: String,
        /// Region of the image to sample, in image pixels.
        src: Rect,
        /// Region to draw into.
        dst: Rect,
    },
    /// Draw a QR code encoding `value` into a square.
    QrCode {
        /// Encoded payload.
        value: String,
        /// Square to draw into.
        rect: Rect,
        /// Module color.
        color: Color,
        /// Background color.
        background: Color,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(color: Color) -> DrawCommand {
        DrawCommand::SolidRect {
            rect: Rect::default(),
            color,
        }
    }

    #[test]
    fn foreground_follows_content() {
        let mut builder = SceneBuilder::new();
        builder.push(rect(Color::BLACK));
        builder.begin_foreground();
        builder.push(rect(Color::WHITE));
        builder.begin_foreground();
        builder.push(rect(Color::BLUE));
        let scene = builder.finish();

        assert_eq!(scene.content(), &[rect(Color::BLACK)]);
        assert_eq!(scene.foreground(), &[rect(Color::WHITE), rect(Color::BLUE)]);
        assert_eq!(scene.commands().len(), 3);
    }

    #[test]
    fn content_only_paint_has_no_foreground() {
        let mut builder = SceneBuilder::new();
        builder.push(rect(Color::BLACK));
        let scene = builder.finish();
        assert_eq!(scene.content().len(), 1);
        assert!(scene.foreground().is_empty());
        assert!(Scene::default().content().is_empty());
    }
}
