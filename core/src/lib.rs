//! Core primitives for the `TideUI` frame pipeline.
//!
//! Everything in this crate is plain data: geometry, layout constraints, the
//! property bags attached to every frame node, and the change flags used to
//! decide whether a node needs to be measured, laid out, or repainted.
//!
//! The scheduling machinery that consumes these types lives in
//! `tideui-pipeline`.

pub mod color;
pub mod constraint;
pub mod flag;
pub mod geometry_node;
pub mod layout;
pub mod property;

pub use color::Color;
pub use constraint::LayoutConstraint;
pub use flag::PropertyChangeFlag;
pub use geometry_node::GeometryNode;
pub use layout::{Axis, EdgeInsets, OptionalSize, Point, Rect, Size};
pub use property::{LayoutProperty, PaintProperty, PaintValue, Visibility};
