//! Property bags attached to every frame node.
//!
//! Each setter records which stage the change invalidates in the bag's
//! [`PropertyChangeFlag`]. The flag is consumed when the node is marked dirty
//! and cleared by the pipeline once the stage has run.

use std::collections::BTreeMap;

use crate::color::Color;
use crate::constraint::LayoutConstraint;
use crate::flag::PropertyChangeFlag;
use crate::layout::{EdgeInsets, OptionalSize};

/// Whether a node takes part in layout and painting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Measured, laid out and painted.
    #[default]
    Visible,
    /// Occupies space but is not painted.
    Hidden,
    /// Skipped entirely; takes no space.
    Gone,
}

/// Properties that influence measure and layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutProperty {
    change_flag: PropertyChangeFlag,
    visibility: Visibility,
    ideal_size: OptionalSize,
    padding: EdgeInsets,
    layout_constraint: Option<LayoutConstraint>,
    content_constraint: Option<LayoutConstraint>,
}

impl LayoutProperty {
    /// Creates an empty property bag flagged for an initial measure.
    #[must_use]
    pub fn new() -> Self {
        Self {
            change_flag: PropertyChangeFlag::MEASURE,
            ..Self::default()
        }
    }

    /// Pending changes.
    #[must_use]
    pub const fn change_flag(&self) -> PropertyChangeFlag {
        self.change_flag
    }

    /// Adds `flag` to the pending changes.
    pub fn update_change_flag(&mut self, flag: PropertyChangeFlag) {
        self.change_flag |= flag;
    }

    /// Clears all pending changes.
    pub fn clean_dirty(&mut self) {
        self.change_flag = PropertyChangeFlag::empty();
    }

    /// Current visibility.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Updates the visibility, flagging a measure when it changes.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.change_flag |= PropertyChangeFlag::MEASURE;
        }
    }

    /// User-requested size.
    #[must_use]
    pub const fn ideal_size(&self) -> OptionalSize {
        self.ideal_size
    }

    /// Sets the user-requested size.
    pub fn set_ideal_size(&mut self, size: OptionalSize) {
        if self.ideal_size != size {
            self.ideal_size = size;
            self.change_flag |= PropertyChangeFlag::MEASURE;
        }
    }

    /// Padding between the frame and the content box.
    #[must_use]
    pub const fn padding(&self) -> EdgeInsets {
        self.padding
    }

    /// Sets the padding.
    pub fn set_padding(&mut self, padding: EdgeInsets) {
        if self.padding != padding {
            self.padding = padding;
            self.change_flag |= PropertyChangeFlag::MEASURE;
        }
    }

    /// Constraint resolved during the last measure, including the ideal size.
    #[must_use]
    pub const fn layout_constraint(&self) -> Option<&LayoutConstraint> {
        self.layout_constraint.as_ref()
    }

    /// Constraint for the content box resolved during the last measure.
    #[must_use]
    pub const fn content_constraint(&self) -> Option<&LayoutConstraint> {
        self.content_constraint.as_ref()
    }

    /// Resolves the node's own constraint from the one imposed by its parent.
    ///
    /// The content constraint is derived from it by removing the padding.
    pub fn update_layout_constraint(&mut self, parent: LayoutConstraint) {
        let mut constraint = parent;
        constraint.apply_ideal_size(self.ideal_size);
        self.content_constraint = Some(constraint.deflate(self.padding));
        self.layout_constraint = Some(constraint);
    }

    /// Copies the resolved constraints of `other`, leaving everything else untouched.
    pub fn update_layout_constraint_from(&mut self, other: &Self) {
        self.layout_constraint = other.layout_constraint;
        self.content_constraint = other.content_constraint;
    }
}

/// A single value stored in a [`PaintProperty`].
#[derive(Clone, Debug, PartialEq)]
pub enum PaintValue {
    /// A floating point value such as a slider position.
    Float(f32),
    /// A color.
    Color(Color),
    /// Text, for example the payload of a QR code.
    Text(String),
    /// A boolean switch.
    Flag(bool),
}

/// Properties that only influence painting.
///
/// Values are keyed by name so patterns can define their own sets without a
/// dedicated type each.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaintProperty {
    change_flag: PropertyChangeFlag,
    values: BTreeMap<&'static str, PaintValue>,
}

impl PaintProperty {
    /// Creates an empty property bag flagged for an initial paint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            change_flag: PropertyChangeFlag::RENDER,
            values: BTreeMap::new(),
        }
    }

    /// Adds a value without flagging a repaint. Used while building defaults.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: PaintValue) -> Self {
        self.values.insert(key, value);
        self
    }

    /// Pending changes.
    #[must_use]
    pub const fn change_flag(&self) -> PropertyChangeFlag {
        self.change_flag
    }

    /// Adds `flag` to the pending changes.
    pub fn update_change_flag(&mut self, flag: PropertyChangeFlag) {
        self.change_flag |= flag;
    }

    /// Clears all pending changes.
    pub fn clean_dirty(&mut self) {
        self.change_flag = PropertyChangeFlag::empty();
    }

    /// Stores `value` under `key`, flagging a repaint when it differs.
    pub fn update(&mut self, key: &'static str, value: PaintValue) {
        if self.values.get(key) != Some(&value) {
            self.values.insert(key, value);
            self.change_flag |= PropertyChangeFlag::RENDER;
        }
    }

    /// Raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PaintValue> {
        self.values.get(key)
    }

    /// Float stored under `key`.
    #[must_use]
    pub fn float(&self, key: &str) -> Option<f32> {
        match self.values.get(key)? {
            PaintValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Color stored under `key`.
    #[must_use]
    pub fn color(&self, key: &str) -> Option<Color> {
        match self.values.get(key)? {
            PaintValue::Color(value) => Some(*value),
            _ => None,
        }
    }

    /// Text stored under `key`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            PaintValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Boolean stored under `key`.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            PaintValue::Flag(value) => Some(*value),
            _ => None,
        }
    }
}
