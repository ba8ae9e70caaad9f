//! Patterns for common `TideUI` widgets.
//!
//! Each widget is a [`Pattern`](tideui_pipeline::Pattern) plugged into a
//! frame node. The pipeline stays unaware of the concrete kinds; everything a
//! widget needs happens in its layout algorithm, its swap hook and its paint
//! method.
//!
//! - [`LinearPattern`]: row and column containers.
//! - [`ImagePattern`]: images with fit modes.
//! - [`QrCodePattern`]: square QR codes.
//! - [`SliderPattern`]: value pickers over a range.

pub mod image;
pub mod linear;
pub mod qrcode;
pub mod slider;

#[doc(inline)]
pub use image::{ImageFit, ImageInfo, ImagePattern};
#[doc(inline)]
pub use linear::{LinearLayoutAlgorithm, LinearPattern};
#[doc(inline)]
pub use qrcode::QrCodePattern;
#[doc(inline)]
pub use slider::{SliderLayoutAlgorithm, SliderPattern};
