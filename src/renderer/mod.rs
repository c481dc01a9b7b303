//! Rendering contracts
//!
//! The core emits [`DrawCommand`]s to a [`DrawSurface`]; the shell owns the
//! window, fonts and textures.

pub mod draw;
pub mod scene;
pub mod style;

pub use draw::{Color, CommandBuffer, DrawCommand, DrawSurface, Rect, palette};
pub use scene::Interstitial;
pub use style::{AssetKind, AssetSource, ImageHandle, NoAssets, Styles, VisualStyle};
