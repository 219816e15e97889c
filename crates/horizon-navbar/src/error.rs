//! Error types for Horizon Navbar.

use std::collections::TryReserveError;

use thiserror::Error;

use horizon_navbar_render::RenderError;

use crate::component::ComponentId;

/// The main error type for toolbar operations.
#[derive(Error, Debug)]
pub enum ToolbarError {
    /// The requested style preset does not exist.
    #[error("invalid toolbar style index {index} (table has {available} entries)")]
    InvalidStyle { index: usize, available: usize },

    /// Allocating toolbar components failed.
    #[error("failed to allocate toolbar components: {0}")]
    Allocation(#[from] TryReserveError),

    /// The component id is invalid or has been destroyed.
    #[error("invalid or destroyed component id {0:?}")]
    InvalidComponent(ComponentId),

    /// Attempted to attach a component below itself.
    #[error("cannot attach a component to itself or one of its descendants")]
    CircularParentage,

    /// The configuration could not be parsed.
    #[error("failed to parse toolbar configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize toolbar configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// The configuration could not be read.
    #[error("failed to read toolbar configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A colour literal was not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid colour value {0:?}")]
    InvalidColor(String),

    /// Painting resources could not be prepared.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A specialized Result type for toolbar operations.
pub type ToolbarResult<T> = Result<T, ToolbarError>;
