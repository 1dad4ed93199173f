//! Scene construction errors.

/// Errors raised while turning configuration into scene parameters.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    /// A palette entry is not a CSS hex color.
    #[error("invalid color {0:?}, expected #rgb, #rgba, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    /// A kind with a non-zero count has no colors to pick from.
    #[error("{kind} palette is empty but {count} entities were requested")]
    EmptyPalette { kind: &'static str, count: usize },
}
