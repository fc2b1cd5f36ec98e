use thiserror::Error;

/// Errors the library reports explicitly.
///
/// Programming errors (non-positive pattern sizes, empty occupant tags,
/// out-of-bounds uniform queries, tag/geometry identity violations) panic at
/// the point of detection instead; "no solution" outcomes are `None` or
/// empty collections, never errors.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// `generate_new_rect` was handed an anchor mapping that omits an anchor
    /// recorded in the definition.
    #[error("anchor \"{tag}\" missing from the old-to-new mapping")]
    MissingAnchor { tag: String },

    #[error("invalid layout config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
