/// Crate-wide result alias.
pub type AnimapperResult<T> = Result<T, AnimapperError>;

/// Error taxonomy for loading, mounting and rendering annotated graphics.
///
/// A missing data record for a classified element is not an error; the resolver returns `None`.
#[derive(thiserror::Error, Debug)]
pub enum AnimapperError {
    /// Configuration or API misuse (unknown node, unknown widget, bad interval).
    #[error("validation error: {0}")]
    Validation(String),

    /// A graphic or data fetch did not succeed.
    #[error("resource load error: '{locator}': {reason}")]
    ResourceLoad {
        /// Locator that was requested.
        locator: String,
        /// Loader-provided description of the failure.
        reason: String,
    },

    /// The data resource is not valid JSON.
    #[error("data parse error: {0}")]
    DataParse(String),

    /// The graphic resource is not a well-formed XML document.
    #[error("graphic error: {0}")]
    Graphic(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimapperError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn resource_load(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ResourceLoad {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    pub fn data_parse(msg: impl Into<String>) -> Self {
        Self::DataParse(msg.into())
    }

    pub fn graphic(msg: impl Into<String>) -> Self {
        Self::Graphic(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// `true` for failures the pipeline reports to the diagnostic channel instead of the caller.
    pub fn is_resource_load(&self) -> bool {
        matches!(self, Self::ResourceLoad { .. })
    }
}
