use std::time::Duration;

use crate::transport::TransportError;

/// Crate-wide error taxonomy.
///
/// Every component propagates failures unchanged to the facade; nothing here
/// is logged-and-swallowed, so callers can branch on the variant they got.
/// `Timeout` is the only condition worth retrying at the call site (by
/// re-issuing the whole capture); everything else is fatal for the call.
#[derive(thiserror::Error, Debug)]
pub enum CloudError {
    /// Non-2xx response or connection failure from the provider.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Malformed catalog payload. Fatal for that read; no partial results.
    #[error("malformed catalog response: {0}")]
    Decode(#[from] quick_xml::DeError),

    /// A request body failed to serialize.
    #[error("could not encode request body: {0}")]
    Encode(#[from] quick_xml::SeError),

    /// A workflow precondition failed (VM not stoppable, hosting tag missing).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The image is present in neither catalog.
    #[error("image '{image_id}' not found in either catalog")]
    NotFound { image_id: String },

    /// Capture polling exceeded its configured bound. Callers may retry the
    /// whole capture.
    #[error("image '{name}' did not become active within {waited:?}")]
    Timeout { name: String, waited: Duration },
}

impl CloudError {
    pub fn precondition(message: impl Into<String>) -> Self {
        CloudError::Precondition(message.into())
    }

    pub fn not_found(image_id: impl Into<String>) -> Self {
        CloudError::NotFound {
            image_id: image_id.into(),
        }
    }
}
