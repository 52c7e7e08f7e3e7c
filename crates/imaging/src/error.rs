#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Image encode failed: {0}")]
    Encode(String),
}
