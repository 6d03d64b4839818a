use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Failed to parse PDF: {0}")]
    DocumentParse(String),

    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
}
