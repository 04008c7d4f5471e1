use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterlaceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to decode input image: {0}")]
    Decode(String),

    #[error("Failed to encode output image: {0}")]
    Encode(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InterlaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure_kind() {
        let err = InterlaceError::Decode("missing.png: No such file".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to decode input image: missing.png: No such file"
        );

        let err = InterlaceError::InvalidDimensions(0, 12);
        assert_eq!(err.to_string(), "Invalid image dimensions: width=0, height=12");
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))?
        }
        assert!(matches!(fails(), Err(InterlaceError::Io(_))));
    }
}
