// src/error.rs
use std::io;

#[derive(Debug)]
pub enum KubeconfigError {
    Validation(String),
    NotFound(String),
    Decode(String),
    Encoding(String),
    Io(io::Error),
}

impl std::fmt::Display for KubeconfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(s) => write!(f, "Validation Error: {}", s),
            Self::NotFound(s) => write!(f, "Not Found: {}", s),
            Self::Decode(s) => write!(f, "Decode Error: {}", s),
            Self::Encoding(s) => write!(f, "Encoding Error: {}", s),
            Self::Io(e) => write!(f, "IO Error: {}", e),
        }
    }
}

impl std::error::Error for KubeconfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for KubeconfigError {
    fn from(error: io::Error) -> Self {
        KubeconfigError::Io(error)
    }
}

impl From<KubeconfigError> for io::Error {
    fn from(error: KubeconfigError) -> Self {
        match error {
            KubeconfigError::Io(e) => e,
            KubeconfigError::Validation(s) => io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid kubeconfig input: {}", s),
            ),
            KubeconfigError::NotFound(s) => io::Error::new(
                io::ErrorKind::NotFound,
                format!("Not found: {}", s),
            ),
            KubeconfigError::Decode(s) => io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to decode: {}", s),
            ),
            KubeconfigError::Encoding(s) => io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to encode kubeconfig: {}", s),
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, KubeconfigError>;
