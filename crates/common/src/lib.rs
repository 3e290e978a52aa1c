pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::ChromaError;
pub type Result<T> = std::result::Result<T, ChromaError>;
