use thiserror::Error;

/// All the ways things can go wrong in searchdeck
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad local input; never sent to the network.
    #[error("{0}")]
    Validation(String),

    /// The backend answered, but with a non-success status in the body.
    #[error("{0}")]
    Application(String),

    #[error("API request failed: {0}")]
    Api(#[from] searchdeck_api::ApiError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
