use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    /// Any kind of IO errors
    #[error("{0}\ncaused by: {1}")]
    IoError(String, std::io::Error),

    /// In case the serve path exists but is not a directory
    #[error("The serve path '{0}' is not a directory")]
    NotADirectory(String),
}

#[derive(Debug, Error)]
pub enum ConfigValidationError {
    /// Port conflicts or invalid port ranges
    #[error("Port {port} is invalid or unavailable.\nSuggestion: {suggestion}")]
    PortError { port: u16, suggestion: String },

    /// Invalid file paths or access issues
    #[error("Path '{path}' is invalid: {reason}.\nSuggestion: {suggestion}")]
    PathError {
        path: String,
        reason: String,
        suggestion: String,
    },
}

/// Errors that can occur while answering a request.
///
/// Every kind is converted at the handler boundary into a single uniform
/// 500 response whose body interpolates the error message. Unknown routes
/// (404) and unsupported methods (405) are structural and handled by the
/// router instead.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The entry reference after `/zip` had no extractable basename
    #[error("Something unexpected happened, please re-check your input")]
    InvalidInput,

    /// The resolved path could not be stat'ed
    #[error("The asked file does not exist")]
    NotFound,

    /// The resolved path is a socket, device or other special file
    #[error("The asked file is neither a file nor a directory")]
    UnsupportedEntryType,

    /// The served root could not be enumerated
    #[error("Could not read the root directory")]
    DirectoryReadError,

    /// The archive writer or the response sink failed mid-stream
    #[error("An error occurred while streaming the archive\ncaused by: {0}")]
    StreamWriteError(String),
}

impl ResponseError for RuntimeError {
    fn status_code(&self) -> StatusCode {
        // The original daemon deliberately answers 500 for everything that
        // reaches this point, including missing archive targets.
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log_error_chain(self.to_string());

        HttpResponse::build(self.status_code())
            .content_type(mime::TEXT_PLAIN_UTF_8)
            .body(format!("Request failed: {self}.\n"))
    }
}

pub fn log_error_chain(description: String) {
    for cause in description.lines() {
        log::error!("{cause}");
    }
}
