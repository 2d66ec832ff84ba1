use axum::http::StatusCode;
use iptv_m3u_rs::ParseError;

use crate::{catalog::CatalogError, transfer::FetchPlaylistError};

/// Log the error, then answer with the status code it maps to
#[macro_export]
macro_rules! status_with_log {
    ($position:expr) => {
        |e| {
            use log::error;

            error!("{}: {}", $position, e);
            $crate::errors::StatusOf::status_code(&e)
        }
    };
}

pub use status_with_log;

pub trait StatusOf {
    fn status_code(&self) -> StatusCode;
}

impl StatusOf for FetchPlaylistError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::RequestError(_) | Self::RequestNotSuccess(_) => StatusCode::BAD_GATEWAY,
            Self::ParseError(ParseError::IoError(_)) | Self::JoinError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl StatusOf for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyPlaylist => StatusCode::NOT_FOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use iptv_m3u_rs::ParseError;

    use super::StatusOf;
    use crate::{catalog::CatalogError, transfer::FetchPlaylistError};

    #[test]
    fn test_status_of() {
        assert_eq!(
            FetchPlaylistError::RequestNotSuccess(404).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            FetchPlaylistError::from(ParseError::InvalidHeader).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            FetchPlaylistError::from(ParseError::MalformedSequence { line: 2 }).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(CatalogError::EmptyPlaylist.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_status_with_log() {
        let result: Result<(), StatusCode> = Err(CatalogError::EmptyPlaylist)
            .map_err(crate::status_with_log!("Load catalog"));
        assert_eq!(result, Err(StatusCode::NOT_FOUND));
    }
}
