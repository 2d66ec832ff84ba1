use std::{
    error::Error,
    fmt::Display,
    io::{BufRead, Cursor},
};

use iptv_m3u_rs::{ParseError, format::Playlist};
use log::debug;
use reqwest::Client;
use tokio::task::JoinError;

#[derive(Debug)]
pub enum FetchPlaylistError {
    RequestError(reqwest::Error),
    RequestNotSuccess(u16),
    ParseError(ParseError),
    JoinError(JoinError),
}

impl Display for FetchPlaylistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestError(e) => e.fmt(f),
            Self::RequestNotSuccess(status) => write!(f, "Upstream responded with {}", status),
            Self::ParseError(e) => e.fmt(f),
            Self::JoinError(e) => e.fmt(f),
        }
    }
}

impl Error for FetchPlaylistError {}

impl From<reqwest::Error> for FetchPlaylistError {
    fn from(value: reqwest::Error) -> Self {
        Self::RequestError(value)
    }
}

impl From<JoinError> for FetchPlaylistError {
    fn from(value: JoinError) -> Self {
        Self::JoinError(value)
    }
}

impl From<ParseError> for FetchPlaylistError {
    fn from(value: ParseError) -> Self {
        Self::ParseError(value)
    }
}

pub async fn parse_playlist_async(
    stream: impl BufRead + Send + 'static,
) -> Result<Playlist, FetchPlaylistError> {
    Ok(tokio::task::spawn_blocking(move || iptv_m3u_rs::parse_playlist(stream)).await??)
}

/// Download `origin` and parse it as a playlist
pub async fn fetch_playlist(
    http_client: &Client,
    origin: impl AsRef<str>,
) -> Result<Playlist, FetchPlaylistError> {
    let origin = origin.as_ref();
    let response = http_client.get(origin).send().await?;
    if !response.status().is_success() {
        return Err(FetchPlaylistError::RequestNotSuccess(
            response.status().as_u16(),
        ));
    }

    let bytes = response.bytes().await?;
    debug!("Fetched {} bytes from {}", bytes.len(), origin);

    parse_playlist_async(Cursor::new(bytes)).await
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use iptv_m3u_rs::ParseError;

    use super::{FetchPlaylistError, parse_playlist_async};

    #[tokio::test]
    async fn test_parse_playlist_async() {
        let data = "#EXTM3U\n#EXTINF:-1 tvg-id=\"a\",A\nhttp://a/a.m3u8\n";
        let playlist = parse_playlist_async(Cursor::new(data)).await.unwrap();
        assert_eq!(playlist.items.len(), 1);
        assert_eq!(playlist.items[0].attribute("tvg-id"), Some("a"));
    }

    #[tokio::test]
    async fn test_parse_playlist_async_invalid() {
        let result = parse_playlist_async(Cursor::new("<html></html>")).await;
        assert!(matches!(
            result,
            Err(FetchPlaylistError::ParseError(ParseError::InvalidHeader))
        ));
    }
}
