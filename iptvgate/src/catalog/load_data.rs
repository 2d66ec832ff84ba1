use std::collections::HashMap;

use iptv_m3u_rs::format::REFERRER_HEADER;
use serde::{Deserialize, Serialize};

/// How the stream of a [`LoadData`] was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadKind {
    /// A channel picked from a parsed playlist
    Playlist,
    /// A direct stream url
    SingleStream,
}

/// The channel handed from `/load` to `/links`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadData {
    pub url: String,
    pub channel_name: String,
    pub poster: Option<String>,
    pub kind: LoadKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

/// A playable link for the player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamLink {
    pub source: String,
    pub name: String,
    pub url: String,
    /// Empty when the channel has no referrer
    pub referer: String,
    pub user_agent: Option<String>,
    pub headers: HashMap<String, String>,
    pub is_m3u8: bool,
}

impl LoadData {
    pub fn into_link(self, source: impl Into<String>) -> StreamLink {
        let referer = self
            .headers
            .get(REFERRER_HEADER)
            .cloned()
            .unwrap_or_default();

        // playlist channels are live hls streams
        let is_m3u8 = match self.kind {
            LoadKind::Playlist => true,
            LoadKind::SingleStream => is_hls_location(&self.url),
        };

        StreamLink {
            source: source.into(),
            name: self.channel_name,
            url: self.url,
            referer,
            user_agent: self.user_agent,
            headers: self.headers,
            is_m3u8,
        }
    }
}

fn is_hls_location(location: &str) -> bool {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    path.ends_with(".m3u8") || path.ends_with(".m3u")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::{LoadData, LoadKind};

    fn load_data(kind: LoadKind, url: &str) -> LoadData {
        LoadData {
            url: url.to_owned(),
            channel_name: "BBC One".to_owned(),
            poster: Some("http://x/y.png".to_owned()),
            kind,
            user_agent: None,
            headers: HashMap::new(),
        }
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(load_data(LoadKind::Playlist, "http://s/a.m3u8")).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "http://s/a.m3u8",
                "channelName": "BBC One",
                "poster": "http://x/y.png",
                "kind": "playlist",
            })
        );

        let parsed: LoadData = serde_json::from_value(json!({
            "url": "http://s/b",
            "channelName": "B",
            "poster": null,
            "kind": "singleStream",
            "userAgent": "VLC",
            "headers": { "referrer": "http://ref" },
        }))
        .unwrap();
        assert_eq!(parsed.kind, LoadKind::SingleStream);
        assert_eq!(parsed.user_agent.as_deref(), Some("VLC"));
        assert_eq!(parsed.headers.get("referrer").unwrap(), "http://ref");
    }

    #[test]
    fn test_into_link() {
        let mut data = load_data(LoadKind::Playlist, "http://s/live");
        data.headers
            .insert("referrer".to_owned(), "http://ref".to_owned());
        data.user_agent = Some("Mozilla".to_owned());

        let link = data.into_link("IPTVorg");
        assert_eq!(link.source, "IPTVorg");
        assert_eq!(link.name, "BBC One");
        assert_eq!(link.referer, "http://ref");
        assert_eq!(link.user_agent.as_deref(), Some("Mozilla"));
        assert!(link.is_m3u8);
    }

    #[test]
    fn test_single_stream_format() {
        let link = load_data(LoadKind::SingleStream, "http://s/movie.mp4").into_link("A");
        assert!(!link.is_m3u8);
        assert_eq!(link.referer, "");

        let link = load_data(LoadKind::SingleStream, "http://s/Index.M3U8?token=1").into_link("A");
        assert!(link.is_m3u8);
    }
}
