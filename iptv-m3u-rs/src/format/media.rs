use std::collections::HashMap;

use smol_str::SmolStr;

/// Header key that both `http-referrer` and the `referer` url parameter are stored under
pub const REFERRER_HEADER: &str = "referrer";

/// A channel entry of an IPTV playlist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistItem {
    /// Display name, the text after the last comma of `#EXTINF`
    pub title: Option<SmolStr>,
    /// Duration of `#EXTINF`, usually -1 for live channels
    pub duration: Option<f32>,
    pub attributes: HashMap<SmolStr, SmolStr>,
    pub headers: HashMap<SmolStr, SmolStr>,
    /// Playback url, `None` if the item never reached its url line
    pub url: Option<SmolStr>,
    pub user_agent: Option<SmolStr>,
}

impl PlaylistItem {
    pub fn attribute(&self, key: impl AsRef<str>) -> Option<&str> {
        self.attributes.get(key.as_ref()).map(|x| x.as_str())
    }

    pub fn referrer(&self) -> Option<&str> {
        self.headers.get(REFERRER_HEADER).map(|x| x.as_str())
    }

    pub fn is_playable(&self) -> bool {
        self.url.is_some()
    }
}
