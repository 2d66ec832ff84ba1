use iptv_m3u_rs::format::{Playlist, PlaylistItem};
use log::warn;
use serde::Serialize;
use url::Url;

use crate::catalog::{CatalogError, LoadData, LoadKind};

pub const UNKNOWN_CHANNEL: &str = "Unknown";
pub const PLAYLIST_NAME: &str = "IPTV Playlist";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub name: String,
    pub url: String,
    pub poster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub name: String,
    /// 1-based
    pub episode: usize,
    pub poster: Option<String>,
    pub data: LoadData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub name: String,
    pub url: String,
    pub episodes: Vec<Episode>,
}

/// Catalog view over a playlist fetched from `origin`
pub struct Catalog<'a> {
    playlist: &'a Playlist,
    origin: String,
    base: Option<Url>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|x| !x.is_empty())
}

fn channel_name(item: &PlaylistItem) -> &str {
    non_empty(item.title.as_deref()).unwrap_or(UNKNOWN_CHANNEL)
}

/// Guide id first, the search results group by it
fn search_name(item: &PlaylistItem) -> &str {
    non_empty(item.attribute("tvg-id"))
        .or(non_empty(item.title.as_deref()))
        .unwrap_or(UNKNOWN_CHANNEL)
}

fn poster(item: &PlaylistItem) -> Option<String> {
    non_empty(item.attribute("tvg-logo")).map(str::to_owned)
}

impl<'a> Catalog<'a> {
    pub fn new(playlist: &'a Playlist, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        let base = Url::parse(&origin)
            .inspect_err(|e| warn!("Failed to parse origin {}: {}", origin, e))
            .ok();

        Self {
            playlist,
            origin,
            base,
        }
    }

    fn resolve(&self, location: &str) -> String {
        match Url::parse(location) {
            Ok(_) => location.to_owned(),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                // RelativeUrlWithoutBase, join with the playlist url
                match self.base.as_ref().map(|base| base.join(location)) {
                    Some(Ok(joined)) => joined.to_string(),
                    _ => location.to_owned(),
                }
            }
            Err(another_err) => {
                warn!(
                    "Failed to parse url {}, keep it as is: {}",
                    location, another_err
                );
                location.to_owned()
            }
        }
    }

    /// Items with a non-blank url, paired with the resolved url
    fn playable(&self) -> impl Iterator<Item = (&'a PlaylistItem, String)> + '_ {
        let playlist: &'a Playlist = self.playlist;
        playlist
            .playable()
            .filter_map(|item| Some((item, self.resolve(non_empty(item.url.as_deref())?))))
    }

    pub fn search(&self, query: Option<&str>) -> Vec<SearchEntry> {
        let query = non_empty(query).map(str::to_lowercase);
        let matches = |item: &PlaylistItem| match &query {
            None => true,
            Some(query) => [Some(search_name(item)), item.title.as_deref()]
                .into_iter()
                .flatten()
                .any(|x| x.to_lowercase().contains(query)),
        };

        self.playable()
            .filter(|(item, _)| matches(*item))
            .map(|(item, url)| SearchEntry {
                name: search_name(item).to_owned(),
                url,
                poster: poster(item),
            })
            .collect()
    }

    pub fn load(&self) -> Result<LoadResponse, CatalogError> {
        let episodes = self
            .playable()
            .enumerate()
            .map(|(index, (item, url))| Episode {
                name: channel_name(item).to_owned(),
                episode: index + 1,
                poster: poster(item),
                data: LoadData {
                    url,
                    channel_name: channel_name(item).to_owned(),
                    poster: poster(item),
                    kind: LoadKind::Playlist,
                    user_agent: item.user_agent.as_ref().map(|x| x.to_string()),
                    headers: item
                        .headers
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                },
            })
            .collect::<Vec<_>>();

        if episodes.is_empty() {
            return Err(CatalogError::EmptyPlaylist);
        }

        Ok(LoadResponse {
            name: PLAYLIST_NAME.to_owned(),
            url: self.origin.clone(),
            episodes,
        })
    }
}
