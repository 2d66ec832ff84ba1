use smol_str::SmolStr;
use std::collections::HashMap;

use crate::format::PlaylistItem;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    /// Attributes of the `#EXTM3U` header, e.g. `x-tvg-url`
    pub attributes: HashMap<SmolStr, SmolStr>,
    /// Items in source order, including the ones without url
    pub items: Vec<PlaylistItem>,
}

impl Playlist {
    /// Items that have a playback url
    pub fn playable(&self) -> impl Iterator<Item = &PlaylistItem> {
        self.items.iter().filter(|x| x.is_playable())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
