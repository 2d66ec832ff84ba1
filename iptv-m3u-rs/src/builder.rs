use std::collections::HashMap;

use smol_str::SmolStr;

use crate::format::{PlaylistItem, REFERRER_HEADER};

/// An item opened by `#EXTINF` that is still waiting for its url line
#[derive(Debug, Default)]
pub(crate) struct MediaBuilder {
    item: PlaylistItem,
}

impl MediaBuilder {
    pub fn new(
        title: Option<SmolStr>,
        duration: Option<f32>,
        attributes: HashMap<SmolStr, SmolStr>,
    ) -> Self {
        Self {
            item: PlaylistItem {
                title,
                duration,
                attributes,
                ..Default::default()
            },
        }
    }

    /// Scalar, the last writer wins
    pub fn user_agent(&mut self, user_agent: SmolStr) -> &mut Self {
        self.item.user_agent = Some(user_agent);
        self
    }

    /// Merged into the existing headers
    pub fn referrer(&mut self, referrer: SmolStr) -> &mut Self {
        self.item.headers.insert(REFERRER_HEADER.into(), referrer);
        self
    }

    pub fn url(&mut self, url: Option<SmolStr>) -> &mut Self {
        self.item.url = url;
        self
    }

    pub fn build(self) -> PlaylistItem {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::MediaBuilder;

    #[test]
    fn test_headers_accumulate() {
        let mut builder = MediaBuilder::default();
        builder
            .user_agent("A".into())
            .referrer("http://first".into())
            .user_agent("B".into())
            .referrer("http://second".into());

        let item = builder.build();
        assert_eq!(item.user_agent.as_deref(), Some("B"));
        assert_eq!(item.headers.len(), 1);
        assert_eq!(item.referrer(), Some("http://second"));
        assert!(!item.is_playable());
    }
}
