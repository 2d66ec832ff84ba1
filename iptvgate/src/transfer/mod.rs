mod playlist_fetch;
pub use playlist_fetch::*;
