mod media;
mod playlist;
pub use media::*;
pub use playlist::*;

pub mod directives {
    pub const EXTM3U: &str = "#EXTM3U";
    pub const EXTM3U_LEN: usize = EXTM3U.len();
    pub const EXTINF: &str = "#EXTINF";
    pub const EXTVLCOPT: &str = "#EXTVLCOPT";
}
