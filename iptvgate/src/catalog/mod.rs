use std::{error::Error, fmt::Display};

mod entries;
mod load_data;
pub use entries::*;
pub use load_data::*;

#[derive(Debug)]
pub enum CatalogError {
    /// No item of the playlist has a url
    EmptyPlaylist,
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPlaylist => write!(f, "Empty playlist"),
        }
    }
}

impl Error for CatalogError {}
