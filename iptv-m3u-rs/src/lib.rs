//! # iptv-m3u-rs
//! A library for parsing IPTV m3u channel lists
//!
//! # Example
//! ```rust
//! use iptv_m3u_rs::Parser;
//! use std::io::Cursor;
//!
//! let mut parser = Parser::new(Cursor::new(r#"
//! #EXTM3U x-tvg-url="http://example.com/epg.xml"
//! #EXTINF:-1 tvg-id="a" tvg-logo="http://example.com/a.png",A
//! #EXTVLCOPT:http-referrer=http://example.com
//! http://example.com/A.m3u8|user-agent=Mozilla"#));
//! parser.parse().unwrap();
//! let result = parser.get_result();
//!
//! let channel = &result.items[0];
//! assert_eq!(channel.title.as_deref(), Some("A"));
//! assert_eq!(channel.referrer(), Some("http://example.com"));
//! assert_eq!(channel.user_agent.as_deref(), Some("Mozilla"));
//! ```

mod builder;
pub mod format;
mod parser;
pub use parser::*;
