use std::{
    collections::{HashMap, VecDeque},
    error::Error,
    fmt::Display,
    io::{self, BufRead, Cursor},
    mem::take,
};

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use smol_str::SmolStr;

use crate::{
    builder::MediaBuilder,
    format::{Playlist, directives},
};

pub struct Parser<'a>(Box<dyn ParserImplTrait + 'a>);

impl<'a> Parser<'a> {
    pub fn new<T: BufRead + 'a>(reader: T) -> Self {
        Self(Box::new(ParserImpl::new(reader)))
    }

    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.0.parse()
    }

    pub fn get_result(&mut self) -> Playlist {
        self.0.get_result()
    }
}

/// Parse a whole playlist from a line reader
pub fn parse_playlist(reader: impl BufRead) -> Result<Playlist, ParseError> {
    let mut parser = ParserImpl::new(reader);
    parser.parse()?;
    Ok(parser.get_result())
}

pub fn parse_str(input: &str) -> Result<Playlist, ParseError> {
    parse_playlist(Cursor::new(input))
}

#[derive(Debug)]
pub enum ParseError {
    InvalidHeader,
    /// A url or option line appeared while no `#EXTINF` item was pending
    MalformedSequence {
        line: usize,
    },
    IoError(io::Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::InvalidHeader => write!(f, "Not a playlist file, missing {}", directives::EXTM3U),
            Self::MalformedSequence { line } => {
                write!(f, "Line {} has no preceding {}", line, directives::EXTINF)
            }
            Self::IoError(e) => e.fmt(f),
        }
    }
}
impl Error for ParseError {}
impl From<io::Error> for ParseError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}

trait ParserImplTrait {
    fn parse(&mut self) -> Result<(), ParseError>;
    fn get_result(&mut self) -> Playlist;
}

lazy_static! {
    /// From `https://github.com/Raiper34/m3u-parser-generator/blob/c8e479161dcc4ec3d5490631fa42a1647741481d/src/m3u-parser.ts#L52` (Modified)
    static ref ATTRIBUTE_REGEX: Regex = Regex::new("([^ ]*?)=\"(.*?)\"").expect("Regular expression error");
    static ref DURATION_REGEX: Regex = Regex::new(r"(?i)^#EXTINF:?\s*(-?[0-9]+(?:\.[0-9]+)?)?").expect("Regular expression error");
    static ref USER_AGENT_REGEX: Regex = Regex::new("(?i)http-user-agent=(.*)").expect("Regular expression error");
    static ref REFERRER_REGEX: Regex = Regex::new("(?i)http-referrer=(.*)").expect("Regular expression error");
}

fn parse_attributes(input: impl AsRef<str>) -> HashMap<SmolStr, SmolStr> {
    let mut result = HashMap::new();
    for (_, [key, value]) in ATTRIBUTE_REGEX
        .captures_iter(input.as_ref())
        .map(|x| x.extract())
    {
        result.insert(key.into(), value.into());
    }

    result
}

fn strip_quotes(value: &str) -> SmolStr {
    value.replace('"', "").trim().into()
}

fn parse_title(line: &str) -> Option<SmolStr> {
    line.rsplit_once(',').map(|(_, title)| strip_quotes(title))
}

fn parse_duration(line: &str) -> Option<f32> {
    DURATION_REGEX.captures(line)?.get(1)?.as_str().parse().ok()
}

fn parse_item_attributes(line: &str) -> HashMap<SmolStr, SmolStr> {
    // drop `#EXTINF:<duration>`, the attributes end at the first comma
    let rest = DURATION_REGEX.replace(line, "");
    let attributes = rest.split(',').next().unwrap_or_default();

    let mut result = HashMap::new();
    for token in attributes.split_whitespace() {
        match token.split('=').collect::<Vec<_>>().as_slice() {
            [key, value] => {
                result.insert(strip_quotes(key), strip_quotes(value));
            }
            _ => trace!("Dropped attribute token {}", token),
        }
    }

    result
}

fn parse_tag_value(regex: &Regex, line: &str) -> Option<SmolStr> {
    regex
        .captures(line)?
        .get(1)
        .map(|x| strip_quotes(x.as_str()))
}

#[derive(Debug, Default, PartialEq)]
struct UrlLine {
    url: Option<SmolStr>,
    user_agent: Option<SmolStr>,
    referrer: Option<SmolStr>,
}

/// `<url>[|param=value[&param=value...]]`
fn parse_url_line(line: &str) -> UrlLine {
    let (location, params) = match line.split_once('|') {
        Some((location, params)) => (location, Some(params)),
        None => (line, None),
    };

    let mut result = UrlLine {
        url: Some(strip_quotes(location)),
        ..Default::default()
    };

    for (key, value) in params
        .into_iter()
        .flat_map(|x| x.split('&'))
        .filter_map(|x| x.split_once('='))
    {
        let value = strip_quotes(value);
        let key = key.trim();
        if key.eq_ignore_ascii_case("user-agent") {
            result.user_agent = Some(value);
        } else if key.eq_ignore_ascii_case("referer") {
            // stored as `referrer`, the same key `http-referrer` uses
            result.referrer = Some(value);
        }
    }

    result
}

struct ParserImpl<T: BufRead> {
    reader: T,
    buffer: Vec<u8>,
    /// Lines of the last chunk not consumed yet, a chunk holds several when they end with a lone `\r`
    lines: VecDeque<String>,
    line_number: usize,
    playlist: Playlist,
    pending: VecDeque<MediaBuilder>,
}

impl<T: BufRead> ParserImpl<T> {
    pub fn new(reader: T) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            lines: VecDeque::new(),
            line_number: 0,
            playlist: Playlist::default(),
            pending: VecDeque::new(),
        }
    }

    fn read_chunk(&mut self) -> Result<bool, io::Error> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(false);
        }

        // invalid utf-8 is replaced, not fatal
        let decoded = String::from_utf8_lossy(&self.buffer);
        let chunk = decoded.strip_suffix('\n').unwrap_or(&decoded);
        let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
        self.lines.extend(chunk.split('\r').map(str::to_owned));

        Ok(true)
    }

    fn next_line(&mut self) -> Result<Option<String>, io::Error> {
        loop {
            while let Some(line) = self.lines.pop_front() {
                self.line_number += 1;
                if !line.trim().is_empty() {
                    return Ok(Some(line.trim().to_owned()));
                }
            }

            if !self.read_chunk()? {
                return Ok(None);
            }
        }
    }

    fn parse_m3u_header(&mut self) -> Result<(), ParseError> {
        let first_line = self.next_line()?.ok_or(ParseError::InvalidHeader)?;
        let first_line = first_line.trim_start_matches('\u{feff}');

        if !first_line.starts_with(directives::EXTM3U) {
            return Err(ParseError::InvalidHeader);
        }

        let attributes = parse_attributes(&first_line[directives::EXTM3U_LEN..]);
        self.playlist.attributes.extend(attributes);

        Ok(())
    }

    fn parse_media_info(&mut self, line: &str) {
        // queued behind any item still waiting for its url
        self.pending.push_back(MediaBuilder::new(
            parse_title(line),
            parse_duration(line),
            parse_item_attributes(line),
        ));
    }

    fn current_media(&mut self) -> Result<&mut MediaBuilder, ParseError> {
        let line = self.line_number;
        self.pending
            .front_mut()
            .ok_or(ParseError::MalformedSequence { line })
    }

    fn parse_vlc_option(&mut self, line: &str) -> Result<(), ParseError> {
        let user_agent = parse_tag_value(&USER_AGENT_REGEX, line);
        let referrer = parse_tag_value(&REFERRER_REGEX, line);

        let media = self.current_media()?;
        if let Some(user_agent) = user_agent {
            media.user_agent(user_agent);
        }
        if let Some(referrer) = referrer {
            media.referrer(referrer);
        }

        Ok(())
    }

    fn parse_location(&mut self, line: &str) -> Result<(), ParseError> {
        let location = parse_url_line(line);
        let Some(mut media) = self.pending.pop_front() else {
            return Err(ParseError::MalformedSequence {
                line: self.line_number,
            });
        };

        if let Some(user_agent) = location.user_agent {
            media.user_agent(user_agent);
        }
        if let Some(referrer) = location.referrer {
            media.referrer(referrer);
        }
        media.url(location.url);

        let item = media.build();
        trace!("Parsed item {:?} at line {}", item.title, self.line_number);
        self.playlist.items.push(item);

        Ok(())
    }

    fn parse_lines(&mut self) -> Result<(), ParseError> {
        self.parse_m3u_header()?;

        while let Some(line) = self.next_line()? {
            if line.starts_with(directives::EXTINF) {
                self.parse_media_info(&line);
            } else if line.starts_with(directives::EXTVLCOPT) {
                self.parse_vlc_option(&line)?;
            } else if line.starts_with('#') {
                // comment or unsupported directive
                trace!("Skipped line {}", self.line_number);
            } else {
                self.parse_location(&line)?;
            }
        }

        // items that never reached their url line
        while let Some(media) = self.pending.pop_front() {
            self.playlist.items.push(media.build());
        }

        debug!(
            "Parsed {} items from {} lines",
            self.playlist.items.len(),
            self.line_number
        );

        Ok(())
    }
}

impl<T: BufRead> ParserImplTrait for ParserImpl<T> {
    fn parse(&mut self) -> Result<(), ParseError> {
        let result = self.parse_lines();
        if result.is_err() {
            self.playlist = Playlist::default();
            self.pending.clear();
            self.lines.clear();
        }

        result
    }

    fn get_result(&mut self) -> Playlist {
        take(&mut self.playlist)
    }
}
