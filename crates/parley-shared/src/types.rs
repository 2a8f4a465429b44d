use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParleyError;

// Room identifier = opaque token issued by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Kind of room, carried on the wire as a one-letter tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Public channel (`c`).
    Channel,
    /// Private group (`p`).
    PrivateGroup,
    /// Direct message between users (`d`).
    Direct,
    /// Omnichannel / livechat conversation (`l`).
    Livechat,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Channel,
        RoomType::PrivateGroup,
        RoomType::Direct,
        RoomType::Livechat,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Channel => "c",
            Self::PrivateGroup => "p",
            Self::Direct => "d",
            Self::Livechat => "l",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, ParleyError> {
        match tag {
            "c" => Ok(Self::Channel),
            "p" => Ok(Self::PrivateGroup),
            "d" => Ok(Self::Direct),
            "l" => Ok(Self::Livechat),
            other => Err(ParleyError::UnknownRoomType(other.to_string())),
        }
    }
}

impl FromStr for RoomType {
    type Err = ParleyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The fields of a room that route dispatch needs.
///
/// Both local subscriptions and rooms fetched from the server reduce to
/// this shape. The type is kept as the raw wire tag so that an unknown tag
/// is only rejected at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomDescriptor {
    /// Room identifier.
    #[serde(rename = "_id")]
    pub id: RoomId,
    /// Room type tag (`c`, `p`, `d`, `l`, ...).
    pub t: String,
    /// URL-friendly room name, when the room type has one.
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable display name.
    #[serde(default)]
    pub fname: Option<String>,
}

impl RoomDescriptor {
    pub fn new(id: impl Into<RoomId>, t: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            t: t.into(),
            name: None,
            fname: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// URL query parameters, kept in key order so rendered URLs are stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    /// A leading `?` is ignored.
    ///
    /// Each key holds a single value: when a key repeats (`?a=1&a=2`) the
    /// last occurrence wins and the earlier ones are dropped.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self(
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Named path parameters (`:name` segments) of a route.
pub type RouteParams = BTreeMap<String, String>;

/// Percent-encode a single path segment.
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Decode a single path segment, keeping it verbatim if it is not valid
/// percent-encoded UTF-8.
pub fn decode_path_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_type_tags() {
        for t in RoomType::ALL {
            assert_eq!(RoomType::from_tag(t.tag()).unwrap(), t);
        }
        assert_eq!("d".parse::<RoomType>().unwrap(), RoomType::Direct);
    }

    #[test]
    fn unknown_room_type_tag() {
        let err = RoomType::from_tag("x").unwrap_err();
        assert_eq!(err, ParleyError::UnknownRoomType("x".into()));
    }

    #[test]
    fn empty_room_id() {
        assert!(RoomId::new("").is_empty());
        assert!(!RoomId::new(" ").is_empty());
        assert!(!RoomId::new("GENERAL").is_empty());
    }

    #[test]
    fn descriptor_from_server_json() {
        let json = r#"{"_id":"xyz","t":"d","fname":"Alice"}"#;
        let room: RoomDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(room.id, RoomId::new("xyz"));
        assert_eq!(room.t.parse::<RoomType>().unwrap(), RoomType::Direct);
        assert_eq!(room.name, None);
        assert_eq!(room.fname.as_deref(), Some("Alice"));
    }

    #[test]
    fn query_params_parse_and_render() {
        let q = QueryParams::parse("?b=2&a=hello%20world&flag=");
        assert_eq!(q.get("a"), Some("hello world"));
        assert_eq!(q.get("b"), Some("2"));
        assert_eq!(q.get("flag"), Some(""));
        assert_eq!(q.to_query_string(), "a=hello+world&b=2&flag=");
    }

    #[test]
    fn query_params_repeated_key_keeps_last_value() {
        let q = QueryParams::parse("a=1&b=x&a=2");
        assert_eq!(q.get("a"), Some("2"));
        assert_eq!(q.to_query_string(), "a=2&b=x");
    }

    #[test]
    fn query_params_empty() {
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
    }

    #[test]
    fn path_segment_encoding() {
        assert_eq!(encode_path_segment("dev ops"), "dev%20ops");
        assert_eq!(decode_path_segment("dev%20ops"), "dev ops");
        assert_eq!(decode_path_segment("%ff"), "%ff");
    }
}
