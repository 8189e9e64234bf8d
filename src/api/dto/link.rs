//! Wire representation of a short link and of link listings.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::entities::ShortLink;

/// A short link as exposed over HTTP, named after the persisted columns.
#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    pub hash: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_counts: i64,
}

impl From<ShortLink> for LinkResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            hash: link.hash,
            link: link.target,
            created_at: link.created_at,
            expires_at: link.expires_at,
            click_counts: link.click_count,
        }
    }
}

/// Links keyed by hash, serialized as a JSON object.
///
/// Entries are written in the order given, so a ranked listing keeps its rank
/// order on the wire.
#[derive(Debug, Clone, Default)]
pub struct LinkMap(pub Vec<LinkResponse>);

impl LinkMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ShortLink> for LinkMap {
    fn from_iter<I: IntoIterator<Item = ShortLink>>(iter: I) -> Self {
        Self(iter.into_iter().map(LinkResponse::from).collect())
    }
}

impl Serialize for LinkMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in &self.0 {
            map.serialize_entry(&link.hash, link)?;
        }
        map.end()
    }
}

/// Query parameters for `GET /list`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// When true, only the most clicked links are returned.
    #[serde(default)]
    pub top: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(hash: &str, clicks: i64) -> ShortLink {
        let now = Utc::now();
        ShortLink::new(
            hash.to_string(),
            format!("https://example.com/{}", hash),
            now,
            now + Duration::hours(1),
            clicks,
        )
    }

    #[test]
    fn test_link_response_field_names() {
        let value = serde_json::to_value(LinkResponse::from(link("abc123", 4))).unwrap();

        assert_eq!(value["hash"], "abc123");
        assert_eq!(value["link"], "https://example.com/abc123");
        assert_eq!(value["click_counts"], 4);
        assert!(value["created_at"].is_string());
        assert!(value["expires_at"].is_string());
    }

    #[test]
    fn test_link_map_keeps_order() {
        let map: LinkMap = vec![link("zzzzzz", 9), link("aaaaaa", 1)]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&map).unwrap();

        let z = json.find("\"zzzzzz\":").unwrap();
        let a = json.find("\"aaaaaa\":").unwrap();
        assert!(z < a);
    }

    #[test]
    fn test_empty_link_map_is_empty_object() {
        let map = LinkMap::default();
        assert!(map.is_empty());
        assert_eq!(serde_json::to_string(&map).unwrap(), "{}");
    }
}
