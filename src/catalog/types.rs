//! Wire types for the Google Books `volumes` endpoint.
//!
//! Only the fields Libris renders are modeled; serde ignores the rest.
//! Everything except `id` is optional because the API omits fields freely.

use serde::Deserialize;

use crate::core::book::BookRecord;

#[derive(Deserialize, Debug, Default)]
pub struct VolumesResponse {
    #[serde(rename = "totalItems", default)]
    pub total_items: u64,
    /// Absent when nothing matched.
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Volume {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub image_links: Option<ImageLinks>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

impl From<Volume> for BookRecord {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        let thumbnail_url = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail));
        BookRecord {
            id: volume.id,
            title: info.title,
            authors: info.authors,
            published_date: info.published_date,
            description: info.description,
            thumbnail_url,
        }
    }
}

impl VolumesResponse {
    /// Converts to records, keeping API order, dropping volumes without an id,
    /// and stopping at `limit`.
    pub fn into_records(self, limit: usize) -> Vec<BookRecord> {
        self.items
            .into_iter()
            .filter(|v| !v.id.trim().is_empty())
            .take(limit)
            .map(BookRecord::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_items_is_empty() {
        let response: VolumesResponse =
            serde_json::from_str(r#"{"kind":"books#volumes","totalItems":0}"#).unwrap();
        assert_eq!(response.total_items, 0);
        assert!(response.into_records(20).is_empty());
    }

    #[test]
    fn test_volume_maps_to_record() {
        let json = r#"{
            "id": "B1hSG45JCX4C",
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "publishedDate": "1990-09-01",
                "description": "Set on the desert planet Arrakis.",
                "imageLinks": {
                    "smallThumbnail": "http://example.com/small.jpg",
                    "thumbnail": "http://example.com/thumb.jpg"
                },
                "pageCount": 544
            }
        }"#;
        let volume: Volume = serde_json::from_str(json).unwrap();
        let record = BookRecord::from(volume);
        assert_eq!(record.id, "B1hSG45JCX4C");
        assert_eq!(record.title.as_deref(), Some("Dune"));
        assert_eq!(record.authors, Some(vec!["Frank Herbert".to_string()]));
        assert_eq!(record.published_date.as_deref(), Some("1990-09-01"));
        assert_eq!(record.thumbnail_url.as_deref(), Some("http://example.com/thumb.jpg"));
    }

    #[test]
    fn test_small_thumbnail_fallback() {
        let json = r#"{"id":"x","volumeInfo":{"imageLinks":{"smallThumbnail":"s.jpg"}}}"#;
        let record = BookRecord::from(serde_json::from_str::<Volume>(json).unwrap());
        assert_eq!(record.thumbnail_url.as_deref(), Some("s.jpg"));
    }

    #[test]
    fn test_volume_without_volume_info() {
        let record = BookRecord::from(serde_json::from_str::<Volume>(r#"{"id":"x"}"#).unwrap());
        assert_eq!(record, BookRecord::new("x"));
    }

    #[test]
    fn test_into_records_drops_empty_ids_and_caps() {
        let json = r#"{"items":[{"id":"a"},{"id":""},{"id":"b"},{"id":"c"}]}"#;
        let response: VolumesResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<String> = response.into_records(2).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
