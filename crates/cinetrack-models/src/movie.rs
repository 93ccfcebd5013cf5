use serde::{Deserialize, Serialize};

/// A catalog movie as returned by the remote API. Immutable from the
/// client's perspective within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<u64>>,
}

impl Movie {
    /// Release year, when the release date parses as YYYY-MM-DD.
    pub fn year(&self) -> Option<&str> {
        let year = self.release_date.split('-').next()?;
        (year.len() == 4).then_some(year)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_catalog_movie() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/poster.jpg",
            "overview": "A hacker learns the truth.",
            "release_date": "1999-03-30",
            "vote_average": 8.2,
            "genre_ids": [28, 878]
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.year(), Some("1999"));
        assert_eq!(movie.genre_ids, Some(vec![28, 878]));
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "Untitled"}"#).unwrap();
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.vote_average, 0.0);
        assert_eq!(movie.year(), None);
    }
}
