//! Prefecture Directory
//!
//! Holds the prefecture list loaded once at startup. The list is only ever
//! replaced wholesale; a failed load leaves the previous contents intact.

use crate::api::PopulationApi;
use crate::model::{PrefCode, Prefecture};

/// The loaded prefecture list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefectureDirectory {
    prefectures: Vec<Prefecture>,
}

impl PrefectureDirectory {
    pub fn new(prefectures: Vec<Prefecture>) -> Self {
        Self { prefectures }
    }

    /// Replace the whole list
    pub fn replace(&mut self, prefectures: Vec<Prefecture>) {
        self.prefectures = prefectures;
    }

    pub fn all(&self) -> &[Prefecture] {
        &self.prefectures
    }

    pub fn len(&self) -> usize {
        self.prefectures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefectures.is_empty()
    }

    /// Look up a prefecture by code
    pub fn get(&self, code: PrefCode) -> Option<&Prefecture> {
        self.prefectures.iter().find(|p| p.code == code)
    }

    /// Display name for `code`, if listed
    pub fn name_of(&self, code: PrefCode) -> Option<&str> {
        self.get(code).map(|p| p.name.as_str())
    }

    /// Fetch the directory and replace the list on success
    ///
    /// Returns whether the list was replaced.
    pub async fn load<A: PopulationApi + ?Sized>(&mut self, api: &A) -> bool {
        match load_prefectures(api).await {
            Some(prefectures) => {
                self.replace(prefectures);
                true
            }
            None => false,
        }
    }
}

impl From<Vec<Prefecture>> for PrefectureDirectory {
    fn from(prefectures: Vec<Prefecture>) -> Self {
        Self::new(prefectures)
    }
}

/// Fetch the prefecture list, logging and swallowing any failure
pub async fn load_prefectures<A: PopulationApi + ?Sized>(api: &A) -> Option<Vec<Prefecture>> {
    match api.fetch_prefectures().await {
        Ok(prefectures) => {
            tracing::info!(count = prefectures.len(), "Loaded prefecture directory");
            Some(prefectures)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch prefectures");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;

    fn sample() -> Vec<Prefecture> {
        vec![Prefecture::new(1, "Hokkaido"), Prefecture::new(13, "Tokyo")]
    }

    #[test]
    fn test_lookup() {
        let directory = PrefectureDirectory::new(sample());
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.name_of(13), Some("Tokyo"));
        assert_eq!(directory.name_of(47), None);
    }

    #[tokio::test]
    async fn test_load_replaces_list() {
        let api = MockApi::new().with_prefectures(sample());
        let mut directory = PrefectureDirectory::new(vec![Prefecture::new(47, "Okinawa")]);

        assert!(directory.load(&api).await);
        assert_eq!(directory.all(), sample().as_slice());
        assert_eq!(api.calls(), vec!["/api/prefectures"]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let api = MockApi::new();

        let mut directory = PrefectureDirectory::default();
        assert!(!directory.load(&api).await);
        assert!(directory.is_empty());

        let mut directory = PrefectureDirectory::new(sample());
        assert!(!directory.load(&api).await);
        assert_eq!(directory.len(), 2);
    }
}
