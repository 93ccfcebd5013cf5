use serde::{Deserialize, Serialize};

/// One page of a paginated listing. `page` is 1-based and never exceeds
/// `total_pages` on a well-formed response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u64,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}
