//! API response wrappers
//!
//! Most endpoints answer with the bare entity or a bare JSON array. The
//! wrapper here covers the paged ones.

use serde::{Deserialize, Serialize};

/// Spring-style page wrapper, only `content` is consumed
///
/// ```json
/// { "content": [ ... ], "totalElements": 12 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

impl<T> Default for PageContent<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
        }
    }
}

impl<T> PageContent<T> {
    pub fn into_items(self) -> Vec<T> {
        self.content
    }
}
