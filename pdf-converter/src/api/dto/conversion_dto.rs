// pdf-converter/src/api/dto/conversion_dto.rs

use serde::{Deserialize, Serialize};

use crate::service::converter::PageRange;

/// 変換ページ範囲のクエリ (`?start=0&end=3`)
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct PageRangeQuery {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl From<PageRangeQuery> for PageRange {
    fn from(query: PageRangeQuery) -> Self {
        PageRange::new(query.start.unwrap_or(0), query.end)
    }
}
