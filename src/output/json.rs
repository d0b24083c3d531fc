use serde::Serialize;

use crate::models::{Page, Task};

/// Serialize any serializable value to pretty JSON string.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// JSON-serializable stage column.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageColumnJson<'a> {
    pub stage: &'a str,
    pub tasks: Vec<&'a Task>,
}

/// Pagination summary included alongside list output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummaryJson {
    pub total_count: u64,
    pub returned: usize,
}

impl PageSummaryJson {
    pub fn of<T>(page: &Page<T>) -> Self {
        Self {
            total_count: page.total_count,
            returned: page.nodes.len(),
        }
    }
}
