use serde::{Deserialize, Serialize};

/// The signed-in user, as returned by the `me` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Projection of a user used in select lists and nested owners/assignees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub sales_owner: Option<UserSummary>,
}

/// Input for creating a company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    pub sales_owner_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStage {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub stage_id: Option<String>,
    #[serde(default)]
    pub stage: Option<TaskStage>,
    #[serde(default)]
    pub users: Vec<UserSummary>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Task {
    /// Stage title, or "unassigned" for tasks not yet on a stage.
    pub fn stage_title(&self) -> &str {
        self.stage
            .as_ref()
            .map(|s| s.title.as_str())
            .unwrap_or("unassigned")
    }
}

/// Group tasks into stage columns.
///
/// Tasks without a stage come first, then each stage in order of first appearance.
pub fn group_by_stage(tasks: &[Task]) -> Vec<(&str, Vec<&Task>)> {
    let mut unassigned = Vec::new();
    let mut stages: Vec<(&TaskStage, Vec<&Task>)> = Vec::new();

    for task in tasks {
        match &task.stage {
            None => unassigned.push(task),
            Some(stage) => match stages.iter_mut().find(|(s, _)| s.id == stage.id) {
                Some((_, column)) => column.push(task),
                None => stages.push((stage, vec![task])),
            },
        }
    }

    let mut columns = Vec::new();
    if !unassigned.is_empty() {
        columns.push(("unassigned", unassigned));
    }
    columns.extend(stages.into_iter().map(|(s, tasks)| (s.title.as_str(), tasks)));
    columns
}

/// One page of an offset-paged connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub nodes: Vec<T>,
}
