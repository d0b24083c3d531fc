use anyhow::Result;
use serde_json::json;

use super::Services;
use crate::api::Paging;
use crate::cli::args::TasksAction;
use crate::cli::context::RunContext;
use crate::models::group_by_stage;
use crate::output::format::OutputMode;
use crate::output::json::{PageSummaryJson, StageColumnJson, to_json};
use crate::output::table::{format_stage_column, format_task_row};

pub fn run(services: &Services, action: &TasksAction, ctx: &RunContext) -> Result<()> {
    match action {
        TasksAction::List { paging, by_stage } => {
            let paging = Paging {
                limit: paging.limit,
                offset: paging.offset,
            };
            list(services, paging, *by_stage, ctx)
        }
    }
}

fn list(services: &Services, paging: Paging, by_stage: bool, ctx: &RunContext) -> Result<()> {
    let page = services
        .data
        .list_tasks(paging)
        .map_err(|e| services.fail(e))?;

    match (ctx.output_mode, by_stage) {
        (OutputMode::Json, false) => println!(
            "{}",
            to_json(&json!({"page": PageSummaryJson::of(&page), "tasks": page.nodes}))
        ),
        (OutputMode::Json, true) => {
            let columns: Vec<StageColumnJson> = group_by_stage(&page.nodes)
                .into_iter()
                .map(|(stage, tasks)| StageColumnJson { stage, tasks })
                .collect();
            println!("{}", to_json(&columns));
        }
        (OutputMode::Tty, false) => {
            if page.nodes.is_empty() {
                println!("No tasks found.");
            }
            for task in &page.nodes {
                println!("{}", format_task_row(task, &ctx.tz));
            }
        }
        (OutputMode::Tty, true) => {
            let columns: Vec<String> = group_by_stage(&page.nodes)
                .iter()
                .map(|(stage, tasks)| format_stage_column(stage, tasks, &ctx.tz))
                .collect();
            if columns.is_empty() {
                println!("No tasks found.");
            } else {
                println!("{}", columns.join("\n\n"));
            }
        }
    }
    Ok(())
}
