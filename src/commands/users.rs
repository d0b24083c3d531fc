use anyhow::Result;
use serde_json::json;

use super::Services;
use crate::api::Paging;
use crate::cli::args::UsersAction;
use crate::cli::context::RunContext;
use crate::output::format::OutputMode;
use crate::output::json::{PageSummaryJson, to_json};
use crate::output::table::format_user_row;

pub fn run(services: &Services, action: &UsersAction, ctx: &RunContext) -> Result<()> {
    let UsersAction::List { paging } = action;
    let page = services
        .data
        .list_users(Paging {
            limit: paging.limit,
            offset: paging.offset,
        })
        .map_err(|e| services.fail(e))?;

    match ctx.output_mode {
        OutputMode::Json => println!(
            "{}",
            to_json(&json!({"page": PageSummaryJson::of(&page), "users": page.nodes}))
        ),
        OutputMode::Tty => {
            if page.nodes.is_empty() {
                println!("No users found.");
            }
            for user in &page.nodes {
                println!("{}", format_user_row(user));
            }
        }
    }
    Ok(())
}
