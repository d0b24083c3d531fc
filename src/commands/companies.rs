use anyhow::Result;
use serde_json::json;

use super::Services;
use crate::api::Paging;
use crate::cli::args::CompaniesAction;
use crate::cli::context::RunContext;
use crate::models::NewCompany;
use crate::output::format::{OutputMode, render};
use crate::output::json::{PageSummaryJson, to_json};
use crate::output::table::format_company_row;

pub fn run(services: &Services, action: &CompaniesAction, ctx: &RunContext) -> Result<()> {
    match action {
        CompaniesAction::List { paging } => list(
            services,
            Paging {
                limit: paging.limit,
                offset: paging.offset,
            },
            ctx,
        ),
        CompaniesAction::Create { name, sales_owner } => create(
            services,
            NewCompany {
                name: name.clone(),
                sales_owner_id: sales_owner.clone(),
            },
            ctx,
        ),
    }
}

fn list(services: &Services, paging: Paging, ctx: &RunContext) -> Result<()> {
    let page = services
        .data
        .list_companies(paging)
        .map_err(|e| services.fail(e))?;

    match ctx.output_mode {
        OutputMode::Json => println!(
            "{}",
            to_json(&json!({"page": PageSummaryJson::of(&page), "companies": page.nodes}))
        ),
        OutputMode::Tty => {
            if page.nodes.is_empty() {
                println!("No companies found.");
            }
            for company in &page.nodes {
                println!("{}", format_company_row(company));
            }
            if page.total_count > page.nodes.len() as u64 {
                println!("({} of {} shown)", page.nodes.len(), page.total_count);
            }
        }
    }
    Ok(())
}

fn create(services: &Services, company: NewCompany, ctx: &RunContext) -> Result<()> {
    let created = services
        .data
        .create_company(&company)
        .map_err(|e| services.fail(e))?;

    println!(
        "{}",
        render(ctx.output_mode, &created, |c| format!(
            "Created {}",
            format_company_row(c)
        ))
    );
    Ok(())
}
