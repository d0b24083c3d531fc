use chrono::FixedOffset;
use colored::Colorize;

use crate::auth::{AuthActionResponse, CheckResponse};
use crate::models::{Company, Identity, Task, UserSummary};

/// Format a company list entry for TTY display.
pub fn format_company_row(company: &Company) -> String {
    let id = company.id.dimmed().to_string();
    let name = company.name.bold().to_string();
    let owner = company
        .sales_owner
        .as_ref()
        .map(|o| format!(" ({})", o.name))
        .unwrap_or_default()
        .dimmed()
        .to_string();

    format!("{} {}{}", id, name, owner)
}

/// Format a task list entry for TTY display.
pub fn format_task_row(task: &Task, tz: &FixedOffset) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let id = task.id.dimmed().to_string();
    let title = task.title.bold().to_string();
    let stage = format!(" [{}]", task.stage_title()).dimmed().to_string();
    let due = task
        .due_date
        .as_deref()
        .map(|d| format!(" due {}", format_date_short(d, tz)))
        .unwrap_or_default()
        .dimmed()
        .to_string();
    let assignees = if task.users.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = task.users.iter().map(|u| u.name.as_str()).collect();
        format!(" @{}", names.join(", @")).dimmed().to_string()
    };

    format!("{} {} {}{}{}{}", check, id, title, stage, due, assignees)
}

/// Format a stage heading followed by its tasks.
pub fn format_stage_column(stage: &str, tasks: &[&Task], tz: &FixedOffset) -> String {
    let mut lines = vec![format!("{} ({})", stage.to_uppercase().bold(), tasks.len())];
    for task in tasks {
        lines.push(format!("  {}", format_task_row(task, tz)));
    }
    lines.join("\n")
}

/// Format a user list entry for TTY display.
pub fn format_user_row(user: &UserSummary) -> String {
    format!("{} {}", user.id.dimmed(), user.name.bold())
}

/// Format the signed-in user for TTY display.
pub fn format_identity(identity: &Identity) -> String {
    let mut lines = Vec::new();

    lines.push(identity.name.bold().to_string());
    lines.push("─".repeat(identity.name.chars().count()));
    lines.push(format!("{}       {}", "ID:".dimmed(), identity.id));
    lines.push(format!("{}    {}", "Email:".dimmed(), identity.email));

    let optional = [
        ("Phone:", identity.phone.as_deref()),
        ("Title:", identity.job_title.as_deref()),
        ("Timezone:", identity.timezone.as_deref()),
        ("Avatar:", identity.avatar_url.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            lines.push(format!("{:<10}{}", label.dimmed(), value));
        }
    }

    lines.join("\n")
}

pub fn format_login(response: &AuthActionResponse, email: &str) -> String {
    if response.success {
        format!("{} as {}", "Logged in".green(), email.bold())
    } else {
        let error = response.error.as_ref();
        format!(
            "{}: {} ({})",
            "Login failed".red(),
            error.map(|e| e.message.as_str()).unwrap_or_default(),
            error.map(|e| e.name.as_str()).unwrap_or_default()
        )
    }
}

pub fn format_check(response: &CheckResponse) -> String {
    if response.authenticated {
        "Authenticated".green().to_string()
    } else {
        format!(
            "{} {}",
            "Not authenticated.".red(),
            "Run 'crmc login' to sign in.".dimmed()
        )
    }
}

fn format_date_short(s: &str, tz: &FixedOffset) -> String {
    // Try to parse and format nicely, fallback to raw string
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        dt.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
    } else if s.len() >= 10 && s.is_char_boundary(10) {
        s[..10].to_string()
    } else {
        s.to_string()
    }
}
