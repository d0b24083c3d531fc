//! `crmc login`, `logout`, `check` and `whoami`.

use anyhow::{Result, bail};

use super::Services;
use crate::auth::LoginCredentials;
use crate::cli::context::RunContext;
use crate::output::format::render;
use crate::output::table::{format_check, format_identity, format_login};

pub fn login(
    services: &Services,
    email: &str,
    password: Option<&str>,
    ctx: &RunContext,
) -> Result<()> {
    let credentials = LoginCredentials {
        email: email.to_string(),
        password: password.map(str::to_string),
    };
    let response = services.auth.login(&credentials);

    println!("{}", render(ctx.output_mode, &response, |r| format_login(r, email)));

    if !response.success {
        bail!("Login failed");
    }
    Ok(())
}

pub fn logout(services: &Services, ctx: &RunContext) -> Result<()> {
    let response = services.auth.logout();
    println!("{}", render(ctx.output_mode, &response, |_| "Logged out".to_string()));
    Ok(())
}

/// Exits non-zero when the stored credential is not accepted.
pub fn check(services: &Services, ctx: &RunContext) -> Result<()> {
    let response = services.auth.check();
    println!("{}", render(ctx.output_mode, &response, format_check));

    if !response.authenticated {
        bail!("Not authenticated");
    }
    Ok(())
}

pub fn whoami(services: &Services, ctx: &RunContext) -> Result<()> {
    match services.auth.get_identity() {
        Some(identity) => {
            println!("{}", render(ctx.output_mode, &identity, format_identity));
            Ok(())
        }
        None => bail!("Could not load identity. Run 'crmc login' to sign in."),
    }
}
