use anyhow::Result;
use serde_json::json;

use crate::commands::{prompts, AppContext};
use crate::output::Output;

/// Create an account. Mirrors the signup flow of the web client: a
/// successful signup does not authenticate, it hands off to `login`.
pub async fn run_signup(
    ctx: AppContext,
    email: Option<String>,
    username: Option<String>,
    output: &Output,
) -> Result<()> {
    let email = match email {
        Some(v) => v,
        None => prompts::prompt_string("Email", None)?,
    };
    let username = match username {
        Some(v) => v,
        None => prompts::prompt_string("Username", None)?,
    };
    let password = prompts::prompt_password("Password")?;

    match ctx.auth.signup(&email, &username, &password).await {
        Ok(_) => {
            output.success(format!("Account created for {username}"));
            output.info("Run `cinetrack login` to start a session.");
            Ok(())
        }
        Err(e) => {
            output.error(format!("Signup failed: {e}"));
            Err(e.into())
        }
    }
}

pub async fn run_login(
    mut ctx: AppContext,
    username: Option<String>,
    output: &Output,
) -> Result<()> {
    let username = match username {
        Some(v) => v,
        None => prompts::prompt_string("Username", None)?,
    };
    let password = prompts::prompt_password("Password")?;

    match ctx.session.login(&ctx.auth, &username, &password).await {
        Ok(()) => {
            output.success(format!("Logged in as {username}"));
            Ok(())
        }
        Err(e) => {
            output.error(format!("Login failed: {e}"));
            Err(e)
        }
    }
}

pub fn run_logout(mut ctx: AppContext, output: &Output) -> Result<()> {
    ctx.session.logout()?;
    output.success("Logged out");
    Ok(())
}

pub fn run_whoami(ctx: AppContext, output: &Output) -> Result<()> {
    match ctx.session.username() {
        Some(username) => match output.format() {
            crate::output::OutputFormat::Human => output.info(username),
            _ => output.json(&json!({"username": username})),
        },
        None => output.info("Not logged in"),
    }
    Ok(())
}
