//! login / logout / whoami

use std::io::{self, Write};

use anyhow::{Result, bail};

use super::read_line;
use crate::context::Context;

pub async fn login(ctx: &mut Context, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => {
            print!("Password: ");
            io::stdout().flush()?;
            read_line()?
        }
    };
    if password.is_empty() {
        bail!("Password is required");
    }

    let profile = ctx.session_mut().login(email, &password).await?;
    println!("Signed in as {} ({})", profile.email, profile.role);
    if let Some(org) = profile.org_id() {
        println!("Organization: {}", org);
    }
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    ctx.session_mut().logout()?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    let profile = ctx.profile()?;
    println!("Email:  {}", profile.email);
    if !profile.full_name.is_empty() {
        println!("Name:   {}", profile.full_name);
    }
    println!("Role:   {}", profile.role);
    println!("Org:    {}", profile.org_id().unwrap_or("network-wide"));
    println!("Server: {}", ctx.config().base_url);
    Ok(())
}
