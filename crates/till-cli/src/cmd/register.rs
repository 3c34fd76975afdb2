//! `till register` — create an account through the public auth endpoint.

use std::str::FromStr;

use anyhow::Result;
use clap::Args;

use crate::guard;
use crate::output::{render_success, CliError, OutputMode};
use till_core::error::ErrorCode;
use till_core::model::{NewEmployee, Role};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,

    #[arg(long, default_value = "")]
    pub full_name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    /// Password; falls back to the TILL_PASSWORD environment variable.
    #[arg(short, long)]
    pub password: Option<String>,

    /// Role: admin or seller.
    #[arg(long, default_value = "seller")]
    pub role: String,
}

impl RegisterArgs {
    pub fn to_body(&self) -> Result<NewEmployee> {
        let Some(password) = self
            .password
            .clone()
            .or_else(|| std::env::var("TILL_PASSWORD").ok())
        else {
            return Err(CliError::with_message(
                ErrorCode::InvalidArgument,
                "missing password: pass --password or set TILL_PASSWORD",
            )
            .into());
        };
        let role = Role::from_str(&self.role)?;
        Ok(NewEmployee {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            password,
            role,
        })
    }
}

pub fn run_register(args: &RegisterArgs, output: OutputMode) -> Result<()> {
    let body = args.to_body()?;
    let client = guard::anonymous_client()?;
    let auth = client.register(&body)?;
    render_success(
        output,
        &format!("Registered {} (id {})", auth.username, auth.id),
    )?;
    Ok(())
}
