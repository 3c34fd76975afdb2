//! `till login`, `till logout`, `till whoami` — the session lifecycle.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::guard;
use crate::output::{
    pretty_kv, pretty_rule, render_item, render_success, CliError, OutputMode, Renderable,
};
use till_core::error::ErrorCode;
use till_core::session::{Session, SessionState, SessionStore};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to log in as.
    #[arg(short, long)]
    pub username: String,

    /// Password; falls back to the TILL_PASSWORD environment variable.
    #[arg(short, long)]
    pub password: Option<String>,
}

pub fn run_login(args: &LoginArgs, output: OutputMode) -> Result<()> {
    let Some(password) = args
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

    let client = guard::anonymous_client()?;
    let auth = client.login(&args.username, &password)?;
    let session = auth.into_session();
    SessionStore::open_default().save(&session)?;

    info!(username = %session.username, "logged in");
    render_success(
        output,
        &format!("Logged in as {} ({})", session.username, session.role),
    )?;
    Ok(())
}

pub fn run_logout(output: OutputMode) -> Result<()> {
    // Identity and token are cleared together; the store never leaves a
    // half-logged-out pair behind.
    SessionStore::open_default().clear()?;
    render_success(output, "Logged out")?;
    Ok(())
}

struct SessionView(Session);

impl Renderable for SessionView {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, "id", self.0.id.to_string())?;
        pretty_kv(w, "username", &self.0.username)?;
        pretty_kv(w, "role", self.0.role.to_string())?;
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        let value = serde_json::json!({
            "id": self.0.id,
            "username": self.0.username,
            "role": self.0.role,
        });
        writeln!(w, "{value}")
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  {}  {}", self.0.id, self.0.username, self.0.role)
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "username", "role"]
    }
}

pub fn run_whoami(output: OutputMode) -> Result<()> {
    // whoami only reads the cached session; it deliberately issues no
    // request, mirroring the guard's pure-read contract.
    let store = SessionStore::open_default();
    match store.check()? {
        SessionState::Present(session) => {
            render_item(&SessionView(session), output)?;
            Ok(())
        }
        SessionState::Absent => Err(till_client::ApiError::Unauthenticated.into()),
    }
}
