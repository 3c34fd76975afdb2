//! `till employees` — the employee page: list with search/sort, creation,
//! shifts, and attendance.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use crate::guard;
use crate::output::{
    pretty_kv, pretty_rule, render_list, render_success, OutputMode, Renderable,
};
use till_core::fetch::FetchGuard;
use till_core::model::{Employee, NewShift, Shift};
use till_core::view::{CollectionView, Direction};

#[derive(Subcommand, Debug)]
pub enum EmployeesCommand {
    /// List employees with optional search and column sort.
    List(ListArgs),
    /// Create an employee (admin registers on their behalf).
    Create(crate::cmd::register::RegisterArgs),
    /// Show an employee's weekly shifts.
    Shifts(ShiftsArgs),
    /// Add a weekly shift for an employee.
    AddShift(AddShiftArgs),
    /// Clock an employee in.
    ClockIn(AttendanceArgs),
    /// Clock an employee out.
    ClockOut(AttendanceArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Free-text filter over id, username, full name and email.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort column.
    #[arg(long, value_parser = ["id", "username", "full_name", "email", "role"])]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Args, Debug)]
pub struct ShiftsArgs {
    /// Employee id.
    pub user_id: i64,
}

#[derive(Args, Debug)]
pub struct AddShiftArgs {
    #[arg(long)]
    pub user_id: i64,

    /// Day of week, 0 = Sunday through 6 = Saturday.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub day: u8,

    #[arg(long, default_value = "08:00")]
    pub start: String,

    #[arg(long, default_value = "16:00")]
    pub end: String,
}

#[derive(Args, Debug)]
pub struct AttendanceArgs {
    /// Employee id; defaults to the logged-in user.
    pub user_id: Option<i64>,
}

impl Renderable for Employee {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, "id", self.id.to_string())?;
        pretty_kv(w, "username", &self.username)?;
        pretty_kv(w, "name", self.full_name.as_deref().unwrap_or("-"))?;
        pretty_kv(w, "email", self.email.as_deref().unwrap_or("-"))?;
        pretty_kv(w, "role", self.role.to_string())?;
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", serde_json::json!(self))
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.id,
            self.username,
            self.full_name.as_deref().unwrap_or("-"),
            self.role
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "username", "name", "role"]
    }
}

impl Renderable for Shift {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, "id", self.id.to_string())?;
        pretty_kv(w, "day", self.day_of_week.to_string())?;
        pretty_kv(w, "start", &self.start_time)?;
        pretty_kv(w, "end", &self.end_time)?;
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", serde_json::json!(self))
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.id, self.day_of_week, self.start_time, self.end_time
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "day", "start", "end"]
    }
}

pub fn run(command: &EmployeesCommand, output: OutputMode) -> Result<()> {
    match command {
        EmployeesCommand::List(args) => run_list(args, output),
        EmployeesCommand::Create(args) => run_create(args, output),
        EmployeesCommand::Shifts(args) => run_shifts(args, output),
        EmployeesCommand::AddShift(args) => run_add_shift(args, output),
        EmployeesCommand::ClockIn(args) => run_clock(args, output, true),
        EmployeesCommand::ClockOut(args) => run_clock(args, output, false),
    }
}

fn run_list(args: &ListArgs, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;

    let mut view: CollectionView<Employee> = CollectionView::new();
    let mut fetches = FetchGuard::new();
    let ticket = fetches.begin();
    let employees = page.client.employees()?;
    if fetches.try_apply(ticket) {
        view.set_raw(employees);
    }

    if let Some(search) = &args.search {
        view.set_filter(search.clone());
    }
    if let Some(key) = &args.sort {
        let direction = if args.desc { Direction::Desc } else { Direction::Asc };
        view.set_sort(key, direction);
    }

    render_list(&view.derive(), output)?;
    Ok(())
}

fn run_create(args: &crate::cmd::register::RegisterArgs, output: OutputMode) -> Result<()> {
    let body = args.to_body()?;
    let page = guard::require_session()?;
    let auth = page.client.register(&body)?;
    info!(id = auth.id, "employee created");
    render_success(output, &format!("Created {} (id {})", auth.username, auth.id))?;
    Ok(())
}

fn run_shifts(args: &ShiftsArgs, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;
    let shifts = page.client.shifts_for(args.user_id)?;
    render_list(&shifts, output)?;
    Ok(())
}

fn run_add_shift(args: &AddShiftArgs, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;
    let shift = page.client.create_shift(&NewShift {
        user_id: args.user_id,
        day_of_week: args.day,
        start_time: args.start.clone(),
        end_time: args.end.clone(),
    })?;
    render_success(
        output,
        &format!("Shift {} added for user {}", shift.id, shift.user_id),
    )?;
    Ok(())
}

fn run_clock(args: &AttendanceArgs, output: OutputMode, clock_in: bool) -> Result<()> {
    let page = guard::require_session()?;
    let user_id = args.user_id.unwrap_or(page.session.id);

    let ack = if clock_in {
        page.client.clock_in(user_id)?
    } else {
        page.client.clock_out(user_id)?
    };

    let fallback = if clock_in { "Clock-in recorded" } else { "Clock-out recorded" };
    render_success(output, ack.message.as_deref().unwrap_or(fallback))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ListArgs;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ListArgs,
    }

    #[test]
    fn list_args_default_to_no_filter_no_sort() {
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.search.is_none());
        assert!(w.args.sort.is_none());
        assert!(!w.args.desc);
    }

    #[test]
    fn desc_requires_sort() {
        assert!(Wrapper::try_parse_from(["test", "--desc"]).is_err());
        let w = Wrapper::parse_from(["test", "--sort", "username", "--desc"]);
        assert_eq!(w.args.sort.as_deref(), Some("username"));
        assert!(w.args.desc);
    }

    #[test]
    fn unknown_sort_key_is_rejected_at_parse() {
        assert!(Wrapper::try_parse_from(["test", "--sort", "height"]).is_err());
    }
}
