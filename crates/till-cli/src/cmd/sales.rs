//! `till sales` — the sales page: list, draft + submit, revert.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::{info, warn};

use crate::guard;
use crate::output::{
    pretty_kv, pretty_rule, render_list, render_success, CliError, OutputMode, Renderable,
};
use till_core::draft::{LineField, SaleDraft, ValidationError};
use till_core::error::ErrorCode;
use till_core::fetch::FetchGuard;
use till_core::model::Sale;
use till_core::view::{CollectionView, Direction};
use till_client::ApiError;

#[derive(Subcommand, Debug)]
pub enum SalesCommand {
    /// List confirmed sales with search and column sort.
    List(ListArgs),
    /// Draft and submit a new sale.
    New(NewArgs),
    /// Revert a confirmed sale. Irreversible; requires --yes.
    Revert(RevertArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Free-text filter over id and seller name.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort column.
    #[arg(long, value_parser = ["id", "seller_id", "seller_name", "total", "sale_time"])]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Sale line as `<product-id>:<qty>`; repeat per line. `:<qty>` may be
    /// omitted and defaults to 1.
    #[arg(long = "item", required = true)]
    pub items: Vec<String>,

    /// Seller to record the sale under; defaults to the logged-in user.
    #[arg(long)]
    pub seller_id: Option<i64>,
}

#[derive(Args, Debug)]
pub struct RevertArgs {
    /// Sale id to revert.
    pub sale_id: i64,

    /// Confirm the reversal. There is no undo once the server accepts it.
    #[arg(long)]
    pub yes: bool,
}

impl Renderable for Sale {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, "id", self.id.to_string())?;
        pretty_kv(
            w,
            "seller",
            self.seller_name
                .clone()
                .unwrap_or_else(|| self.seller_id.to_string()),
        )?;
        pretty_kv(w, "total", format!("{:.2}", self.total))?;
        pretty_kv(w, "time", self.sale_time.to_rfc3339())?;
        for item in &self.items {
            writeln!(
                w,
                "    {} x{} @ {:.2}",
                item.product_id, item.qty, item.price
            )?;
        }
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", serde_json::json!(self))
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {:.2}  {}",
            self.id,
            self.seller_name
                .clone()
                .unwrap_or_else(|| self.seller_id.to_string()),
            self.total,
            self.sale_time.to_rfc3339()
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "seller", "total", "time"]
    }
}

pub fn run(command: &SalesCommand, output: OutputMode) -> Result<()> {
    match command {
        SalesCommand::List(args) => run_list(args, output),
        SalesCommand::New(args) => run_new(args, output),
        SalesCommand::Revert(args) => run_revert(args, output),
    }
}

fn run_list(args: &ListArgs, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;

    let mut view: CollectionView<Sale> = CollectionView::new();
    let mut fetches = FetchGuard::new();
    let ticket = fetches.begin();
    let sales = page.client.sales()?;
    if fetches.try_apply(ticket) {
        view.set_raw(sales);
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

/// Load `--item` specs into a draft, keeping each side as entered text; the
/// draft owns all validation.
fn draft_from_specs(specs: &[String]) -> SaleDraft {
    let mut draft = SaleDraft::new();
    for (index, spec) in specs.iter().enumerate() {
        draft.add_line();
        match spec.split_once(':') {
            Some((product_id, qty)) => {
                let _ = draft.update_line(index, LineField::ProductId, product_id);
                let _ = draft.update_line(index, LineField::Quantity, qty);
            }
            None => {
                let _ = draft.update_line(index, LineField::ProductId, spec.as_str());
            }
        }
    }
    draft
}

/// The structural half of line validation: quantity shape and a present
/// product reference. Runs before any request so a garbled spec never costs
/// a round trip; id *resolution* still needs the fetched product collection
/// and happens in `begin_submit`.
fn local_line_errors(draft: &SaleDraft) -> Option<ValidationError> {
    let offending: Vec<usize> = draft
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            line.product_id.trim().is_empty()
                || !line
                    .quantity
                    .trim()
                    .parse::<i64>()
                    .is_ok_and(|qty| qty > 0)
        })
        .map(|(index, _)| index)
        .collect();

    if offending.is_empty() {
        None
    } else {
        Some(ValidationError { lines: offending })
    }
}

fn run_new(args: &NewArgs, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;
    let seller_id = args.seller_id.unwrap_or(page.session.id);

    let mut draft = draft_from_specs(&args.items);
    if let Some(err) = local_line_errors(&draft) {
        return Err(err.into());
    }

    let products = page.client.products()?;
    let payload = draft.begin_submit(seller_id, &products)?;

    match page.client.create_sale(&payload) {
        Ok(sale) => {
            draft.confirm();
            info!(id = sale.id, total = sale.total, "sale confirmed");

            // Success triggers a refetch of the collection the page renders.
            let mut fetches = FetchGuard::new();
            let ticket = fetches.begin();
            let sales = page.client.sales()?;
            let on_record = if fetches.try_apply(ticket) { sales.len() } else { 0 };

            render_success(
                output,
                &format!(
                    "Sale {} confirmed, total {:.2} ({on_record} sales on record)",
                    sale.id, sale.total
                ),
            )?;
            Ok(())
        }
        Err(err @ ApiError::ServerRejected { .. }) => {
            // The draft keeps its lines; echo them so the user can correct
            // and resubmit instead of re-entering everything.
            draft.reject();
            let lines: Vec<String> = draft
                .lines()
                .iter()
                .map(|line| format!("{}:{}", line.product_id, line.quantity))
                .collect();
            warn!(lines = ?lines, "sale rejected by server");
            eprintln!("draft preserved; resubmit with: --item {}", lines.join(" --item "));
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn run_revert(args: &RevertArgs, output: OutputMode) -> Result<()> {
    // A reversal cannot be undone from the client, so it never proceeds on
    // an unconfirmed invocation.
    if !args.yes {
        return Err(CliError::with_message(
            ErrorCode::InvalidArgument,
            format!(
                "reverting sale {} is irreversible; pass --yes to confirm",
                args.sale_id
            ),
        )
        .into());
    }

    let page = guard::require_session()?;
    let ack = page.client.revert_sale(args.sale_id)?;

    // An accepted reversal refreshes the list; a refused one leaves the
    // previously fetched records authoritative.
    let mut fetches = FetchGuard::new();
    let ticket = fetches.begin();
    let sales = page.client.sales()?;
    let on_record = if fetches.try_apply(ticket) { sales.len() } else { 0 };

    let message = ack
        .message
        .unwrap_or_else(|| format!("Sale {} reverted", args.sale_id));
    render_success(output, &format!("{message} ({on_record} sales on record)"))?;
    Ok(())
}
