//! `till reports` — read-only aggregates: daily totals, per-seller totals,
//! low stock, inventory movements.

use std::io::{self, Write};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::guard;
use crate::output::{pretty_kv, pretty_rule, render_list, OutputMode, Renderable};
use till_core::model::{DailySalesRow, LowStockRow, MovementRow, SellerSalesRow};

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// Sales totals per day over a date range.
    Daily(RangeArgs),
    /// Sales totals per seller over a date range.
    Sellers(RangeArgs),
    /// Products at or below their low-stock threshold.
    LowStock,
    /// Recent inventory movements, newest first.
    Movements(MovementsArgs),
}

#[derive(Args, Debug)]
pub struct RangeArgs {
    /// Start of the range (inclusive), `YYYY-MM-DD`.
    #[arg(long)]
    pub from: NaiveDate,

    /// End of the range (inclusive), `YYYY-MM-DD`.
    #[arg(long)]
    pub to: NaiveDate,
}

#[derive(Args, Debug)]
pub struct MovementsArgs {
    /// Page size.
    #[arg(long, default_value_t = 50)]
    pub limit: u32,

    /// Rows to skip.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

impl Renderable for DailySalesRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, "day", self.day.to_string())?;
        pretty_kv(w, "total", format!("{:.2}", self.total))?;
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", serde_json::json!(self))
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  {:.2}", self.day, self.total)
    }

    fn table_headers() -> &'static [&'static str] {
        &["day", "total"]
    }
}

impl Renderable for SellerSalesRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(
            w,
            "seller",
            self.seller_name
                .clone()
                .unwrap_or_else(|| self.seller_id.to_string()),
        )?;
        pretty_kv(w, "total", format!("{:.2}", self.total))?;
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", serde_json::json!(self))
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {:.2}",
            self.seller_id,
            self.seller_name.as_deref().unwrap_or("-"),
            self.total
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["seller_id", "seller", "total"]
    }
}

impl Renderable for LowStockRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, "product", &self.name)?;
        pretty_kv(w, "sku", &self.sku)?;
        pretty_kv(w, "quantity", self.quantity.to_string())?;
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", serde_json::json!(self))
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  {}  {}  {}", self.id, self.sku, self.name, self.quantity)
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "sku", "name", "quantity"]
    }
}

impl Renderable for MovementRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, "product", &self.product_name)?;
        pretty_kv(w, "change", format!("{:+}", self.quantity_change))?;
        pretty_kv(w, "reason", self.reason.as_deref().unwrap_or("-"))?;
        pretty_kv(w, "time", self.created_at.to_rfc3339())?;
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", serde_json::json!(self))
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {:+}  {}  {}",
            self.id,
            self.product_name,
            self.quantity_change,
            self.reason.as_deref().unwrap_or("-"),
            self.created_at.to_rfc3339()
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "product", "change", "reason", "time"]
    }
}

pub fn run(command: &ReportsCommand, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;
    match command {
        ReportsCommand::Daily(args) => {
            let rows = page.client.daily_sales(args.from, args.to)?;
            render_list(&rows, output)?;
        }
        ReportsCommand::Sellers(args) => {
            let rows = page.client.sales_by_seller(args.from, args.to)?;
            render_list(&rows, output)?;
        }
        ReportsCommand::LowStock => {
            let rows = page.client.low_stock()?;
            render_list(&rows, output)?;
        }
        ReportsCommand::Movements(args) => {
            let rows = page.client.inventory_movements(args.limit, args.offset)?;
            render_list(&rows, output)?;
        }
    }
    Ok(())
}
