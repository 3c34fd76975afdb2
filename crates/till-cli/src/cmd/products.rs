//! `till products` — the product page: list (with joined stock), creation,
//! updates, and stock adjustments.

use std::io::{self, Write};
use std::str::FromStr;

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use crate::guard;
use crate::output::{
    pretty_kv, pretty_rule, render_list, render_success, OutputMode, Renderable,
};
use till_core::fetch::FetchGuard;
use till_core::join::JoinIndex;
use till_core::model::{NewProduct, ProductRow, ProductStatus, StockAdjustment};
use till_core::view::{CollectionView, Direction};

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// List products with stock, search, and column sort.
    List(ListArgs),
    /// Create a product.
    Create(CreateArgs),
    /// Update an existing product.
    Update(UpdateArgs),
    /// Adjust a product's stock level.
    Stock(StockArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Free-text filter over name and SKU.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort column.
    #[arg(long, value_parser = ["id", "sku", "name", "price", "stock", "type", "status"])]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub sku: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub price: f64,

    /// Product type (free text, e.g. "beverage").
    #[arg(long = "type", default_value = "")]
    pub kind: String,

    /// active or inactive.
    #[arg(long, default_value = "active")]
    pub status: String,

    /// Opening stock level (create only).
    #[arg(long)]
    pub initial_stock: Option<i64>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Product id.
    pub id: i64,

    #[arg(long)]
    pub sku: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub price: f64,

    #[arg(long = "type", default_value = "")]
    pub kind: String,

    #[arg(long, default_value = "active")]
    pub status: String,
}

#[derive(Args, Debug)]
pub struct StockArgs {
    /// Product id.
    pub id: i64,

    /// Signed quantity change (negative removes stock).
    #[arg(long, allow_hyphen_values = true)]
    pub change: i64,

    /// Why the stock moved; validated server-side.
    #[arg(long)]
    pub reason: String,
}

impl Renderable for ProductRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        pretty_kv(w, "id", self.product.id.to_string())?;
        pretty_kv(w, "sku", &self.product.sku)?;
        pretty_kv(w, "name", &self.product.name)?;
        pretty_kv(w, "price", format!("{:.2}", self.product.price))?;
        pretty_kv(w, "stock", self.stock.to_string())?;
        pretty_kv(w, "type", self.product.kind.as_deref().unwrap_or("-"))?;
        pretty_kv(w, "status", self.product.status.to_string())?;
        pretty_rule(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", serde_json::json!(self))
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {:.2}  {}  {}",
            self.product.id,
            self.product.sku,
            self.product.name,
            self.product.price,
            self.stock,
            self.product.status
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "sku", "name", "price", "stock", "status"]
    }
}

pub fn run(command: &ProductsCommand, output: OutputMode) -> Result<()> {
    match command {
        ProductsCommand::List(args) => run_list(args, output),
        ProductsCommand::Create(args) => run_create(args, output),
        ProductsCommand::Update(args) => run_update(args, output),
        ProductsCommand::Stock(args) => run_stock(args, output),
    }
}

/// The canonical page composition: fetch both collections, join stock onto
/// products, then derive the filtered + sorted view.
fn run_list(args: &ListArgs, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;

    let mut view: CollectionView<ProductRow> = CollectionView::new();
    let mut fetches = FetchGuard::new();

    let ticket = fetches.begin();
    let products = page.client.products()?;
    let inventory = page.client.inventory()?;
    if fetches.try_apply(ticket) {
        let stock = JoinIndex::build(&inventory, |r| r.product_id, |r| r.quantity);
        let rows = products
            .into_iter()
            .map(|product| {
                let quantity = stock.lookup(&product.id, 0);
                ProductRow { product, stock: quantity }
            })
            .collect();
        view.set_raw(rows);
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

fn run_create(args: &CreateArgs, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;
    let product = page.client.create_product(&NewProduct {
        sku: args.sku.clone(),
        name: args.name.clone(),
        price: args.price,
        kind: args.kind.clone(),
        status: ProductStatus::from_str(&args.status)?,
        initial_stock: args.initial_stock,
    })?;
    info!(id = product.id, "product created");
    render_success(output, &format!("Created {} (id {})", product.name, product.id))?;
    Ok(())
}

fn run_update(args: &UpdateArgs, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;
    let product = page.client.update_product(
        args.id,
        &NewProduct {
            sku: args.sku.clone(),
            name: args.name.clone(),
            price: args.price,
            kind: args.kind.clone(),
            status: ProductStatus::from_str(&args.status)?,
            initial_stock: None,
        },
    )?;
    render_success(output, &format!("Updated {} (id {})", product.name, product.id))?;
    Ok(())
}

fn run_stock(args: &StockArgs, output: OutputMode) -> Result<()> {
    let page = guard::require_session()?;
    let ack = page.client.adjust_stock(
        args.id,
        &StockAdjustment {
            quantity_change: args.change,
            reason: args.reason.clone(),
            user_id: page.session.id,
        },
    )?;

    // Refresh the affected row so the confirmation shows the level the
    // server actually landed on.
    let row = page.client.inventory_for(args.id)?;
    let note = ack.message.unwrap_or_else(|| "Stock adjusted".to_string());
    render_success(
        output,
        &format!("{note}: product {} now at {}", args.id, row.quantity),
    )?;
    Ok(())
}
