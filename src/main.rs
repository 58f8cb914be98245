use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use picklist::{
    MemoryBackend, MultiLookup, PopupAnchor, PopupEvent, PopupOptions, Record, create_lookup,
    create_multi_ds_lookup, theme, tui,
};

const PRODUCTS: &str = "db/example_data/products";
const CUSTOMERS: &str = "db/example_data/customers";
const EMPLOYEES: &str = "db/example_data/employees";

/// Demo for the picklist popup: searches three sample datasources.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Initial search text to seed the popup with.
    #[arg(short, long)]
    query: Option<String>,

    /// Search only the products datasource instead of all three.
    #[arg(long)]
    single: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    color_eyre::install()?;

    let backend = Arc::new(sample_backend());
    let anchor = PopupAnchor::new(Rect::new(2, 1, 50, 3));
    let options = PopupOptions {
        initial_value: cli.query.clone(),
        ..PopupOptions::default()
    };

    let mut terminal = tui::init()?;
    let outcome = run_popup(&mut terminal, backend, anchor, options, cli.single).await;
    tui::restore()?;

    match outcome? {
        Some(selection) => {
            let datasource = selection.datasource.as_deref().unwrap_or(PRODUCTS);
            println!(
                "selected: {} ({}) from {} [search: \"{}\"]",
                selection.record.id(),
                selection
                    .record
                    .attribute_text("productname")
                    .or_else(|| selection.record.attribute_text("companyname"))
                    .or_else(|| selection.record.attribute_text("firstname"))
                    .unwrap_or_default(),
                datasource,
                selection.search_text,
            );
        }
        None => println!("cancelled"),
    }
    Ok(())
}

async fn run_popup(
    terminal: &mut tui::Tui,
    backend: Arc<MemoryBackend>,
    anchor: PopupAnchor,
    options: PopupOptions,
    single: bool,
) -> Result<Option<picklist::Selection>> {
    let (mut popup, handle) = if single {
        product_lookup().show_popup(backend, anchor, options)?
    } else {
        multi_lookup().show_popup(backend, anchor, options)?
    };

    loop {
        terminal.draw(|frame| {
            let hint = Paragraph::new("Type to search, Enter to pick, Esc to cancel")
                .style(Style::default().fg(theme::MUTED_COLOR))
                .block(Block::default().borders(Borders::ALL).title(" picklist demo "));
            frame.render_widget(hint, anchor.area);
            popup.render(frame);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match popup.handle_key(key)? {
                PopupEvent::Pending => {}
                PopupEvent::Selected | PopupEvent::Cancelled => break,
            }
        }
    }

    Ok(handle.resolved().await)
}

/// Field configuration from the classic multi-datasource lookup example.
fn multi_lookup() -> MultiLookup {
    let mut multi = create_multi_ds_lookup([PRODUCTS]);

    let products = multi.lookup_mut(PRODUCTS).expect("just added");
    products.add_field("categoryname").set_title_text("Category");
    products.add_field("productname").set_title_text("Product");
    products.add_field("companyname").set_title_text("Supplier");
    products.set_display_field("productname");
    products.set_header("Products");

    let customers = multi.add_lookup(CUSTOMERS);
    customers.add_field("companyname").set_title_text("Company");
    customers.add_field("country").set_title_text("Country");
    customers.set_display_field("companyname");
    customers.set_header("Customers");

    let employees = multi.add_lookup(EMPLOYEES);
    employees.add_field("firstname").set_title_text("First Name");
    employees.add_field("lastname").set_title_text("Last Name");
    employees.set_display_field("firstname");
    employees.set_header("Employees");

    multi
}

fn product_lookup() -> picklist::Lookup {
    let mut lookup = create_lookup(PRODUCTS);
    lookup.add_field("categoryname").set_title_text("Category");
    lookup.add_field("productname").set_title_text("Product");
    lookup.set_display_field("productname");
    lookup
}

fn record(id: &str, values: serde_json::Value) -> Record {
    let serde_json::Value::Object(map) = values else {
        unreachable!("sample rows are JSON objects");
    };
    Record::with_values(id, map)
}

fn sample_backend() -> MemoryBackend {
    let mut backend = MemoryBackend::new();

    backend.add_datasource(
        PRODUCTS,
        vec![
            record("p1", json!({"productname": "Chai", "categoryname": "Beverages", "companyname": "Exotic Liquids"})),
            record("p2", json!({"productname": "Chang", "categoryname": "Beverages", "companyname": "Exotic Liquids"})),
            record("p3", json!({"productname": "Chocolade", "categoryname": "Confections", "companyname": "Zaanse Snoepfabriek"})),
            record("p4", json!({"productname": "Tofu", "categoryname": "Produce", "companyname": "Mayumi's"})),
            record("p5", json!({"productname": "Pavlova", "categoryname": "Confections", "companyname": "Pavlova Ltd."})),
        ],
    );

    backend.add_datasource(
        CUSTOMERS,
        vec![
            record("c1", json!({"companyname": "Around the Horn", "country": "UK"})),
            record("c2", json!({"companyname": "Bolido Comidas preparadas", "country": "Spain"})),
            record("c3", json!({"companyname": "Comercio Mineiro", "country": "Brazil"})),
            record("c4", json!({"companyname": "Island Trading", "country": "UK"})),
        ],
    );

    backend.add_datasource(
        EMPLOYEES,
        vec![
            record("e1", json!({"firstname": "Nancy", "lastname": "Davolio"})),
            record("e2", json!({"firstname": "Andrew", "lastname": "Fuller"})),
            record("e3", json!({"firstname": "Janet", "lastname": "Leverling"})),
        ],
    );

    backend
}
