//! Generate a small sample orders CSV for trying out the application.
//!
//! Run with: `cargo run --bin generate_sample`

use anyhow::{Context, Result};

fn main() -> Result<()> {
    env_logger::init();

    std::fs::create_dir_all("sample_data").context("creating sample_data directory")?;
    let path = "sample_data/orders.csv";
    let mut writer = csv::Writer::from_path(path).context("creating sample CSV")?;

    writer.write_record(["Region", "Product", "Quantity", "Unit_Price", "Discount"])?;

    // Deliberately messy casing and whitespace: the loader normalizes
    // text columns on the way in.
    let rows = [
        ("east ", "widget", "10", "4.50", "0.0"),
        ("WEST", "Widget", "5", "4.50", "0.1"),
        (" East", "gadget", "3", "12.00", "0.0"),
        ("north", "GADGET", "7", "12.00", "0.05"),
        ("South", "widget ", "2", "4.50", "0.0"),
        ("west", "sprocket", "8", "7.25", "0.15"),
        ("NORTH", "Sprocket", "4", "7.25", "0.0"),
        ("south ", "Widget", "6", "4.50", "0.1"),
    ];
    for (region, product, quantity, price, discount) in rows {
        writer.write_record([region, product, quantity, price, discount])?;
    }

    writer.flush().context("flushing sample CSV")?;
    println!("Wrote {path}");
    Ok(())
}
