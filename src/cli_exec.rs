use std::path::Path;

use anyhow::{Context, Result};

use product_selector::catalog::CatalogSnapshot;
use product_selector::config::load_config;
use product_selector::selection::SelectionController;

use crate::Commands;

pub(crate) fn handle_command(command: Commands, config_path: &Path) -> Result<()> {
    match command {
        Commands::Products { json } => handle_products(config_path, json),
        Commands::Submit {
            product,
            view,
            json,
        } => handle_submit(config_path, &product, &view, json),
    }
}

fn handle_products(config_path: &Path, json: bool) -> Result<()> {
    let cfg = load_config(config_path)?;
    let catalog = CatalogSnapshot::load(&cfg)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&catalog.products).context("serialize products json")?
        );
        return Ok(());
    }

    if catalog.is_empty() {
        println!("(no products in {})", catalog.source.display());
        return Ok(());
    }
    for p in &catalog.products {
        println!("{} {}", p.id, p.display_name());
        if p.views.is_empty() {
            println!("  (no views)");
        }
        for v in &p.views {
            println!("  {} {}", v.id, v.display_name());
        }
    }
    Ok(())
}

fn handle_submit(config_path: &Path, product_id: &str, view_id: &str, json: bool) -> Result<()> {
    let mut ctl = SelectionController::load(config_path)?;

    let (product_idx, product) = ctl
        .catalog()
        .find(product_id)
        .with_context(|| format!("product {} not found in catalog", product_id))?;
    let view_idx = product
        .views
        .iter()
        .position(|v| v.id == view_id)
        .with_context(|| format!("view {} not found for product {}", view_id, product_id))?;

    ctl.on_product_changed(product_idx);
    ctl.on_view_changed(view_idx);
    let out = ctl.submit()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "ok": out.ok(),
                "message": out.message(),
                "steps": out.steps,
            }))
            .context("serialize submit json")?
        );
    } else {
        for s in &out.steps {
            let mark = if s.outcome.ok { "ok" } else { "FAILED" };
            println!("{:<15} {:<6} {}", s.step.label(), mark, s.outcome.message);
        }
    }

    if !out.ok() {
        anyhow::bail!("one or more calls failed for {}/{}", product_id, view_id);
    }
    Ok(())
}
