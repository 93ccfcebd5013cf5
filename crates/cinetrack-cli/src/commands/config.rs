use anyhow::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::commands::AppContext;
use crate::output::Output;

pub fn run_show(ctx: AppContext, output: &Output) -> Result<()> {
    match output.format() {
        crate::output::OutputFormat::Human => {
            let mut table = Table::new();
            table.add_row(vec![
                Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(ctx.paths.config_file().display().to_string()),
            ]);
            table.add_row(vec![
                Cell::new("Session File").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(ctx.paths.session_file().display().to_string()),
            ]);
            table.add_row(vec![
                Cell::new("API Base URL").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(&ctx.config.api.base_url),
            ]);
            table.add_row(vec![
                Cell::new("Timeout (s)").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(ctx.config.api.timeout_secs),
            ]);
            table.add_row(vec![
                Cell::new("Logged In As").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(ctx.session.username().unwrap_or("-")),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{table}");
        }
        _ => {
            output.json(&json!({
                "config_file": ctx.paths.config_file(),
                "session_file": ctx.paths.session_file(),
                "base_url": ctx.config.api.base_url,
                "timeout_secs": ctx.config.api.timeout_secs,
                "username": ctx.session.username(),
            }));
        }
    }
    Ok(())
}

/// Write the effective configuration to disk so it can be edited.
pub fn run_init(ctx: AppContext, output: &Output) -> Result<()> {
    ctx.paths.ensure_directories()?;
    let path = ctx.paths.config_file();
    ctx.config.save_to_file(&path)?;
    output.success(format!("Wrote {}", path.display()));
    Ok(())
}
