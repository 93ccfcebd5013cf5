use clap::ValueEnum;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

use cinetrack_models::{Movie, WatchlistMovie};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "warning",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet {
            return;
        }
        self.print_json(data);
    }

    /// Render a movie listing. Human mode gets a table; JSON modes get the
    /// raw array.
    pub fn movie_table(&self, movies: &[Movie]) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => {
                let mut table = Table::new();
                table.set_header(vec![
                    Cell::new("Id").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
                ]);
                for movie in movies {
                    table.add_row(vec![
                        Cell::new(movie.id),
                        Cell::new(&movie.title),
                        Cell::new(movie.year().unwrap_or("-")),
                        Cell::new(format!("{:.1}", movie.vote_average)),
                    ]);
                }
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                println!("{table}");
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&serde_json::to_value(movies).unwrap_or_default());
            }
        }
    }

    /// Render the joined watchlist.
    pub fn watchlist_table(&self, items: &[WatchlistMovie]) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => {
                let mut table = Table::new();
                table.set_header(vec![
                    Cell::new("Id").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Status").add_attribute(comfy_table::Attribute::Bold),
                    Cell::new("Added").add_attribute(comfy_table::Attribute::Bold),
                ]);
                for item in items {
                    table.add_row(vec![
                        Cell::new(item.movie.id),
                        Cell::new(&item.movie.title),
                        Cell::new(item.entry.status.as_str()),
                        Cell::new(item.entry.created_at.format("%Y-%m-%d").to_string()),
                    ]);
                }
                table.load_preset(comfy_table::presets::UTF8_FULL);
                table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                println!("{table}");
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&serde_json::to_value(items).unwrap_or_default());
            }
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{data}");
            }
        }
    }
}
