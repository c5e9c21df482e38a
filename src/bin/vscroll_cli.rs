//! CLI tool for vscroll - windows a JSON dataset through a headless view
//!
//! Usage:
//!   vscroll_cli <data.json> [--scroll PX] [--viewport PX] [--cell-height PX]
//!
//! Reads a JSON array (scalars for list mode), simulates a viewport at the
//! given scroll offset, and prints the rendered window.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;

use vscroll::surface::HeadlessSurface;
use vscroll::viewer::ScrollView;
use vscroll::ScrollOptions;

struct Args {
    input: String,
    scroll: f64,
    viewport: f64,
    cell_height: f64,
}

fn parse_args() -> Option<Args> {
    let mut args = env::args().skip(1);
    let input = args.next()?;
    let mut parsed = Args {
        input,
        scroll: 0.0,
        viewport: 600.0,
        cell_height: 50.0,
    };
    while let Some(flag) = args.next() {
        let value = args.next()?.parse().ok()?;
        match flag.as_str() {
            "--scroll" => parsed.scroll = value,
            "--viewport" => parsed.viewport = value,
            "--cell-height" => parsed.cell_height = value,
            _ => return None,
        }
    }
    Some(parsed)
}

fn main() {
    let Some(args) = parse_args() else {
        eprintln!(
            "Usage: vscroll_cli <data.json> [--scroll PX] [--viewport PX] [--cell-height PX]"
        );
        std::process::exit(1);
    };

    let raw = match fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let data: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing JSON: {}", e);
            std::process::exit(1);
        }
    };

    let options = ScrollOptions {
        data,
        cell_height: args.cell_height,
        ..ScrollOptions::default()
    };

    let mut view = match ScrollView::new(HeadlessSurface::new(), &options, args.viewport, 0.0) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error building view: {}", e);
            std::process::exit(1);
        }
    };
    view.on_scroll(args.scroll);

    println!(
        "rows={} pool={} index={} max={}",
        view.data_len(),
        view.pool_len(),
        view.current_index(),
        view.max_display_count()
    );
    let root = view.surface().root().clone();
    for slot in 0..root.child_count() {
        if let Some(node) = root.child(slot) {
            println!("[{}] {}", view.current_index() + slot, node.text());
        }
    }
}
