use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use multy_core::Command;

use super::send;

/// Lists titled top-level windows as reported by the daemon.
pub fn execute() {
    let response = send::request(&Command::ListWindows);
    if !response.is_ok() {
        send::report(response);
        return;
    }

    let windows = response.windows.unwrap_or_default();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Handle"), Cell::new("Title")]);

    for window in &windows {
        table.add_row(vec![
            Cell::new(window.handle.to_string()),
            Cell::new(&window.title),
        ]);
    }

    println!("{table}");
    println!("\n{} windows found", windows.len());
}
