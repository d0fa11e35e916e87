//! Tabular sink: console table and file export of provision records.

mod table;
mod writer;

pub use table::render_table;
pub use writer::{
    generate_yaml, render_csv, render_records, save_join_report, save_records,
};
