pub mod formatter;

pub use formatter::{
    format_category, format_json, format_ratio, format_reference, format_results_table,
    format_summary, should_use_colors,
};
