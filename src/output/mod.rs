pub mod formatter;

pub use formatter::{
    format_diagnosis, format_impact, format_json, format_ranking_table, format_tsv,
    should_use_colors,
};
