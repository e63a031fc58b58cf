pub mod formatting;

pub use formatting::{format_active_filters, format_item, format_page_labels};
