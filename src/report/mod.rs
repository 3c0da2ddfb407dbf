pub mod currency;
pub mod pdf;

pub use currency::to_readable_num;
pub use pdf::{render_report, ReportRenderError};
