//! Helper utilities for PDF rendering

pub mod colors;
pub mod compress;
pub mod encoding;
pub mod format;
pub mod layer;
pub mod pagination;
pub mod text_metrics;

pub use colors::{BLACK, BORDER};
pub use compress::{compress_pdf, save_document};
pub use encoding::to_winansi;
pub use layer::{Align, LayerBuilder};
pub use pagination::{ColumnFlow, FlowMetrics, Grid, PagePlan, Placement};
pub use text_metrics::{get_builtin_measurer, get_helvetica_measurer, BuiltinFontMeasurer};
