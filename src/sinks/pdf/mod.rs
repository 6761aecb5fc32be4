mod config;
pub use config::*;

mod fonts;
pub use fonts::*;

mod images;
pub use images::*;

mod labels;
pub use labels::*;

pub mod layout;
mod metrics;

mod rendering;

mod writer;
