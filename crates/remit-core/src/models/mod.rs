//! Data models: raw sheets, canonical rows and configuration.

pub mod config;
pub mod row;
pub mod table;

pub use config::{Layout, PartnerRoute, RemitConfig};
pub use row::{CanonicalRow, Field};
pub use table::{Cell, HeaderedTable, RawTable};
