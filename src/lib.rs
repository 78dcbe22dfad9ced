pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod ui;

pub use clients::HttpClient;
pub use config::Settings;
pub use error::{Error, ResponseError, Result};
pub use models::{Vendor, VendorPage, VendorStatus, VendorType};
pub use services::{VendorBackend, VendorService};
pub use storage::QueryCache;
