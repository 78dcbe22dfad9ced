mod vendor;
mod response;

pub use vendor::{Password, Vendor, VendorStatus, VendorType};
pub use response::VendorPage;
