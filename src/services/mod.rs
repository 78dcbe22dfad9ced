pub mod vendor;

pub use vendor::{VendorBackend, VendorService, LISTING_KEY, PAGE_SIZE};
