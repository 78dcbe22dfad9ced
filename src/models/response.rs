use serde::{Deserialize, Serialize};

use super::Vendor;

/// One page of the cursor-paginated listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorPage {
    pub vendors: Vec<Vendor>,
    /// Continuation token; `None` on the last page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl VendorPage {
    pub fn has_next(&self) -> bool {
        self.cursor.is_some()
    }
}
