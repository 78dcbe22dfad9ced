use crate::models::Vendor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Image,
    Pdf,
}

impl DocumentKind {
    /// URLs ending in `.pdf` are PDFs, everything else is shown as an image.
    pub fn from_url(url: &str) -> Self {
        if url.ends_with(".pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::Image
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "View PDF",
            DocumentKind::Image => "View Image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSlot {
    Incorporation,
    AddressProof,
}

impl DocumentSlot {
    pub fn title(self) -> &'static str {
        match self {
            DocumentSlot::Incorporation => "CAC",
            DocumentSlot::AddressProof => "Proof of Address",
        }
    }

    /// The slot's URL, or `None` when the vendor never uploaded it.
    pub fn url(self, vendor: &Vendor) -> Option<&str> {
        let url = match self {
            DocumentSlot::Incorporation => vendor.incorporation_document_url.as_str(),
            DocumentSlot::AddressProof => vendor.address_proof_url.as_str(),
        };
        (!url.is_empty()).then_some(url)
    }

    /// Documents the vendor actually has, in display order.
    pub fn present(vendor: &Vendor) -> Vec<(DocumentSlot, &str)> {
        [DocumentSlot::Incorporation, DocumentSlot::AddressProof]
            .into_iter()
            .filter_map(|slot| slot.url(vendor).map(|url| (slot, url)))
            .collect()
    }
}

/// Document preview modal on the vendor detail screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewModal {
    open: bool,
    kind: Option<DocumentKind>,
    url: Option<String>,
}

impl PreviewModal {
    pub fn open(&mut self, url: &str) {
        self.open = true;
        self.kind = Some(DocumentKind::from_url(url));
        self.url = Some(url.to_string());
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
