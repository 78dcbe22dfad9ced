#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use vendor_admin::error::{Error, Result};
use vendor_admin::models::{Vendor, VendorPage, VendorStatus, VendorType};
use vendor_admin::services::{VendorBackend, VendorService};
use vendor_admin::ui::{Confirm, ConfirmPrompt, Notifier};
use vendor_admin::Settings;

pub fn vendor(id: &str, status: VendorStatus) -> Vendor {
    Vendor {
        id: id.to_string(),
        store_name: format!("Store {}", id),
        first_name: "Ada".to_string(),
        last_name: "Obi".to_string(),
        email: format!("{}@example.com", id),
        phone_number: "+2348000000000".to_string(),
        address: "1 Marina Rd".to_string(),
        nin: "12345678901".to_string(),
        store_address: "2 Broad St".to_string(),
        password: None,
        incorporation_document_url: String::new(),
        address_proof_url: String::new(),
        vendor_type: VendorType::Individual,
        status,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
    }
}

/// Vendors `{prefix}{start}..{prefix}{start + count - 1}`, all processing.
pub fn vendors(prefix: &str, start: usize, count: usize) -> Vec<Vendor> {
    (start..start + count)
        .map(|n| vendor(&format!("{}{}", prefix, n), VendorStatus::Processing))
        .collect()
}

pub fn vendor_json(id: &str, status: u8) -> Value {
    json!({
        "id": id,
        "storeName": format!("Store {}", id),
        "firstName": "Ada",
        "lastName": "Obi",
        "email": format!("{}@example.com", id),
        "phoneNumber": "+2348000000000",
        "address": "1 Marina Rd",
        "NIN": "12345678901",
        "storeAddress": "2 Broad St",
        "password": "secret",
        "incorporationDocumentURL": "https://cdn.test/cac.pdf",
        "addressProofURL": "https://cdn.test/bill.png",
        "vendorType": 1,
        "status": status,
        "createdAt": "2024-05-01T10:00:00Z"
    })
}

pub fn service_for(base_url: &str) -> VendorService {
    VendorService::from_settings(&Settings::with_base_url(base_url)).unwrap()
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct FakeBackend {
    pub pages: HashMap<Option<String>, VendorPage>,
    pub search: HashMap<String, Vec<Vendor>>,
    pub missing: Vec<String>,
    pub failing: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_page(mut self, cursor: Option<&str>, page: VendorPage) -> Self {
        self.pages.insert(cursor.map(str::to_string), page);
        self
    }

    pub fn with_search(mut self, query: &str, results: Vec<Vendor>) -> Self {
        self.search.insert(query.to_string(), results);
        self
    }

    pub fn with_missing(mut self, id: &str) -> Self {
        self.missing.push(id.to_string());
        self
    }

    /// Every listing and search answers with a server error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutate(&self, action: &str, id: &str) -> Result<()> {
        self.record(format!("{}:{}", action, id));
        if self.missing.iter().any(|missing| missing == id) {
            return Err(Error::VendorNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl VendorBackend for FakeBackend {
    async fn list_vendors(&self, cursor: Option<&str>) -> Result<VendorPage> {
        self.record(format!("list:{}", cursor.unwrap_or("-")));
        if self.failing {
            return Err(Error::ServerError);
        }
        Ok(self
            .pages
            .get(&cursor.map(str::to_string))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_vendor(&self, id: &str) -> Result<Vendor> {
        self.record(format!("get:{}", id));
        self.pages
            .values()
            .flat_map(|page| page.vendors.iter())
            .find(|vendor| vendor.id == id)
            .cloned()
            .ok_or(Error::VendorNotFound)
    }

    async fn search_vendors(&self, query: &str) -> Result<Vec<Vendor>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.record(format!("search:{}", query));
        if self.failing {
            return Err(Error::ServerError);
        }
        Ok(self.search.get(query).cloned().unwrap_or_default())
    }

    async fn delete_vendor(&self, id: &str) -> Result<()> {
        self.mutate("delete", id)
    }

    async fn approve_vendor(&self, id: &str) -> Result<()> {
        self.mutate("approve", id)
    }

    async fn reject_vendor(&self, id: &str) -> Result<()> {
        self.mutate("reject", id)
    }

    async fn suspend_vendor(&self, id: &str) -> Result<()> {
        self.mutate("suspend", id)
    }
}

pub struct ScriptedConfirm {
    pub answer: bool,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool> {
        self.asked.lock().unwrap().push(prompt.title.to_string());
        Ok(self.answer)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
