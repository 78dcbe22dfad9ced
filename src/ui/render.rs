use std::fmt::Write;
use console::{style, StyledObject};
use crate::models::{Vendor, VendorStatus};
use super::actions::RowAction;
use super::preview::{DocumentKind, DocumentSlot, PreviewModal};
use super::table::{VendorTable, ViewState};

/// Truncate a string to max_len, adding "..." if truncated.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Returned styled so `{:<N}` pads the label, not the escape codes.
fn status_badge(status: VendorStatus) -> StyledObject<&'static str> {
    let label = style(status.label());
    match status {
        VendorStatus::Processing => label.yellow(),
        VendorStatus::Approved => label.green(),
        VendorStatus::Rejected => label.red(),
    }
}

fn actions_column(status: VendorStatus) -> String {
    RowAction::available_for(status)
        .into_iter()
        .map(RowAction::label)
        .collect::<Vec<_>>()
        .join("/")
}

pub fn render_table(table: &VendorTable) -> String {
    let mut out = String::new();

    match table.view_state() {
        ViewState::Loading => return "Loading...\n".to_string(),
        ViewState::NoData => return "No Data\n".to_string(),
        ViewState::Ready => {}
    }

    // Columns: #(3) STORE(28) NAME(24) EMAIL(30) PHONE(16) STATUS(12) ACTIONS
    let _ = writeln!(
        out,
        "{:<3} {:<28} {:<24} {:<30} {:<16} {:<12} {}",
        style("#").bold(),
        style("STORE NAME").bold(),
        style("NAME").bold(),
        style("EMAIL").bold(),
        style("PHONE NUMBER").bold(),
        style("STATUS").bold(),
        style("ACTIONS").bold()
    );
    let _ = writeln!(out, "{}", "-".repeat(128));

    for (index, vendor) in table.rows().iter().enumerate() {
        let store = format!("[{}] {}", vendor.vendor_type.badge(), vendor.store_name);
        let _ = writeln!(
            out,
            "{:<3} {:<28} {:<24} {:<30} {:<16} {:<12} {}",
            index + 1,
            truncate_str(&store, 28),
            truncate_str(&vendor.full_name(), 24),
            truncate_str(&vendor.email, 30),
            truncate_str(&vendor.phone_number, 16),
            status_badge(vendor.status),
            actions_column(vendor.status)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} vendor(s) · page {} of {} · {} {}",
        style(table.rows().len()).cyan(),
        table.page_index() + 1,
        table.page_count(),
        if table.can_previous_page() { "[p]revious" } else { "-" },
        if table.can_next_page() { "[n]ext" } else { "-" }
    );

    out
}

pub fn render_detail(vendor: &Vendor) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "({}) {} [{}] {}",
        vendor.initials(),
        style(&vendor.store_name).bold(),
        vendor.vendor_type.label(),
        status_badge(vendor.status)
    );
    let _ = writeln!(out, "{}", style(&vendor.email).dim());
    let _ = writeln!(out);

    let fields = [
        ("First Name", vendor.first_name.as_str()),
        ("Last Name", vendor.last_name.as_str()),
        ("Email", vendor.email.as_str()),
        ("Phone Number", vendor.phone_number.as_str()),
        ("Address", vendor.address.as_str()),
        ("Store Address", vendor.store_address.as_str()),
        ("NIN", vendor.nin.as_str()),
    ];
    for (label, value) in fields {
        let _ = writeln!(out, "{:<16} {}", style(label).dim(), value);
    }
    let _ = writeln!(
        out,
        "{:<16} {}",
        style("Created").dim(),
        vendor.created_at.format("%Y-%m-%d %H:%M:%S")
    );

    let documents = DocumentSlot::present(vendor);
    if !documents.is_empty() {
        let _ = writeln!(out);
        for (slot, url) in documents {
            let _ = writeln!(
                out,
                "{:<16} {} ({})",
                style(slot.title()).bold(),
                DocumentKind::from_url(url).button_label(),
                url
            );
        }
    }

    out
}

pub fn render_preview(modal: &PreviewModal) -> String {
    match (modal.is_open(), modal.kind(), modal.url()) {
        (true, Some(DocumentKind::Pdf), Some(url)) => {
            format!("PDF document: {}\n", style(url).cyan())
        }
        (true, Some(DocumentKind::Image), Some(url)) => {
            format!("Image: {}\n", style(url).cyan())
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_str("Mama Put Kitchen", 28), "Mama Put Kitchen");
        assert_eq!(truncate_str("Ọ̀yọ́ Fabrics and Textiles", 10).chars().count(), 10);
        assert_eq!(truncate_str("héllo wörld", 8), "héllo...");
        assert_eq!(truncate_str("ñandú", 5), "ñandú");
        assert_eq!(truncate_str("abcdef", 2), "...");
    }

    #[test]
    fn coloured_status_pads_to_column_width() {
        let cell = format!("{:<12}|", status_badge(VendorStatus::Approved).force_styling(true));
        assert!(cell.contains('\u{1b}'));
        assert_eq!(console::strip_ansi_codes(&cell), "Approved    |");
    }

    #[test]
    fn empty_table_is_loading() {
        let table = VendorTable::default();
        assert_eq!(render_table(&table), "Loading...\n");
    }

    #[test]
    fn closed_preview_renders_nothing() {
        assert!(render_preview(&PreviewModal::default()).is_empty());
    }
}
