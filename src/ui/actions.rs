use tracing::{info, warn};
use crate::error::Result;
use crate::models::VendorStatus;
use crate::services::VendorBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Approve,
    Reject,
    Suspend,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    Danger,
    Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: PromptVariant,
}

const ARE_YOU_SURE: &str = "Are you sure you want to do this?";

impl RowAction {
    /// Actions offered in a row's menu. Suspend is never listed; it is only
    /// reachable directly.
    pub fn available_for(status: VendorStatus) -> Vec<RowAction> {
        if status.is_pending() {
            vec![RowAction::Approve, RowAction::Reject, RowAction::Delete]
        } else {
            vec![RowAction::Delete]
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RowAction::Approve => "Approve",
            RowAction::Reject => "Reject",
            RowAction::Suspend => "Suspend",
            RowAction::Delete => "Delete",
        }
    }

    pub fn prompt(self) -> ConfirmPrompt {
        match self {
            RowAction::Approve => ConfirmPrompt {
                title: "Approve Vendor",
                description: ARE_YOU_SURE,
                variant: PromptVariant::Confirmation,
            },
            RowAction::Reject => ConfirmPrompt {
                title: "Reject Vendor",
                description: ARE_YOU_SURE,
                variant: PromptVariant::Danger,
            },
            RowAction::Suspend => ConfirmPrompt {
                title: "Suspend Vendor",
                description: ARE_YOU_SURE,
                variant: PromptVariant::Danger,
            },
            RowAction::Delete => ConfirmPrompt {
                title: "Delete Vendor",
                description: "Are you sure you want to do this? Once deleted, all products created by this vendor will be removed as well.",
                variant: PromptVariant::Danger,
            },
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            RowAction::Approve => "Successfully approved vendor",
            RowAction::Reject => "Successfully rejected vendor",
            RowAction::Suspend => "Successfully suspended vendor",
            RowAction::Delete => "Successfully deleted vendor",
        }
    }

    async fn perform<B>(self, backend: &B, id: &str) -> Result<()>
    where
        B: VendorBackend + ?Sized,
    {
        match self {
            RowAction::Approve => backend.approve_vendor(id).await,
            RowAction::Reject => backend.reject_vendor(id).await,
            RowAction::Suspend => backend.suspend_vendor(id).await,
            RowAction::Delete => backend.delete_vendor(id).await,
        }
    }
}

/// Blocking yes/no question shown before a mutation.
pub trait Confirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool>;
}

pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Declined,
    Succeeded,
    Failed(String),
}

/// Confirm, then mutate, then report through `notifier`.
pub async fn run_row_action<B>(
    backend: &B,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
    action: RowAction,
    id: &str,
) -> ActionOutcome
where
    B: VendorBackend + ?Sized,
{
    let confirmed = match confirm.confirm(&action.prompt()) {
        Ok(confirmed) => confirmed,
        Err(e) => {
            let message = e.to_string();
            notifier.error(&message);
            return ActionOutcome::Failed(message);
        }
    };

    if !confirmed {
        info!(vendor_id = id, action = action.label(), "Action declined");
        return ActionOutcome::Declined;
    }

    match action.perform(backend, id).await {
        Ok(()) => {
            notifier.success(action.success_message());
            ActionOutcome::Succeeded
        }
        Err(e) => {
            let message = e.to_string();
            warn!(vendor_id = id, action = action.label(), error = %message, "Action failed");
            notifier.error(&message);
            ActionOutcome::Failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_vendors_offer_review_actions() {
        assert_eq!(
            RowAction::available_for(VendorStatus::Processing),
            vec![RowAction::Approve, RowAction::Reject, RowAction::Delete]
        );
        assert_eq!(RowAction::available_for(VendorStatus::Approved), vec![RowAction::Delete]);
        assert_eq!(RowAction::available_for(VendorStatus::Rejected), vec![RowAction::Delete]);
    }

    #[test]
    fn prompts_match_actions() {
        assert_eq!(RowAction::Delete.prompt().title, "Delete Vendor");
        assert!(RowAction::Delete.prompt().description.contains("all products"));
        assert_eq!(RowAction::Approve.prompt().variant, PromptVariant::Confirmation);
        assert_eq!(RowAction::Suspend.success_message(), "Successfully suspended vendor");
    }
}
