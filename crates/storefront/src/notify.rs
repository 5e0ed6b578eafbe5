//! User notifications.
//!
//! Every piece of feedback the widgets give (success or rejection) goes
//! through a [`Notifier`]. Tests substitute [`RecordingNotifier`].

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ProductUploaded,
    AddedToCart,
    EmptyCart,
    OrderPlaced {
        full_name: String,
        address: String,
        total_label: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductUploaded => f.write_str("Product uploaded successfully!"),
            Self::AddedToCart => f.write_str("Product added to cart!"),
            Self::EmptyCart => f.write_str("Your cart is empty!"),
            Self::OrderPlaced {
                full_name,
                address,
                total_label,
            } => write!(
                f,
                "Order Placed for {full_name}!\n\n\
                 Delivery Address: {address}\n\n\
                 {total_label}\n\n\
                 Thank you for your order! You will pay on delivery."
            ),
        }
    }
}

/// Capability to show a notice to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Sends notices to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::info!(notice = %notice, "User notice");
    }
}

/// Keeps every notice for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_placed_text() {
        let notice = Notice::OrderPlaced {
            full_name: "Ada Obi".to_string(),
            address: "12 Marina, Lagos".to_string(),
            total_label: "Total: ₦10,000".to_string(),
        };
        assert_eq!(
            notice.to_string(),
            "Order Placed for Ada Obi!\n\nDelivery Address: 12 Marina, Lagos\n\nTotal: ₦10,000\n\nThank you for your order! You will pay on delivery."
        );
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(&Notice::AddedToCart);
        notifier.notify(&Notice::EmptyCart);
        assert_eq!(notifier.notices(), vec![Notice::AddedToCart, Notice::EmptyCart]);
        assert_eq!(notifier.last(), Some(Notice::EmptyCart));
    }
}
