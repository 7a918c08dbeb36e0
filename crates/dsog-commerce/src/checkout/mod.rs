//! Checkout module.
//!
//! Contains order requests and totals, order numbers, and WhatsApp order
//! messages.

mod order;
mod whatsapp;

pub use order::{
    DeliveryOption, OrderConfirmation, OrderItem, OrderNumber, OrderRequest, OrderTotals,
};
pub use whatsapp::{OrderContact, WhatsAppMessage};
