//! Order types.

use crate::franchisee::Franchisee;
use crate::ids::{FranchiseeCode, OrderId, ProductId};
use crate::money::Price;
use crate::CommerceError;
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of every order number.
const ORDER_NUMBER_PREFIX: &str = "DSOG";

/// Delivery speed chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DeliveryOption {
    #[default]
    Standard,
    Express,
}

impl DeliveryOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOption::Standard => "standard",
            DeliveryOption::Express => "express",
        }
    }

    /// Flat delivery fee.
    pub fn fee(&self) -> Price {
        match self {
            DeliveryOption::Express => Price::new(300.0),
            DeliveryOption::Standard => Price::new(150.0),
        }
    }
}

// Anything that is not "express" is charged as standard delivery.
impl From<String> for DeliveryOption {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("express") {
            DeliveryOption::Express
        } else {
            DeliveryOption::Standard
        }
    }
}

/// A line in an order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Catalog product, when the item came from the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Product name at time of order.
    pub name: String,
    /// Unit price at time of order.
    pub price: Price,
    /// Quantity ordered.
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, price: Price, quantity: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Attach the catalog product id.
    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Price times quantity.
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// Computed order amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

impl OrderTotals {
    /// Sum line totals and add the delivery fee.
    pub fn compute(items: &[OrderItem], delivery: DeliveryOption) -> Self {
        let subtotal: Price = items.iter().map(OrderItem::line_total).sum();
        let delivery_fee = delivery.fee();
        Self {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

/// Body of an order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub delivery_option: DeliveryOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub franchisee_id: Option<FranchiseeCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub franchisee_name: Option<String>,
}

impl OrderRequest {
    /// Create a request with the required customer fields.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: Some(name.into()),
            customer_phone: Some(phone.into()),
            customer_address: Some(address.into()),
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_delivery(mut self, delivery: DeliveryOption) -> Self {
        self.delivery_option = delivery;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.customer_notes = Some(notes.into());
        self
    }

    pub fn with_whatsapp_message(mut self, message: impl Into<String>) -> Self {
        self.whatsapp_message = Some(message.into());
        self
    }

    /// Record the franchisee the order was placed through.
    pub fn with_franchisee(mut self, code: FranchiseeCode, franchisee: &Franchisee) -> Self {
        self.franchisee_id = Some(code);
        self.franchisee_name = Some(franchisee.name.clone());
        self
    }

    /// Reject requests missing customer name, phone or address.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let present = |field: &Option<String>| {
            field.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
        };
        if !(present(&self.customer_name)
            && present(&self.customer_phone)
            && present(&self.customer_address))
        {
            return Err(CommerceError::MissingRequiredFields);
        }
        if let Some(item) = self.items.iter().find(|i| i.quantity == 0) {
            return Err(CommerceError::InvalidQuantity(i64::from(item.quantity)));
        }
        Ok(())
    }

    /// Compute subtotal, delivery fee and total.
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::compute(&self.items, self.delivery_option)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

/// Human-readable order number: `DSOG-YYYYMMDD-XXXXXX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate an order number for `date` with a 6-character uppercase suffix.
    pub fn generate<R: Rng>(date: NaiveDate, rng: &mut R) -> Self {
        let suffix: u32 = rng.gen_range(0..0x100_0000);
        Self(format!(
            "{}-{}-{:06X}",
            ORDER_NUMBER_PREFIX,
            date.format("%Y%m%d"),
            suffix
        ))
    }

    /// Generate an order number for today's local date.
    pub fn today() -> Self {
        Self::generate(chrono::Local::now().date_naive(), &mut rand::thread_rng())
    }

    /// Check the `PREFIX-YYYYMMDD-XXXXXX` layout.
    pub fn is_well_formed(value: &str) -> bool {
        let mut parts = value.split('-');
        let (Some(prefix), Some(date), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        prefix == ORDER_NUMBER_PREFIX
            && NaiveDate::parse_from_str(date, "%Y%m%d").is_ok()
            && suffix.len() == 6
            && suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Successful order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: OrderNumber,
    pub order_id: OrderId,
}
