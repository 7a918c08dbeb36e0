//! WhatsApp order messages.

use crate::catalog::capitalize;
use crate::franchisee::Franchisee;
use crate::money::Price;
use serde::Serialize;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Who receives a WhatsApp order: the active franchisee or the main line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderContact {
    number: String,
    name: String,
    franchisee: Option<Franchisee>,
}

impl OrderContact {
    /// Contact routed to the store's main line.
    pub fn main_line(store_name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: store_name.into(),
            franchisee: None,
        }
    }

    /// Route to `franchisee` when one is active.
    pub fn through(mut self, franchisee: Option<&Franchisee>) -> Self {
        if let Some(f) = franchisee {
            self.number = f.phone.clone();
            self.name = f.name.clone();
            self.franchisee = Some(f.clone());
        }
        self
    }

    /// WhatsApp number orders go to.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Name used in the greeting.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn franchisee(&self) -> Option<&Franchisee> {
        self.franchisee.as_ref()
    }

    /// Plain chat link to this contact, with no message.
    pub fn chat_link(&self) -> String {
        format!("{}{}", WHATSAPP_BASE, self.number)
    }
}

/// A pre-filled WhatsApp message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhatsAppMessage {
    /// Recipient number.
    pub number: String,
    /// Message text.
    pub text: String,
}

impl WhatsAppMessage {
    /// Message ordering a single product.
    pub fn product_order(
        contact: &OrderContact,
        product_name: &str,
        price: Price,
        collection: &str,
    ) -> Self {
        let mut text = format!(
            "Hello {}! I would like to order:\n\n\
             Product: {}\n\
             Price: {}\n\
             Collection: {}\n\n\
             Please guide me through the ordering process.",
            contact.name(),
            product_name,
            price.display(),
            capitalize(collection),
        );

        if let Some(f) = contact.franchisee() {
            text.push_str(&format!(
                "\n\n---\nOrder placed through {} ({})",
                f.name, f.location
            ));
        }

        Self {
            number: contact.number().to_string(),
            text,
        }
    }

    /// `https://wa.me/<number>?text=<encoded message>`.
    pub fn link(&self) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(self.text.as_bytes()).collect();
        format!("{}{}?text={}", WHATSAPP_BASE, self.number, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn franchisee() -> Franchisee {
        Franchisee::new("John Mwangi", "254722111111", "Nairobi CBD")
    }

    #[test]
    fn test_main_line_message() {
        let contact = OrderContact::main_line("DSOG STORES", "254733737983");
        let msg = WhatsAppMessage::product_order(&contact, "Premium Hoodie", Price::new(8999.0), "mens");

        assert_eq!(msg.number, "254733737983");
        assert_eq!(
            msg.text,
            "Hello DSOG STORES! I would like to order:\n\n\
             Product: Premium Hoodie\n\
             Price: KSh 8999\n\
             Collection: Mens\n\n\
             Please guide me through the ordering process."
        );
    }

    #[test]
    fn test_franchisee_message_is_routed_and_signed() {
        let f = franchisee();
        let contact = OrderContact::main_line("DSOG STORES", "254733737983").through(Some(&f));
        let msg = WhatsAppMessage::product_order(&contact, "Dress", Price::new(7999.0), "womens");

        assert_eq!(msg.number, "254722111111");
        assert!(msg.text.starts_with("Hello John Mwangi!"));
        assert!(msg
            .text
            .ends_with("---\nOrder placed through John Mwangi (Nairobi CBD)"));
    }

    #[test]
    fn test_link_is_encoded() {
        let contact = OrderContact::main_line("DSOG", "254733737983");
        let msg = WhatsAppMessage::product_order(&contact, "T&Shirt", Price::new(1.0), "kids");
        let link = msg.link();

        assert!(link.starts_with("https://wa.me/254733737983?text=Hello+DSOG"));
        assert!(link.contains("T%26Shirt"));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn test_chat_link() {
        let contact = OrderContact::main_line("DSOG", "254733737983");
        assert_eq!(contact.chat_link(), "https://wa.me/254733737983");
    }
}
