//! Request and response types for the Zoho Inventory API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ShippingAddress;

/// VAT rate applied to every item.
pub const TAX_PERCENTAGE: u32 = 15;

/// Days between order date and promised shipment date.
pub const SHIPMENT_LEAD_DAYS: i64 = 7;

/// Body for creating an inventory item.
#[derive(Debug, Serialize)]
pub struct NewItem<'a> {
    pub name: &'a str,
    pub sku: &'a str,
    pub rate: Decimal,
    pub account_id: &'a str,
    pub tax_id: &'a str,
    pub item_type: &'static str,
    pub product_type: &'static str,
    pub is_taxable: bool,
    pub tax_percentage: u32,
}

impl<'a> NewItem<'a> {
    #[must_use]
    pub fn new(
        name: &'a str,
        sku: &'a str,
        rate: Decimal,
        account_id: &'a str,
        tax_id: &'a str,
    ) -> Self {
        Self {
            name,
            sku,
            rate,
            account_id,
            tax_id,
            item_type: "inventory",
            product_type: "goods",
            is_taxable: true,
            tax_percentage: TAX_PERCENTAGE,
        }
    }
}

/// An inventory item as returned by Zoho.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedItem {
    pub item_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemEnvelope {
    pub item: CreatedItem,
}

/// Body for creating a customer contact.
#[derive(Debug, Serialize)]
pub(super) struct NewContact<'a> {
    pub contact_name: &'a str,
    pub contact_type: &'static str,
    pub billing_address: ContactAddress<'a>,
    pub shipping_address: ContactAddress<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct ContactAddress<'a> {
    pub address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip: &'a str,
    pub country: &'a str,
}

impl<'a> From<&'a ShippingAddress> for ContactAddress<'a> {
    fn from(addr: &'a ShippingAddress) -> Self {
        Self {
            address: &addr.address,
            city: &addr.city,
            state: &addr.state,
            zip: &addr.zip,
            country: &addr.country,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct Contact {
    pub contact_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContactEnvelope {
    pub contact: Contact,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContactSearchEnvelope {
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// One sales-order line referencing a mirrored item.
#[derive(Debug, Clone, Serialize)]
pub struct SalesOrderLine {
    pub item_id: String,
    pub rate: Decimal,
    pub quantity: i64,
}

/// Input for mirroring an order as a Zoho sales order.
#[derive(Debug, Clone)]
pub struct SalesOrderInput {
    pub customer_name: String,
    pub line_items: Vec<SalesOrderLine>,
    pub shipping_address: ShippingAddress,
}

/// Body for creating a sales order.
#[derive(Debug, Serialize)]
pub(super) struct NewSalesOrder<'a> {
    pub customer_id: &'a str,
    pub date: String,
    pub shipment_date: String,
    pub line_items: &'a [SalesOrderLine],
    pub shipping_address: ContactAddress<'a>,
}

/// Order date and promised shipment date (seven days out), both in the
/// `YYYY-MM-DD` format Zoho expects.
#[must_use]
pub fn shipment_window(today: NaiveDate) -> (String, String) {
    let shipment = today + chrono::Duration::days(SHIPMENT_LEAD_DAYS);
    (
        today.format("%Y-%m-%d").to_string(),
        shipment.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_window_is_seven_days() {
        let (date, shipment) = shipment_window(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(date, "2025-06-10");
        assert_eq!(shipment, "2025-06-17");
    }

    #[test]
    fn test_shipment_window_crosses_month_boundary() {
        let (date, shipment) = shipment_window(NaiveDate::from_ymd_opt(2025, 1, 28).unwrap());
        assert_eq!(date, "2025-01-28");
        assert_eq!(shipment, "2025-02-04");
    }

    #[test]
    fn test_new_item_body_shape() {
        let item = NewItem::new(
            "ChartedArt Kit - A3 - No Frame Frame",
            "CA-A3-NONE",
            Decimal::new(69_999, 2),
            "460000000000388",
            "460000000017001",
        );
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["sku"], "CA-A3-NONE");
        assert_eq!(json["rate"], "699.99");
        assert_eq!(json["item_type"], "inventory");
        assert_eq!(json["product_type"], "goods");
        assert_eq!(json["is_taxable"], true);
        assert_eq!(json["tax_percentage"], 15);
    }
}
