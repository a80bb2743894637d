// src/data.rs
//
// Pipeline data shapes.
//
// - SourceDocument: one published post body, read-only input.
// - VehicleRecord:  one assembled listing, schema-complete (every field present,
//                   possibly empty). Built once per document, never mutated after.

use std::borrow::Cow;

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SourceDocument {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl SourceDocument {
    pub fn new(id: u64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id, title: title.into(), content: content.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VehicleRecord {
    pub vin: String,
    pub price: String,
    pub year: String,
    pub make: String,
    pub model: String,
    pub trim: String,
    pub mileage: String,
    pub image_urls: Vec<String>,
    pub exterior_color: String,
    pub dealer_comments: String,
    pub stock_number: String,
    pub transmission_type: String,
    pub installed_options: Vec<String>,
    pub dealer_id: String,
    pub dealer_name: String,
    pub dealer_street_address: String,
    pub dealer_city: String,
    pub dealer_state: String,
    pub dealer_zip: String,
    pub dealer_crm_email: String,
}

/// One child of a `<vehicle>` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element<'a> {
    Text(Cow<'a, str>),
    /// `<ImageURLs>` container, one `<Image>` per entry.
    Images(&'a [String]),
}

/// Feed element names, in output order.
pub const ELEMENT_NAMES: [&str; 20] = [
    "VIN", "Price", "Year", "Make", "Model", "Trim", "Mileage", "ImageURLs",
    "ExteriorColor", "DealerComments", "StockNumber", "TransmissionType",
    "InstalledOptions", "DealerID", "DealerName", "DealerStreetAddress",
    "DealerCity", "DealerState", "DealerZIP", "DealerCRMEmail",
];

pub const IMAGE_ELEMENT: &str = "Image";
pub const OPTIONS_SEPARATOR: &str = "; ";

impl VehicleRecord {
    /// Every element of the record, in feed order. Nothing is ever omitted.
    pub fn elements(&self) -> [(&'static str, Element<'_>); 20] {
        fn t(s: &str) -> Element<'_> { Element::Text(Cow::Borrowed(s)) }
        let n = ELEMENT_NAMES;
        [
            (n[0], t(&self.vin)),
            (n[1], t(&self.price)),
            (n[2], t(&self.year)),
            (n[3], t(&self.make)),
            (n[4], t(&self.model)),
            (n[5], t(&self.trim)),
            (n[6], t(&self.mileage)),
            (n[7], Element::Images(&self.image_urls)),
            (n[8], t(&self.exterior_color)),
            (n[9], t(&self.dealer_comments)),
            (n[10], t(&self.stock_number)),
            (n[11], t(&self.transmission_type)),
            (n[12], Element::Text(Cow::Owned(self.installed_options.join(OPTIONS_SEPARATOR)))),
            (n[13], t(&self.dealer_id)),
            (n[14], t(&self.dealer_name)),
            (n[15], t(&self.dealer_street_address)),
            (n[16], t(&self.dealer_city)),
            (n[17], t(&self.dealer_state)),
            (n[18], t(&self.dealer_zip)),
            (n[19], t(&self.dealer_crm_email)),
        ]
    }
}
