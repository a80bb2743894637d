// src/assemble.rs
//! Record assembly: one source document in, at most one `VehicleRecord` out.
//!
//! Runs every field extractor over a `ListingView`, merges inline and attached
//! images, copies the dealer profile in and defaults the stock number to the
//! document id. Documents that do not look like listings yield `None`.

use tracing::debug;

use crate::config::DealerProfile;
use crate::data::{SourceDocument, VehicleRecord};
use crate::specs::vehicle::{self, ListingView};

/// Assemble a record, or `None` when the document fails the listing filter.
pub fn assemble(doc: &SourceDocument, attachments: &[String], dealer: &DealerProfile) -> Option<VehicleRecord> {
    let view = ListingView::of(doc);
    if !view.is_listing() {
        debug!(id = doc.id, title = %view.title, "not a listing, skipped");
        return None;
    }
    Some(assemble_view(&view, doc.id, attachments, dealer))
}

/// Extract every field from an already prepared view. No listing filter.
pub fn assemble_view(view: &ListingView<'_>, id: u64, attachments: &[String], dealer: &DealerProfile) -> VehicleRecord {
    let title = vehicle::make_model_trim(view.title);
    let title_and_text = join!(view.title, " ", &view.text);

    let mut stock_number = vehicle::stock_number(&view.text);
    if stock_number.is_empty() {
        stock_number = id.to_string();
    }

    VehicleRecord {
        vin: vehicle::vin(&view.text),
        price: vehicle::price(&view.text),
        year: vehicle::year(&title_and_text),
        make: title.make,
        model: title.model,
        trim: title.trim,
        mileage: vehicle::mileage(&view.text),
        image_urls: vehicle::image_urls(view.html, attachments),
        exterior_color: vehicle::exterior_color(&view.text),
        dealer_comments: vehicle::dealer_comments(view),
        stock_number,
        transmission_type: vehicle::transmission(&view.text),
        installed_options: vehicle::installed_options(view.html),
        dealer_id: dealer.id.clone(),
        dealer_name: dealer.name.clone(),
        dealer_street_address: dealer.street.clone(),
        dealer_city: dealer.city.clone(),
        dealer_state: dealer.state.clone(),
        dealer_zip: dealer.zip.clone(),
        dealer_crm_email: dealer.crm_email.clone(),
    }
}
