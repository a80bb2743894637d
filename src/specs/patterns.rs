// src/specs/patterns.rs
// Pattern library: every regex the extractors use, compiled once.

use regex::Regex;

/* ---------------- Listing detection ---------------- */

pattern!(pub LISTING_INDICATOR,
    r"(?i)(Mileage|Exterior Color|Transmission|VIN|Stock Number|Year|Make|Model|\$)");

/* ---------------- Scalars ---------------- */

// VIN alphabet has no I, O or Q.
pattern!(pub VIN, r"(?i)\b([A-HJ-NPR-Z0-9]{11,17})\b");
pattern!(pub VIN_OVERLONG, r"(?i)\b([A-HJ-NPR-Z0-9]{18,20})\b");

pattern!(pub PRICE_DOLLAR, r"\$\s*([0-9][0-9.,]*)");
pattern!(pub PRICE_SUFFIX, r"(?i)([0-9][0-9.,]*)\s*(?:USD|\$)");
pattern!(pub PRICE_TOKEN, r"\$\s*[0-9][0-9.,]*");

pattern!(pub YEAR, r"\b(?:19|20)\d{2}\b");

pattern!(pub MILEAGE,
    r"(?i)([0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\s*(miles|mi|kms|km)\b)?");

/* ---------------- Markup ---------------- */

// Last `src` or lazy-load `data-src` in the tag; `srcset` is not a source.
pattern!(pub IMG_SRC, r#"(?i)<img\b[^>]*\s(?:data-)?src\s*=\s*["']([^"']+)["']"#);
pattern!(pub IMG_LINK,
    r#"(?i)<a\b[^>]*?\shref\s*=\s*["']([^"']+\.(?:jpe?g|png|gif|webp)(?:[?#][^"']*)?)["']"#);

pattern!(pub OPTIONS_BLOCK,
    r"(?is)<h[23][^>]*>\s*(?:Features|Options|Installed Options|Equipment)\s*</h[23][^>]*>\s*(<[uo]l\b[^>]*>.*?</[uo]l>)");
pattern!(pub LIST_ITEM, r"(?is)<li\b[^>]*>(.*?)</li>");
pattern!(pub FEATURE_KEYWORD,
    r"(?i)(Engine|Transmission|Exterior|Interior|Bluetooth|Navigation|AWD|4WD|Sunroof|Leather)");

// Apostrophe may be plain, typographic or still encoded in raw markup.
pattern!(pub COMMENTS_SECTION,
    r"(?is)(?:Seller(?:'|\x{2019}|&#0?39;|&rsquo;|&apos;)?s Notes|Dealer Comments)(.*?)(?:<h[1-6]|$)");

/* ---------------- Labels ---------------- */

pub const LABEL_EXTERIOR_COLOR: &str = "Exterior Color";
pub const LABEL_STOCK_NUMBER: &str = "Stock Number";
pub const LABEL_TRANSMISSION: &str = "Transmission";
pub const LABEL_SELLERS_NOTES: &str = "Seller's Notes";
pub const LABEL_SELLERS_NOTES_TYPOGRAPHIC: &str = "Seller\u{2019}s Notes";

/// `<label>` + optional `:`/`-` + rest of the line up to a tag or line break.
pub fn label_pattern(label: &str) -> Regex {
    // Escaped literal, cannot fail to compile.
    Regex::new(&label_pattern_src(label)).unwrap()
}

pattern!(pub EXTERIOR_COLOR, &label_pattern_src(LABEL_EXTERIOR_COLOR));
pattern!(pub STOCK_NUMBER, &label_pattern_src(LABEL_STOCK_NUMBER));
pattern!(pub TRANSMISSION, &label_pattern_src(LABEL_TRANSMISSION));
pattern!(pub SELLERS_NOTES, &label_pattern_src(LABEL_SELLERS_NOTES));
pattern!(pub SELLERS_NOTES_TYPOGRAPHIC, &label_pattern_src(LABEL_SELLERS_NOTES_TYPOGRAPHIC));

fn label_pattern_src(label: &str) -> String {
    format!(r"(?i){}\s*[:\-]?\s*([^\r\n<]+)", regex::escape(label))
}
