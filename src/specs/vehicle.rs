// src/specs/vehicle.rs
//
// Field extractors for vehicle listings.
//
// Every extractor is infallible: a miss is an empty string or an empty list.
// Scalar fields read the plain-text rendering of the post; images and options
// read the raw markup; make/model/trim read the title only.

use std::collections::HashSet;

use regex::Regex;

use crate::config::consts::{COMMENT_FALLBACK_WORDS, IMAGE_EXTENSIONS, MAX_OPTIONS, TRUNCATION_MARKER};
use crate::core::html::{inner_text, strip_tags, to_lower, to_plain_text};
use crate::core::sanitize::{decode_entities, normalize_ws, strip_thousands, trim_words};
use crate::data::SourceDocument;

use super::patterns::*;
use super::strategy::{first_hit, Strategy};

/// A document prepared for extraction: raw markup plus its plain-text rendering.
#[derive(Clone, Debug)]
pub struct ListingView<'a> {
    pub title: &'a str,
    pub html: &'a str,
    pub text: String,
}

impl<'a> ListingView<'a> {
    pub fn new(title: &'a str, html: &'a str) -> Self {
        Self { title: title.trim(), html, text: to_plain_text(html) }
    }

    pub fn of(doc: &'a SourceDocument) -> Self {
        Self::new(&doc.title, &doc.content)
    }

    /// Whether the post looks like a vehicle listing at all.
    pub fn is_listing(&self) -> bool {
        LISTING_INDICATOR.is_match(&join!(&self.text, " ", self.title))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TitleParts {
    pub make: String,
    pub model: String,
    pub trim: String,
}

/* ---------------- Scalars ---------------- */

const VIN_STRATEGIES: &[Strategy<str, String>] = &[
    Strategy { name: "vin_11_17", run: vin_standard },
    Strategy { name: "vin_overlong", run: vin_overlong },
];

/// First VIN-alphabet token of 11–17 chars, upper-cased. No checksum.
pub fn vin(text: &str) -> String {
    first_hit("vin", text, VIN_STRATEGIES)
}

fn vin_standard(text: &str) -> String { capture(&VIN, text).to_uppercase() }

/// Hand-typed VINs sometimes carry an extra character.
fn vin_overlong(text: &str) -> String { capture(&VIN_OVERLONG, text).to_uppercase() }

const PRICE_STRATEGIES: &[Strategy<str, String>] = &[
    Strategy { name: "dollar_prefix", run: price_dollar },
    Strategy { name: "currency_suffix", run: price_suffix },
];

/// `$12,345` → `12345`; falls back to `12345 USD`.
pub fn price(text: &str) -> String {
    first_hit("price", text, PRICE_STRATEGIES)
}

fn price_dollar(text: &str) -> String { strip_thousands(&capture(&PRICE_DOLLAR, text)) }

fn price_suffix(text: &str) -> String { strip_thousands(&capture(&PRICE_SUFFIX, text)) }

/// First 19xx/20xx token.
pub fn year(text: &str) -> String {
    YEAR.find(text).map(|m| s!(m.as_str())).unwrap_or_default()
}

/// First number, separators stripped, unit appended if present: `45,210 mi` → `45210 mi`.
pub fn mileage(text: &str) -> String {
    let Some(c) = MILEAGE.captures(text) else { return s!() };
    let number = c[1].replace(',', "");
    match c.get(2) {
        Some(unit) => join!(&number, " ", unit.as_str()),
        None => number,
    }
}

/// Positional split of the title once year and price tokens are removed.
/// Multi-word makes land partly in `model`; there is no make dictionary.
pub fn make_model_trim(title: &str) -> TitleParts {
    let without_year = YEAR.replace_all(title, "");
    let cleaned = PRICE_TOKEN.replace_all(&without_year, "");
    let mut parts = cleaned.split_whitespace();

    TitleParts {
        make: parts.next().map(String::from).unwrap_or_default(),
        model: parts.next().map(String::from).unwrap_or_default(),
        trim: parts.collect::<Vec<_>>().join(" "),
    }
}

/* ---------------- Label fields ---------------- */

/// Value after an arbitrary `label`, case-insensitive.
pub fn label_value(text: &str, label: &str) -> String {
    label_capture(&label_pattern(label), text)
}

pub fn exterior_color(text: &str) -> String { label_capture(&EXTERIOR_COLOR, text) }

pub fn stock_number(text: &str) -> String { label_capture(&STOCK_NUMBER, text) }

pub fn transmission(text: &str) -> String { label_capture(&TRANSMISSION, text) }

fn label_capture(re: &Regex, text: &str) -> String {
    re.captures(text).map(|c| strip_tags(&c[1])).unwrap_or_default()
}

fn comment_strategies<'a>() -> [Strategy<ListingView<'a>, String>; 4] {
    [
        Strategy { name: "sellers_notes", run: comments_label },
        Strategy { name: "sellers_notes_typographic", run: comments_label_typographic },
        Strategy { name: "comments_section", run: comments_section },
        Strategy { name: "leading_words", run: comments_leading_words },
    ]
}

/// Seller's notes by label, then by heading section, then the opening words of the post.
pub fn dealer_comments(view: &ListingView<'_>) -> String {
    first_hit("dealer_comments", view, &comment_strategies())
}

fn comments_label(v: &ListingView<'_>) -> String { label_capture(&SELLERS_NOTES, &v.text) }

fn comments_label_typographic(v: &ListingView<'_>) -> String {
    label_capture(&SELLERS_NOTES_TYPOGRAPHIC, &v.text)
}

/// Everything from the heading phrase up to the next `<hN>`.
fn comments_section(v: &ListingView<'_>) -> String {
    COMMENTS_SECTION
        .captures(v.html)
        .map(|c| normalize_ws(&to_plain_text(&c[1])).trim_start_matches([':', '-', ' ']).to_string())
        .unwrap_or_default()
}

fn comments_leading_words(v: &ListingView<'_>) -> String {
    trim_words(&v.text, COMMENT_FALLBACK_WORDS, TRUNCATION_MARKER)
}

/* ---------------- Lists ---------------- */

/// Image URLs from `<img src>` and image `<a href>` in document order, then
/// attachments. Deduplicated, first-seen order, image formats only.
pub fn image_urls(html: &str, attachments: &[String]) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = IMG_SRC
        .captures_iter(html)
        .chain(IMG_LINK.captures_iter(html))
        .filter_map(|c| c.get(1))
        .map(|m| (m.start(), m.as_str()))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);

    let inline = found.into_iter().map(|(_, url)| decode_entities(url.trim()));
    let attached = attachments.iter().map(|url| s!(url.trim()));

    let mut seen = HashSet::new();
    inline
        .chain(attached)
        .filter(|url| has_image_extension(url))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Extension check on the URL path; query string and fragment are ignored.
pub fn has_image_extension(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let Some((_, ext)) = path.rsplit_once('.') else { return false };
    !ext.contains('/') && IMAGE_EXTENSIONS.contains(&to_lower(ext).as_str())
}

const OPTION_STRATEGIES: &[Strategy<str, Vec<String>>] = &[
    Strategy { name: "heading_list", run: options_under_heading },
    Strategy { name: "feature_keywords", run: options_by_keyword },
];

/// Installed options from a "Features"/"Options"/"Equipment" list, else feature-like
/// list items anywhere. At most 50, no duplicates.
pub fn installed_options(html: &str) -> Vec<String> {
    let items = first_hit("installed_options", html, OPTION_STRATEGIES);
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .take(MAX_OPTIONS)
        .collect()
}

fn options_under_heading(html: &str) -> Vec<String> {
    let mut out = Vec::new();
    for block in OPTIONS_BLOCK.captures_iter(html) {
        out.extend(list_items(&block[1]).filter(|t| !t.is_empty()));
    }
    out
}

fn options_by_keyword(html: &str) -> Vec<String> {
    list_items(html)
        .filter(|t| t.chars().count() > 3 && FEATURE_KEYWORD.is_match(t))
        .collect()
}

fn list_items(html: &str) -> impl Iterator<Item = String> + '_ {
    LIST_ITEM.captures_iter(html).map(|li| inner_text(&li[1]))
}

/* ---------------- Helpers ---------------- */

/// Capture group 1, or empty.
fn capture(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| s!(m.as_str()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vin_oversized_token_and_excluded_letters() {
        assert_eq!(vin("Stock # 1A2B3C4D5E6F7G8H9J VIN"), "1A2B3C4D5E6F7G8H9J");
        assert_eq!(vin("VIN: 1hgcm82633a004352"), "1HGCM82633A004352");
        assert_eq!(vin("IIIIIIIIIIIIIIIII OOOOOOOOOOOOOOOOO QQQQQQQQQQQQQQQQQ"), "");
        assert_eq!(vin("no identifier here"), "");
    }

    #[test]
    fn vin_prefers_standard_length() {
        assert_eq!(vin("ref 1A2B3C4D5E6F7G8H9J vin 2T1BURHE0JC123456"), "2T1BURHE0JC123456");
    }

    #[test]
    fn price_formats() {
        assert_eq!(price("$12,345 firm"), "12345");
        assert_eq!(price("Asking $ 9,999."), "9999");
        assert_eq!(price("12345 USD"), "12345");
        assert_eq!(price("only 12,000$ obo"), "12000");
        assert_eq!(price("call for details"), "");
    }

    #[test]
    fn year_is_whole_token() {
        assert_eq!(year("2017 Chevrolet Equinox"), "2017");
        assert_eq!(year("Stock 120175 built 1998"), "1998");
        assert_eq!(year("no year"), "");
    }

    #[test]
    fn mileage_units() {
        assert_eq!(mileage("Mileage: 45,210 mi"), "45210 mi");
        assert_eq!(mileage("38000km"), "38000 km");
        assert_eq!(mileage("Odometer 120,500 miles"), "120500 miles");
        assert_eq!(mileage("just 900"), "900");
        assert_eq!(mileage("3 minutes away"), "3");
        assert_eq!(mileage("none"), "");
    }

    #[test]
    fn title_split() {
        let parts = make_model_trim("2017 Chevrolet Equinox LT 97333");
        assert_eq!(parts.make, "Chevrolet");
        assert_eq!(parts.model, "Equinox");
        assert_eq!(parts.trim, "LT 97333");

        let parts = make_model_trim("BMW M5 F90 2024 $89,000");
        assert_eq!((parts.make.as_str(), parts.model.as_str(), parts.trim.as_str()), ("BMW", "M5", "F90"));

        let parts = make_model_trim("2019 Tesla");
        assert_eq!(parts, TitleParts { make: s!("Tesla"), ..Default::default() });
    }

    #[test]
    fn label_fields() {
        let text = "Exterior Color: Summit White\nTransmission - 6-Speed Automatic\nStock Number A1234";
        assert_eq!(exterior_color(text), "Summit White");
        assert_eq!(transmission(text), "6-Speed Automatic");
        assert_eq!(stock_number(text), "A1234");
        assert_eq!(label_value("interior color: Jet Black", "Interior Color"), "Jet Black");
        assert_eq!(exterior_color("nothing"), "");
    }

    #[test]
    fn label_stops_at_markup() {
        assert_eq!(exterior_color("Exterior Color: Red<br>Interior: Black"), "Red");
    }

    #[test]
    fn comments_by_label() {
        let html = "<p>Seller's Notes: One owner, garage kept.</p><p>Mileage 10</p>";
        let view = ListingView::new("t", html);
        assert_eq!(dealer_comments(&view), "One owner, garage kept.");
    }

    #[test]
    fn comments_typographic_label() {
        let html = "<p>SELLER&rsquo;S NOTES: Clean title.</p>";
        assert_eq!(dealer_comments(&ListingView::new("t", html)), "Clean title.");
    }

    #[test]
    fn comments_by_section() {
        let html = "<h3>Dealer Comments</h3><p>Fresh tires.</p><p>New brakes.</p><h3>Specs</h3><p>V6</p>";
        assert_eq!(dealer_comments(&ListingView::new("t", html)), "Fresh tires. New brakes.");
    }

    #[test]
    fn comments_fall_back_to_leading_words() {
        let words: Vec<String> = (0..80).map(|i| format!("w{i}")).collect();
        let html = join!("<p>", &words.join(" "), "</p>");
        let out = dealer_comments(&ListingView::new("t", &html));
        assert!(out.starts_with("w0 w1 w2"));
        assert!(out.ends_with("w59..."));

        assert_eq!(dealer_comments(&ListingView::new("t", "<p>Short post.</p>")), "Short post.");
        assert_eq!(dealer_comments(&ListingView::new("t", "")), "");
    }

    #[test]
    fn images_order_filter_dedup() {
        let html = r#"<img src="a.jpg"><a href="b.png">b</a><img src="c.bmp"><img class="x" src="a.jpg">"#;
        assert_eq!(image_urls(html, &[]), vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn images_include_attachments_after_inline() {
        let html = r#"<a href="https://cdn/x.JPEG?w=300"><img src="https://cdn/x-thumb.webp"></a>"#;
        let attached = vec![s!("https://cdn/x-thumb.webp"), s!("https://cdn/doc.pdf"), s!("https://cdn/y.gif")];
        assert_eq!(
            image_urls(html, &attached),
            vec!["https://cdn/x.JPEG?w=300", "https://cdn/x-thumb.webp", "https://cdn/y.gif"]
        );
    }

    #[test]
    fn image_links_to_other_files_are_ignored() {
        let html = r#"<a href="brochure.pdf">pdf</a><img src="/track?id=9">"#;
        assert!(image_urls(html, &[]).is_empty());
    }

    #[test]
    fn lazy_loaded_images_use_data_src() {
        let html = concat!(
            r#"<img data-src="https://cdn/lazy.jpg">"#,
            r#"<img class="lazy" src="https://cdn/blank.gif" data-src="https://cdn/real.png">"#,
            r#"<img srcset="https://cdn/s-2x.jpg 2x" src="https://cdn/s.jpg">"#,
        );
        assert_eq!(image_urls(html, &[]), vec!["https://cdn/lazy.jpg", "https://cdn/real.png", "https://cdn/s.jpg"]);
    }

    #[test]
    fn options_under_heading() {
        let html = r#"
            <h2>Features</h2>
            <ul><li>Heated Seats</li><li><b>Apple</b> CarPlay</li><li>Heated Seats</li></ul>
            <ul><li>Leather interior</li></ul>"#;
        assert_eq!(installed_options(html), vec!["Heated Seats", "Apple CarPlay"]);
    }

    #[test]
    fn options_keyword_fallback() {
        let html = "<ul><li>Call us today</li><li>AWD</li><li>Leather seats</li><li>Navigation system</li></ul>";
        assert_eq!(installed_options(html), vec!["Leather seats", "Navigation system"]);
    }

    #[test]
    fn options_capped_at_fifty() {
        let items: String = (0..70).map(|i| format!("<li>Option {i}</li>")).collect();
        let html = join!("<h3>Installed Options</h3><ol>", &items, "</ol>");
        let out = installed_options(&html);
        assert_eq!(out.len(), 50);
        assert_eq!(out[49], "Option 49");
    }

    #[test]
    fn listing_detection() {
        assert!(!ListingView::new("Open house", "<p>Join us Saturday.</p>").is_listing());
        assert!(ListingView::new("Deal", "<p>only $</p>").is_listing());
        assert!(ListingView::new("Great Mileage", "").is_listing());
    }
}
