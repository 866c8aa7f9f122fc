//! HTML extraction passes over the source page.
//!
//! The page lists results in one of two layouts, and both are always read:
//!
//! ```text
//! <div class="tkt-val">                 <div class="lv-mc">
//!   <div><h4>KALYAN</h4>                  <span>KALYAN</span>
//!        <span>145-05-113</span></div>    <span>145-05-113</span>
//! </div>                                </div>
//! ```
//!
//! Results are not de-duplicated here; a market listed in both layouts
//! yields two pairs.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::types::RawPair;

static TICKET_ITEMS: Lazy<Selector> = Lazy::new(|| selector("div.tkt-val > div"));
static LIVE_CONTAINERS: Lazy<Selector> = Lazy::new(|| selector("div.lv-mc"));
static HEADING: Lazy<Selector> = Lazy::new(|| selector("h4"));
static SPAN: Lazy<Selector> = Lazy::new(|| selector("span"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Run both extraction passes over `html`, ticket layout first.
pub fn extract_pairs(html: &str) -> Vec<RawPair> {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        debug!(errors = document.errors.len(), "Source page has markup errors");
    }

    let mut pairs = ticket_pairs(&document);
    let live = live_pairs(&document);
    debug!(ticket = pairs.len(), live = live.len(), "Extracted label/value pairs");

    pairs.extend(live);
    pairs
}

/// Each direct `div` child of `div.tkt-val`: label from `h4`, value from `span`.
fn ticket_pairs(document: &Html) -> Vec<RawPair> {
    document
        .select(&TICKET_ITEMS)
        .map(|item| RawPair::new(text_of_all(item, &HEADING), text_of_all(item, &SPAN)))
        .collect()
}

/// Each `div.lv-mc` with at least two `span`s: first is label, second is value.
fn live_pairs(document: &Html) -> Vec<RawPair> {
    document
        .select(&LIVE_CONTAINERS)
        .filter_map(|container| {
            let mut spans = container.select(&SPAN);
            let label = spans.next()?;
            let value = spans.next()?;
            Some(RawPair::new(text_of(label), text_of(value)))
        })
        .collect()
}

/// Concatenated, trimmed text of every element under `root` matching `selector`.
fn text_of_all(root: ElementRef<'_>, selector: &Selector) -> String {
    root.select(selector)
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_ticket_layout() {
        let html = r#"
            <div class="tkt-val">
                <div><h4> KALYAN </h4><span> 145-05-113 </span></div>
                <div><h4>SRIDEVI</h4><span>388-95-500</span></div>
            </div>
        "#;

        assert_eq!(
            extract_pairs(html),
            vec![
                RawPair::new("KALYAN", "145-05-113"),
                RawPair::new("SRIDEVI", "388-95-500"),
            ]
        );
    }

    #[test]
    fn ticket_layout_only_takes_direct_children() {
        let html = r#"
            <div class="tkt-val">
                <section><div><h4>KALYAN</h4><span>1</span></div></section>
            </div>
        "#;

        assert!(extract_pairs(html).is_empty());
    }

    #[test]
    fn ticket_item_without_value_yields_empty_value() {
        let html = r#"<div class="tkt-val"><div><h4>KALYAN</h4></div></div>"#;

        assert_eq!(extract_pairs(html), vec![RawPair::new("KALYAN", "")]);
    }

    #[test]
    fn reads_live_layout() {
        let html = r#"
            <div class="lv-mc"><span>MILAN DAY</span><span>  240-66-123 </span><span>ignored</span></div>
            <div class="lv-mc"><span>lonely</span></div>
        "#;

        assert_eq!(extract_pairs(html), vec![RawPair::new("MILAN DAY", "240-66-123")]);
    }

    #[test]
    fn both_layouts_are_read_and_duplicates_kept() {
        let html = r#"
            <div class="lv-mc"><span>KALYAN</span><span>145-05-113</span></div>
            <div class="tkt-val"><div><h4>KALYAN</h4><span>145-05-113</span></div></div>
        "#;

        assert_eq!(
            extract_pairs(html),
            vec![
                RawPair::new("KALYAN", "145-05-113"),
                RawPair::new("KALYAN", "145-05-113"),
            ]
        );
    }

    #[test]
    fn unrelated_markup_yields_nothing() {
        assert!(extract_pairs("<html><body><p>Maintenance</p></body></html>").is_empty());
        assert!(extract_pairs("").is_empty());
    }

    #[test]
    fn tolerates_broken_markup() {
        let html = r#"<div class="tkt-val"><div><h4>KALYAN<span>1237</div>"#;

        let pairs = extract_pairs(html);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].value, "1237");
    }
}
