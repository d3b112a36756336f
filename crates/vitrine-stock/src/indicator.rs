//! Stock indicator

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use vitrine_dom::{Document, ListenerId, NodeId};
use vitrine_product::{variant_from_detail, Variant, VARIANT_CHANGE};

/// Check-mark glyph rendered into the icon element when in stock.
pub const ICON_IN_STOCK: &str = r#"<circle cx="8" cy="8" r="7" stroke="currentColor" stroke-width="2"/><path d="M5 8L7 10L11 6" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"#;

/// Cross glyph rendered into the icon element when out of stock.
pub const ICON_OUT_OF_STOCK: &str = r#"<circle cx="8" cy="8" r="7" stroke="currentColor" stroke-width="2"/><path d="M10 6L6 10" stroke="currentColor" stroke-width="2" stroke-linecap="round"/><path d="M6 6L10 10" stroke="currentColor" stroke-width="2" stroke-linecap="round"/>"#;

/// Modifier class set on the status block when in stock.
pub const CLASS_IN_STOCK: &str = "stock-status--in-stock";

/// Modifier class set on the status block when out of stock.
pub const CLASS_OUT_OF_STOCK: &str = "stock-status--out";

pub const TEXT_IN_STOCK: &str = "In stock";
pub const TEXT_OUT_OF_STOCK: &str = "Out of stock";

/// Class names the indicator locates its sub-elements with. The status
/// class doubles as the base class of the rendered class list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StockSelectors {
    /// Class of the status block inside the indicator root
    pub status: String,
    /// Class of the text element inside the status block
    pub text: String,
    /// Class of the icon element inside the status block
    pub icon: String,
}

impl Default for StockSelectors {
    fn default() -> Self {
        Self {
            status: "stock-status".to_string(),
            text: "stock-text".to_string(),
            icon: "stock-icon".to_string(),
        }
    }
}

struct StockInner {
    root: NodeId,
    selectors: StockSelectors,
}

/// Availability display bound to one root element.
///
/// Every notification repaints the status block from scratch; there is no
/// diffing and no stored availability. Sub-elements are looked up live on
/// each render, so markup swapped under the root keeps working.
pub struct StockIndicator {
    doc: Document,
    inner: Arc<StockInner>,
    listener: RwLock<Option<ListenerId>>,
}

impl StockIndicator {
    /// Bind to `root` and subscribe to `variant:change` at the document
    /// root. Nothing renders until the first notification arrives.
    pub fn mount(doc: &Document, root: NodeId, selectors: &StockSelectors) -> Self {
        let inner = Arc::new(StockInner {
            root,
            selectors: selectors.clone(),
        });

        let weak = Arc::downgrade(&inner);
        let doc_handle = doc.clone();
        let listener = doc.add_listener(doc.root(), VARIANT_CHANGE, move |event| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if let Some(variant) = variant_from_detail(&event.detail) {
                render_into(&doc_handle, &inner, &variant);
            }
        });
        tracing::debug!("mounted stock indicator");

        Self {
            doc: doc.clone(),
            inner,
            listener: RwLock::new(listener),
        }
    }

    /// Repaint immediately from `variant`, outside the event path.
    pub fn render(&self, variant: &Variant) {
        render_into(&self.doc, &self.inner, variant);
    }

    /// Whether the root currently lacks a status block to render into.
    pub fn is_inert(&self) -> bool {
        self.doc
            .first_class(self.inner.root, &self.inner.selectors.status)
            .is_none()
    }

    /// Unsubscribe from variant notifications. Idempotent.
    pub fn dispose(&self) {
        if let Some(id) = self.listener.write().take() {
            self.doc.remove_listener(id);
            tracing::debug!("stock indicator disposed");
        }
    }
}

fn render_into(doc: &Document, inner: &StockInner, variant: &Variant) {
    if !doc.contains(inner.root) {
        return;
    }
    let Some(status) = doc.first_class(inner.root, &inner.selectors.status) else {
        return;
    };
    let text = doc.first_class(status, &inner.selectors.text);
    let icon = doc.first_class(status, &inner.selectors.icon);

    let (modifier, label, glyph) = if variant.available {
        (CLASS_IN_STOCK, TEXT_IN_STOCK, ICON_IN_STOCK)
    } else {
        (CLASS_OUT_OF_STOCK, TEXT_OUT_OF_STOCK, ICON_OUT_OF_STOCK)
    };

    doc.set_classes(status, &[&inner.selectors.status, modifier]);
    if let Some(text) = text {
        doc.set_text(text, label);
    }
    if let Some(icon) = icon {
        doc.set_text(icon, glyph);
    }
    tracing::debug!(available = variant.available, "stock indicator rendered");
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vitrine_dom::DomEvent;
    use vitrine_product::variant_change_detail;

    use super::*;

    struct Fixture {
        doc: Document,
        root: NodeId,
        status: NodeId,
        text: NodeId,
        icon: NodeId,
    }

    fn build_indicator() -> Fixture {
        let selectors = StockSelectors::default();
        let doc = Document::new();
        let root = doc.create_element("div");
        doc.add_class(root, "product-stock-indicator");
        doc.append_child(doc.root(), root);

        let status = doc.create_element("div");
        doc.add_class(status, &selectors.status);
        doc.append_child(root, status);

        let text = doc.create_element("span");
        doc.add_class(text, &selectors.text);
        doc.append_child(status, text);

        let icon = doc.create_element("svg");
        doc.add_class(icon, &selectors.icon);
        doc.append_child(status, icon);

        Fixture {
            doc,
            root,
            status,
            text,
            icon,
        }
    }

    fn notify(doc: &Document, variant: &Variant) {
        doc.dispatch(
            DomEvent::new(VARIANT_CHANGE, doc.root()).with_detail(variant_change_detail(variant)),
        );
    }

    #[test]
    fn test_renders_in_stock() {
        let f = build_indicator();
        let _indicator = StockIndicator::mount(&f.doc, f.root, &StockSelectors::default());

        notify(&f.doc, &Variant::available("Red"));

        assert_eq!(
            f.doc.classes(f.status),
            vec!["stock-status", "stock-status--in-stock"]
        );
        assert_eq!(f.doc.text(f.text).as_deref(), Some("In stock"));
        assert_eq!(f.doc.text(f.icon).as_deref(), Some(ICON_IN_STOCK));
    }

    #[test]
    fn test_renders_out_of_stock() {
        let f = build_indicator();
        let _indicator = StockIndicator::mount(&f.doc, f.root, &StockSelectors::default());

        notify(&f.doc, &Variant::unavailable("Red"));

        assert_eq!(
            f.doc.classes(f.status),
            vec!["stock-status", "stock-status--out"]
        );
        assert_eq!(f.doc.text(f.text).as_deref(), Some("Out of stock"));
        assert_eq!(f.doc.text(f.icon).as_deref(), Some(ICON_OUT_OF_STOCK));
    }

    #[test]
    fn test_repaint_replaces_wholesale() {
        let f = build_indicator();
        let _indicator = StockIndicator::mount(&f.doc, f.root, &StockSelectors::default());

        notify(&f.doc, &Variant::available("Red"));
        notify(&f.doc, &Variant::unavailable("Red"));

        // No class accumulation across repaints
        assert_eq!(
            f.doc.classes(f.status),
            vec!["stock-status", "stock-status--out"]
        );
        assert_eq!(f.doc.text(f.icon).as_deref(), Some(ICON_OUT_OF_STOCK));
    }

    #[test]
    fn test_missing_variant_keeps_prior_state() {
        let f = build_indicator();
        let _indicator = StockIndicator::mount(&f.doc, f.root, &StockSelectors::default());

        notify(&f.doc, &Variant::available("Red"));
        f.doc
            .dispatch(DomEvent::new(VARIANT_CHANGE, f.doc.root()).with_detail(json!({})));

        assert_eq!(f.doc.text(f.text).as_deref(), Some("In stock"));
        assert_eq!(
            f.doc.classes(f.status),
            vec!["stock-status", "stock-status--in-stock"]
        );
    }

    #[test]
    fn test_missing_status_block() {
        let doc = Document::new();
        let root = doc.create_element("div");
        doc.append_child(doc.root(), root);
        let indicator = StockIndicator::mount(&doc, root, &StockSelectors::default());

        assert!(indicator.is_inert());
        // Must not panic or touch the tree
        notify(&doc, &Variant::available("Red"));
        assert_eq!(doc.children(root), Vec::new());
        assert_eq!(doc.classes(root), Vec::<String>::new());
    }

    #[test]
    fn test_missing_text_and_icon_elements() {
        let selectors = StockSelectors::default();
        let doc = Document::new();
        let root = doc.create_element("div");
        doc.append_child(doc.root(), root);
        let status = doc.create_element("div");
        doc.add_class(status, &selectors.status);
        doc.append_child(root, status);

        let _indicator = StockIndicator::mount(&doc, root, &selectors);
        notify(&doc, &Variant::unavailable("Red"));

        assert_eq!(
            doc.classes(status),
            vec!["stock-status", "stock-status--out"]
        );
    }

    #[test]
    fn test_direct_render() {
        let f = build_indicator();
        let indicator = StockIndicator::mount(&f.doc, f.root, &StockSelectors::default());

        indicator.render(&Variant::unavailable("Red"));
        assert_eq!(f.doc.text(f.text).as_deref(), Some("Out of stock"));
    }

    #[test]
    fn test_dispose_unsubscribes() {
        let f = build_indicator();
        let indicator = StockIndicator::mount(&f.doc, f.root, &StockSelectors::default());

        indicator.dispose();
        indicator.dispose();

        notify(&f.doc, &Variant::available("Red"));
        assert_eq!(f.doc.text(f.text).as_deref(), Some(""));
        assert_eq!(f.doc.classes(f.status), vec!["stock-status"]);
    }

    #[test]
    fn test_dropped_indicator_stops_rendering() {
        let f = build_indicator();
        let indicator = StockIndicator::mount(&f.doc, f.root, &StockSelectors::default());
        drop(indicator);

        notify(&f.doc, &Variant::available("Red"));
        assert_eq!(f.doc.text(f.text).as_deref(), Some(""));
    }
}
