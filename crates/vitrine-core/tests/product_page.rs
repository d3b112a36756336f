//! End-to-end product page tests
//!
//! Drives the mounted page the way a host would: building the tree,
//! dispatching the events a user or theme runtime produces, and asserting
//! on what ends up rendered.

use std::sync::Arc;
use std::sync::Mutex;

use serde_json::json;

use vitrine_core::{
    variant_change_detail, AvailabilityOracle, Document, DomEvent, NodeId, PageConfig,
    ProductPage, Variant, CHANGE, CLICK, KEYDOWN, SECTION_LOAD, SWATCH_CHANGE, VARIANT_CHANGE,
};

struct Page {
    triggers: Vec<NodeId>,
    panels: Vec<NodeId>,
    swatch_items: Vec<NodeId>,
    swatch_inputs: Vec<NodeId>,
    widget: NodeId,
    widget_inputs: Vec<NodeId>,
    stock_status: NodeId,
    stock_text: NodeId,
    stock_icon: NodeId,
}

/// Build the default-markup product section: two tabs, a three-colour
/// swatch group, a radio-style variant selector and a stock indicator.
fn build_page(doc: &Document, parent: NodeId) -> Page {
    let config = PageConfig::default();

    let tabs_wrapper = doc.create_element("div");
    doc.add_class(tabs_wrapper, &config.tabs_container);
    doc.append_child(parent, tabs_wrapper);
    let mut triggers = Vec::new();
    let mut panels = Vec::new();
    for _ in 0..2 {
        let button = doc.create_element("button");
        doc.add_class(button, &config.tabs.trigger);
        doc.append_child(tabs_wrapper, button);
        triggers.push(button);
    }
    for _ in 0..2 {
        let panel = doc.create_element("div");
        doc.add_class(panel, &config.tabs.panel);
        doc.append_child(tabs_wrapper, panel);
        panels.push(panel);
    }

    let swatch_container = doc.create_element("div");
    doc.add_class(swatch_container, &config.swatches_container);
    doc.append_child(parent, swatch_container);
    let mut swatch_items = Vec::new();
    let mut swatch_inputs = Vec::new();
    for value in ["Red", "Blue", "Green"] {
        let item = doc.create_element("div");
        doc.add_class(item, &config.swatches.item);
        doc.append_child(swatch_container, item);
        let input = doc.create_element("input");
        doc.add_class(input, &config.swatches.input);
        doc.set_attr(input, "name", "Color");
        doc.set_attr(input, "value", value);
        doc.append_child(item, input);
        swatch_items.push(item);
        swatch_inputs.push(input);
    }

    let widget = doc.create_element("variant-radios");
    doc.append_child(parent, widget);
    let group = doc.create_element("fieldset");
    doc.set_attr(group, &config.option_name_attr, "Color");
    doc.append_child(widget, group);
    let mut widget_inputs = Vec::new();
    for value in ["Red", "Blue", "Green"] {
        let input = doc.create_element("input");
        doc.set_attr(input, "value", value);
        doc.append_child(group, input);
        widget_inputs.push(input);
    }

    let stock_root = doc.create_element("div");
    doc.add_class(stock_root, &config.stock_container);
    doc.append_child(parent, stock_root);
    let stock_status = doc.create_element("div");
    doc.add_class(stock_status, &config.stock.status);
    doc.append_child(stock_root, stock_status);
    let stock_text = doc.create_element("span");
    doc.add_class(stock_text, &config.stock.text);
    doc.append_child(stock_status, stock_text);
    let stock_icon = doc.create_element("svg");
    doc.add_class(stock_icon, &config.stock.icon);
    doc.append_child(stock_status, stock_icon);

    Page {
        triggers,
        panels,
        swatch_items,
        swatch_inputs,
        widget,
        widget_inputs,
        stock_status,
        stock_text,
        stock_icon,
    }
}

/// Check a swatch the way a user click would: set the attribute, then let
/// the change event do the rest.
fn check_swatch(doc: &Document, input: NodeId) {
    doc.set_attr(input, "checked", "");
    doc.dispatch(DomEvent::new(CHANGE, input));
}

#[test]
fn test_customer_selects_a_colour() {
    let doc = Document::new();
    let page = build_page(&doc, doc.root());
    let _mounted = ProductPage::mount(&doc, PageConfig::default());

    // The host's variant widget reacts to mirrored changes by announcing
    // the resolved variant, sold out in this scenario
    let doc_handle = doc.clone();
    doc.add_listener(page.widget, CHANGE, move |_| {
        let sold_out = Variant::unavailable("Blue");
        doc_handle.dispatch(
            DomEvent::new(VARIANT_CHANGE, doc_handle.root())
                .with_detail(variant_change_detail(&sold_out)),
        );
    });

    let broadcasts = Arc::new(Mutex::new(Vec::new()));
    let broadcasts_clone = broadcasts.clone();
    doc.add_listener(doc.root(), SWATCH_CHANGE, move |event| {
        broadcasts_clone.lock().unwrap().push(event.detail.clone());
    });

    check_swatch(&doc, page.swatch_inputs[1]);

    // Selection mirrored into the variant widget
    assert!(doc.has_attr(page.widget_inputs[1], "checked"));
    assert!(!doc.has_attr(page.widget_inputs[0], "checked"));

    // Broadcast announced the choice
    let seen = broadcasts.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["value"], "Blue");
    assert_eq!(seen[0]["optionName"], "Color");

    // And the stock indicator repainted from the variant notification
    assert_eq!(doc.text(page.stock_text).as_deref(), Some("Out of stock"));
    assert!(doc.has_class(page.stock_status, "stock-status--out"));
    assert_eq!(
        doc.text(page.stock_icon).as_deref(),
        Some(vitrine_stock::ICON_OUT_OF_STOCK)
    );
}

#[test]
fn test_keyboard_tab_navigation() {
    let doc = Document::new();
    let page = build_page(&doc, doc.root());
    let _mounted = ProductPage::mount(&doc, PageConfig::default());

    doc.dispatch(DomEvent::new(CLICK, page.triggers[0]));
    assert!(doc.has_class(page.panels[0], "active"));

    doc.dispatch(
        DomEvent::new(KEYDOWN, page.triggers[0]).with_detail(json!({ "key": "ArrowLeft" })),
    );
    assert!(doc.has_class(page.triggers[1], "active"));
    assert!(doc.has_class(page.panels[1], "active"));
    assert!(!doc.has_class(page.panels[0], "active"));
    assert_eq!(doc.focused(), Some(page.triggers[1]));

    doc.dispatch(
        DomEvent::new(KEYDOWN, page.triggers[1]).with_detail(json!({ "key": "ArrowRight" })),
    );
    assert!(doc.has_class(page.triggers[0], "active"));
    assert_eq!(doc.focused(), Some(page.triggers[0]));
}

#[test]
fn test_theme_editor_section_swap() {
    let doc = Document::new();
    let section = doc.create_element("section");
    doc.append_child(doc.root(), section);
    let old = build_page(&doc, section);

    let config = PageConfig {
        design_mode: true,
        ..PageConfig::default()
    };
    let mounted = ProductPage::mount(&doc, config);
    assert_eq!(mounted.swatch_selector_count(), 1);

    // The editor replaces the whole section markup, then signals a reload
    doc.remove_subtree(section);
    let section = doc.create_element("section");
    doc.append_child(doc.root(), section);
    let fresh = build_page(&doc, section);
    doc.dispatch(DomEvent::new(SECTION_LOAD, doc.root()));

    // Fresh bindings are live
    doc.dispatch(DomEvent::new(CLICK, fresh.triggers[1]));
    assert!(doc.has_class(fresh.triggers[1], "active"));

    check_swatch(&doc, fresh.swatch_inputs[2]);
    assert!(doc.has_attr(fresh.widget_inputs[2], "checked"));

    // Stale handles point at removed nodes and stay dead
    assert!(!doc.contains(old.triggers[0]));
    doc.dispatch(DomEvent::new(CLICK, old.triggers[1]));
    assert!(!doc.has_class(old.triggers[1], "active"));
}

#[test]
fn test_custom_selectors_from_json() {
    let doc = Document::new();
    let config = PageConfig::from_json(
        r#"{
            "tabs_container": "info-tabs",
            "tabs": { "trigger": "info-tab", "panel": "info-pane", "active": "is-open" }
        }"#,
    )
    .unwrap();

    let wrapper = doc.create_element("div");
    doc.add_class(wrapper, "info-tabs");
    doc.append_child(doc.root(), wrapper);
    let mut triggers = Vec::new();
    for _ in 0..2 {
        let button = doc.create_element("button");
        doc.add_class(button, "info-tab");
        doc.append_child(wrapper, button);
        triggers.push(button);
    }
    for _ in 0..2 {
        let panel = doc.create_element("div");
        doc.add_class(panel, "info-pane");
        doc.append_child(wrapper, panel);
    }

    let mounted = ProductPage::mount(&doc, config);
    assert_eq!(mounted.tab_group_count(), 1);

    doc.dispatch(DomEvent::new(CLICK, triggers[1]));
    assert!(doc.has_class(triggers[1], "is-open"));
    assert!(!doc.has_class(triggers[0], "is-open"));
}

#[test]
fn test_dropdown_variant_selector() {
    let doc = Document::new();
    let page = build_page(&doc, doc.root());
    // Replace the radio widget's contents with a dropdown
    doc.remove_subtree(page.widget);
    let config = PageConfig::default();
    let widget = doc.create_element("variant-selects");
    doc.append_child(doc.root(), widget);
    let group = doc.create_element("div");
    doc.set_attr(group, &config.option_name_attr, "Color");
    doc.append_child(widget, group);
    let select = doc.create_element("select");
    doc.append_child(group, select);
    for value in ["Red", "Blue", "Green"] {
        let option = doc.create_element("option");
        doc.set_attr(option, "value", value);
        doc.append_child(select, option);
    }

    let _mounted = ProductPage::mount(&doc, config);
    check_swatch(&doc, page.swatch_inputs[2]);

    assert_eq!(doc.attr(select, "value").as_deref(), Some("Green"));
}

#[test]
fn test_inventory_aware_oracle() {
    struct MirrorVariant;

    impl AvailabilityOracle for MirrorVariant {
        fn is_available(&self, variant: &Variant, _value: &str) -> bool {
            variant.available
        }
    }

    let doc = Document::new();
    let page = build_page(&doc, doc.root());
    let mounted =
        ProductPage::mount_with_oracle(&doc, PageConfig::default(), Arc::new(MirrorVariant));

    mounted.update_availability(&Variant::unavailable("Red"));
    for (item, input) in page.swatch_items.iter().zip(&page.swatch_inputs) {
        assert!(doc.has_attr(*input, "disabled"));
        assert!(doc.has_class(*item, "swatch-unavailable"));
    }

    mounted.update_availability(&Variant::available("Red"));
    for (item, input) in page.swatch_items.iter().zip(&page.swatch_inputs) {
        assert!(!doc.has_attr(*input, "disabled"));
        assert!(!doc.has_class(*item, "swatch-unavailable"));
    }
}

#[test]
fn test_page_teardown_is_complete() {
    let doc = Document::new();
    let page = build_page(&doc, doc.root());
    let mounted = ProductPage::mount(&doc, PageConfig::default());

    mounted.dispose();

    assert_eq!(doc.listener_count(page.triggers[0], CLICK), 0);
    assert_eq!(doc.listener_count(page.swatch_inputs[0], CHANGE), 0);
    assert_eq!(doc.listener_count(doc.root(), VARIANT_CHANGE), 0);

    check_swatch(&doc, page.swatch_inputs[1]);
    assert!(!doc.has_attr(page.widget_inputs[1], "checked"));
    assert_eq!(doc.text(page.stock_text).as_deref(), Some(""));
}
