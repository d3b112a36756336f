//! Product page
//!
//! Page-wide coordination: discovers component containers, builds the
//! selection registry from the host's variant-selector widgets, and owns
//! the lifecycle of every mounted component. Bound containers carry a
//! marker attribute so a second mount pass skips them; reload disposes
//! everything before rediscovering from the current tree.

use std::sync::Arc;

use parking_lot::RwLock;

use vitrine_dom::{Document, ListenerId, NodeId};
use vitrine_product::{Variant, SECTION_LOAD};
use vitrine_stock::StockIndicator;
use vitrine_swatches::{
    AlwaysAvailable, AvailabilityOracle, SelectionRegistry, SwatchError, SwatchSelector,
    VariantSelectorTarget,
};
use vitrine_tabs::TabGroup;

use crate::config::PageConfig;
use crate::error::CoreError;
use crate::Result;

/// Marker attribute set on containers with live bindings.
pub const BOUND_ATTR: &str = "data-vitrine-bound";

struct PageInner {
    tabs: Vec<Arc<TabGroup>>,
    swatches: Vec<Arc<SwatchSelector>>,
    stock: Vec<Arc<StockIndicator>>,
    /// Containers carrying the marker attribute
    marked: Vec<NodeId>,
    section_listener: Option<ListenerId>,
    disposed: bool,
}

/// All product-page components mounted over one document.
pub struct ProductPage {
    doc: Document,
    config: PageConfig,
    registry: SelectionRegistry,
    oracle: Arc<dyn AvailabilityOracle>,
    inner: Arc<RwLock<PageInner>>,
}

impl ProductPage {
    /// Mount every component the configured containers call for, with the
    /// stub availability oracle.
    pub fn mount(doc: &Document, config: PageConfig) -> Self {
        Self::mount_with_oracle(doc, config, Arc::new(AlwaysAvailable))
    }

    /// Mount with a custom availability oracle.
    ///
    /// When `design_mode` is set the page also subscribes to
    /// `section:load` and rebinds itself on each one.
    pub fn mount_with_oracle(
        doc: &Document,
        config: PageConfig,
        oracle: Arc<dyn AvailabilityOracle>,
    ) -> Self {
        let registry = SelectionRegistry::new();
        let inner = Arc::new(RwLock::new(PageInner {
            tabs: Vec::new(),
            swatches: Vec::new(),
            stock: Vec::new(),
            marked: Vec::new(),
            section_listener: None,
            disposed: false,
        }));

        bind(doc, &config, &registry, &oracle, &inner);

        if config.design_mode {
            let weak = Arc::downgrade(&inner);
            let doc_handle = doc.clone();
            let config_handle = config.clone();
            let registry_handle = registry.clone();
            let oracle_handle = oracle.clone();
            let id = doc.add_listener(doc.root(), SECTION_LOAD, move |_| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if inner.read().disposed {
                    return;
                }
                tracing::info!("section reloaded, rebinding product page");
                unbind(&doc_handle, &registry_handle, &inner);
                bind(
                    &doc_handle,
                    &config_handle,
                    &registry_handle,
                    &oracle_handle,
                    &inner,
                );
            });
            inner.write().section_listener = id;
        }

        Self {
            doc: doc.clone(),
            config,
            registry,
            oracle,
            inner,
        }
    }

    /// Dispose every live component, then rediscover from the current
    /// tree. Old bindings are never reused.
    pub fn reload(&self) {
        if self.inner.read().disposed {
            return;
        }
        unbind(&self.doc, &self.registry, &self.inner);
        bind(
            &self.doc,
            &self.config,
            &self.registry,
            &self.oracle,
            &self.inner,
        );
    }

    /// Full teardown: components, registry, markers and the section
    /// listener. Idempotent.
    pub fn dispose(&self) {
        {
            let mut state = self.inner.write();
            if state.disposed {
                return;
            }
            state.disposed = true;
        }
        unbind(&self.doc, &self.registry, &self.inner);
        let listener = self.inner.write().section_listener.take();
        if let Some(id) = listener {
            self.doc.remove_listener(id);
        }
        tracing::info!("product page disposed");
    }

    /// Activate tab `index` within tab group `group`.
    pub fn activate_tab(&self, group: usize, index: usize) -> Result<()> {
        let tab_group = self
            .inner
            .read()
            .tabs
            .get(group)
            .cloned()
            .ok_or(CoreError::UnknownTabGroup(group))?;
        tab_group.activate(index).map_err(CoreError::from)
    }

    /// Select a swatch value on the first selector that carries it.
    pub fn select_swatch(&self, value: &str) -> Result<()> {
        let swatches = self.inner.read().swatches.clone();
        for selector in &swatches {
            if selector.is_inert() {
                continue;
            }
            match selector.select(value) {
                Ok(()) => return Ok(()),
                Err(SwatchError::UnknownValue(_)) => continue,
            }
        }
        Err(SwatchError::UnknownValue(value.to_string()).into())
    }

    /// Re-render availability on every swatch selector.
    pub fn update_availability(&self, variant: &Variant) {
        let swatches = self.inner.read().swatches.clone();
        for selector in &swatches {
            selector.update_availability(variant);
        }
    }

    /// Number of mounted tab groups, inert ones included.
    pub fn tab_group_count(&self) -> usize {
        self.inner.read().tabs.len()
    }

    /// Number of mounted swatch selectors, inert ones included.
    pub fn swatch_selector_count(&self) -> usize {
        self.inner.read().swatches.len()
    }

    /// Number of mounted stock indicators.
    pub fn stock_indicator_count(&self) -> usize {
        self.inner.read().stock.len()
    }

    /// The page's selection registry. Hosts may register additional
    /// targets; reload clears them along with the built-in ones.
    pub fn registry(&self) -> &SelectionRegistry {
        &self.registry
    }
}

/// Scan the tree and mount components over every unmarked container.
fn bind(
    doc: &Document,
    config: &PageConfig,
    registry: &SelectionRegistry,
    oracle: &Arc<dyn AvailabilityOracle>,
    inner: &Arc<RwLock<PageInner>>,
) {
    // One target per option group of each variant-selector widget
    for tag in &config.variant_selector_tags {
        for widget in doc.query_tag(doc.root(), tag) {
            for group in doc.query_has_attr(widget, &config.option_name_attr) {
                let Some(option_name) = doc.attr(group, &config.option_name_attr) else {
                    continue;
                };
                registry.register(&option_name, Arc::new(VariantSelectorTarget::new(doc, group)));
            }
        }
    }

    let mut tabs = Vec::new();
    let mut marked = Vec::new();
    for container in doc.query_class(doc.root(), &config.tabs_container) {
        if doc.has_attr(container, BOUND_ATTR) {
            continue;
        }
        let group = TabGroup::mount(doc, container, &config.tabs);
        if !group.is_inert() {
            doc.set_attr(container, BOUND_ATTR, "");
            marked.push(container);
        }
        tabs.push(Arc::new(group));
    }

    let mut swatches = Vec::new();
    for container in doc.query_class(doc.root(), &config.swatches_container) {
        if doc.has_attr(container, BOUND_ATTR) {
            continue;
        }
        let selector = SwatchSelector::mount(
            doc,
            container,
            &config.swatches,
            registry.clone(),
            oracle.clone(),
        );
        if !selector.is_inert() {
            doc.set_attr(container, BOUND_ATTR, "");
            marked.push(container);
        }
        swatches.push(Arc::new(selector));
    }

    let mut stock = Vec::new();
    for container in doc.query_class(doc.root(), &config.stock_container) {
        if doc.has_attr(container, BOUND_ATTR) {
            continue;
        }
        let indicator = StockIndicator::mount(doc, container, &config.stock);
        if !indicator.is_inert() {
            doc.set_attr(container, BOUND_ATTR, "");
            marked.push(container);
        }
        stock.push(Arc::new(indicator));
    }

    tracing::info!(
        tabs = tabs.len(),
        swatches = swatches.len(),
        stock = stock.len(),
        targets = registry.len(),
        "product page bound"
    );

    let mut state = inner.write();
    state.tabs = tabs;
    state.swatches = swatches;
    state.stock = stock;
    state.marked = marked;
}

/// Dispose every component, clear the registry and strip the markers.
fn unbind(doc: &Document, registry: &SelectionRegistry, inner: &Arc<RwLock<PageInner>>) {
    let (tabs, swatches, stock, marked) = {
        let mut state = inner.write();
        (
            std::mem::take(&mut state.tabs),
            std::mem::take(&mut state.swatches),
            std::mem::take(&mut state.stock),
            std::mem::take(&mut state.marked),
        )
    };
    for group in &tabs {
        group.dispose();
    }
    for selector in &swatches {
        selector.dispose();
    }
    for indicator in &stock {
        indicator.dispose();
    }
    registry.clear();
    for container in marked {
        doc.remove_attr(container, BOUND_ATTR);
    }
}
