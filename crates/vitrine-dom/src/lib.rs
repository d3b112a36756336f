//! Vitrine Element Tree
//!
//! A minimal in-memory stand-in for the host page's document: widgets own all
//! state and use this tree purely as a render target and an event conduit.
//! Hosts build the tree programmatically; nothing here parses markup.
//!
//! Events dispatched on a node run synchronously on the node itself and then
//! on each ancestor up to the document root, so a listener at the root sees
//! every notification produced anywhere in the tree.

mod document;
mod event;
mod node;

pub use document::Document;
pub use event::{DomEvent, ListenerId, CHANGE, CLICK, KEYDOWN};
pub use node::NodeId;
