//! Services layer (ports + adapters).
//!
//! - `ports`: collaborator contracts used by the controller.
//! - `adapters`: local file system, in-memory documents, terminal dialogs.
//! - `bus`: document notifications flowing back to the controller.

pub mod adapters;
pub mod bus;
pub mod ports;

pub use bus::{document_bus, DocumentBusReceiver, DocumentBusSender, DocumentEvent};
