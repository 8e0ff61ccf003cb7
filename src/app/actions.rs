//! Actions representing side effects for the caller to carry out.
//!
//! The event handler never performs I/O. When an event asks for something outside
//! the catalog core (leaving the screen, booking a doctor, submitting an order) it
//! returns an [`Action`] describing the request and the runtime decides what to do.
//!
//! # Example
//!
//! ```rust
//! use healthconnect::app::{Action, ConsultKind};
//! use healthconnect::domain::ItemId;
//!
//! let action = Action::BookAppointment {
//!     doctor_id: ItemId(1),
//!     doctor_name: "Dr. Sarah Johnson".to_string(),
//!     slot: "Today 3:00 PM".to_string(),
//!     consult: ConsultKind::Video,
//! };
//! assert!(matches!(action, Action::BookAppointment { .. }));
//! ```

use crate::domain::{ItemId, OrderDraft};
use serde::{Deserialize, Serialize};

/// How a booked consultation takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsultKind {
    InPerson,
    Video,
}

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    /// Leave the screen.
    Close,

    /// Request an appointment with the selected doctor.
    BookAppointment {
        doctor_id: ItemId,
        doctor_name: String,
        /// The doctor's advertised next free slot.
        slot: String,
        consult: ConsultKind,
    },

    /// Submit the cart as an order. The cart itself is left as is.
    PlaceOrder(OrderDraft),
}
