//! `shopview-session`
//!
//! **Responsibility:** owning the live inputs of one search widget instance
//! (latest product list, filter set, disclosure mode) and rebuilding the
//! category overview whenever one of them changes.
//!
//! The network fetch layer is an external collaborator: it asks the session
//! for a [`RequestToken`] before sending a query and hands the token back with
//! the response. Responses to superseded requests are discarded.

pub mod request;
pub mod session;

pub use request::{RequestToken, RequestTracker};
pub use session::{Delivery, SearchSession};
