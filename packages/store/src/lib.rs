//! Client-side state for Time Capsule.
//!
//! Everything here is plain data and state transitions with no UI or network
//! dependencies, so it is shared by the `api` and `ui` crates and tested on
//! its own.

pub mod detail;
pub mod form;
pub mod format;
pub mod list;
pub mod models;
pub mod session;

pub use detail::CapsuleDetails;
pub use form::{CapsuleForm, FieldError, RequestState, DELIVERY_DATE_HINT};
pub use list::{CapsuleListState, FetchTicket, ListError, ListPhase};
pub use models::{Capsule, CapsuleInput, CapsuleStatus};
pub use session::{SessionSnapshot, SessionState, SessionUser};
