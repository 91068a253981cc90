//! This crate contains all shared UI for the workspace.

pub mod views;

mod auth;
pub use auth::{use_session, SessionGate, SessionProvider, SignInButton, SignOutButton};

mod capsule_list;
pub use capsule_list::CapsuleList;

mod create_capsule;
pub use create_capsule::CreateCapsuleForm;

mod capsule_modal;
pub use capsule_modal::CapsuleModal;
