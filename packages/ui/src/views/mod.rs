mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod app_shell;
pub use app_shell::AppShell;

mod landing;
pub use landing::LandingView;

mod status;
pub use status::{LoadingView, SignInErrorView};

mod home;
pub use home::HomeView;
