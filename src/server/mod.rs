mod flash;
mod home;
pub mod images;
mod login;
mod notes;
pub mod response;
mod router;
pub mod validation;
pub mod views;

pub use images::ImageBank;
pub use router::{AppState, create_router};
