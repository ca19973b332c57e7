pub mod directory;
pub mod invitation;
pub mod organization;
pub mod role;
pub mod service;
pub mod user;
