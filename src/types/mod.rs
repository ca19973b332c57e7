pub mod directory;
pub mod error;
pub mod identity;
pub mod invitation;
pub mod mail;
pub mod response;
pub mod user;
