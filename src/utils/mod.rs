pub mod gate;
pub mod identity;
pub mod mail;
pub mod token;
pub mod webutils;
