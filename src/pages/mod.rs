//! Page components, one per route.

pub mod chat_list;
pub mod chat_room;
pub mod login;
pub mod main;
pub mod profile;
