//! Reusable view components.

pub mod bottom_nav;
pub mod match_modal;
pub mod swipe_card;
