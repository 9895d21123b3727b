//! Response rendering: HTML pages and PNG preview cards.

pub mod html;
pub mod og;
