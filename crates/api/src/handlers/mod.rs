pub mod generate;
pub mod media;
pub mod og;
pub mod pages;
