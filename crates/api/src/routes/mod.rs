pub mod api;
pub mod health;
pub mod media;
pub mod pages;

/// Path prefix under which locally held artwork is served.
pub const MEDIA_PATH: &str = "/media";
