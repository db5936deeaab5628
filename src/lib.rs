pub mod animation;
pub mod app;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod scene;
pub mod ui;
pub mod widget;

pub use error::{Error, Result};
