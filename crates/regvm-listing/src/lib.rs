pub mod model;

pub use model::{build_listing, render_text, Line, Listing, Warning};
