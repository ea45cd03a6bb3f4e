pub mod fallback;

pub use fallback::{first_present, first_present_or};
