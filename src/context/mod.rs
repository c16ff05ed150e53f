pub mod resolver;
pub mod sanitize;

pub use resolver::{extract_domain, resolve_context, BrowserFamily};
pub use sanitize::sanitize;
