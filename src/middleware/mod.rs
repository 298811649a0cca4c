pub mod error_page;
pub mod permissions;
pub mod security_headers;
