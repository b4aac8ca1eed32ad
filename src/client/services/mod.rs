pub mod blog_service;
pub mod fetch_service;
