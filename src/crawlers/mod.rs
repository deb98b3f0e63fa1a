pub mod crawler;
pub mod web;

#[cfg(test)]
pub(crate) mod fake;

pub use crawler::Browser;
pub use web::WebDriverBrowser;
