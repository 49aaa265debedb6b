//! Local publishing adapters: link log and clock page.

mod atomic;
mod link_log;
mod page;

pub use link_log::JsonLinkLog;
pub use page::TemplatePageWriter;
