pub mod config;
pub mod crawl;
pub mod data;
pub mod error;
pub mod pages;
pub mod problem;
pub mod template;
pub mod update;
pub mod url;
