//! Getting started content for the editor welcome page
//!
//! [`content::Registry::builtin`] returns the start entries and walkthroughs in
//! display order. Content files in TOML or JSON can be loaded and validated with
//! [`content::manifest::load`].

pub mod commands;
pub mod config;
pub mod content;
pub mod ui;

pub use content::Registry;
