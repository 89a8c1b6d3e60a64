//! `TaskOrganizer`: terminal task list backed by a REST task service.

pub mod app;
pub mod components;
pub mod config;
pub mod coordinator;
pub mod service;
pub mod ui;
