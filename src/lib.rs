//! Launch records dashboard.
//!
//! A static table of launches is loaded once, filtered by launch site and
//! payload range, and rendered as an outcome pie chart and a payload vs.
//! outcome scatter chart. Two shells sit on top of the same engine: the
//! HTTP dashboard ([`server`]) and the native viewer ([`app`]).

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod server;
pub mod state;
pub mod ui;
