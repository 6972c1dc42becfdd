//! # Connect Four
//!
//! A two-player Connect Four game. The engine is a plain library that takes
//! column drops and emits placement and end-of-game events; a terminal UI
//! built with Ratatui subscribes to those events and draws the board.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, players, engine, events
//! - [`setup`]: Color selection and display helpers used before a game starts
//! - [`ui`]: Terminal UI: board view and key handling
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod setup;
pub mod ui;
