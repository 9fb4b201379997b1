//! Simulation core for a single-screen vertical shooter.
//!
//! Everything here is terminal-agnostic: the binary feeds an [`input::InputState`]
//! and menu actions into a [`session::Session`] and draws the returned
//! [`view::FrameView`].

pub mod archetypes;
pub mod config;
pub mod enemies;
pub mod entities;
pub mod error;
pub mod input;
pub mod session;
pub mod tuning;
pub mod view;
pub mod world;
