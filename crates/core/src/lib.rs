//! Ply Core - Game abstractions shared across the workspace
//!
//! This crate provides the core [`Game`] trait: the interface through which
//! external collaborators (user interfaces, notation layers, search) drive a
//! turn-based board game without depending on its rules internals.

mod game;

pub use game::Game;
