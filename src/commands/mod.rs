//! Command implementations for the MBA stats CLI

pub mod common;
pub mod free_agents;
pub mod leaderboard;
pub mod park;
pub mod player;
pub mod record;
pub mod register;
pub mod role;
