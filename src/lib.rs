//! Ideaboard - backend API for a topic and idea voting platform.
//!
//! Authenticated users create topics, post ideas under them and vote on
//! ideas. Editing or deleting a resource is restricted to its owner; posting
//! an idea under someone else's topic and voting on any idea are open to
//! every authenticated user.

#![allow(missing_docs)]

pub mod api;
pub mod app;
pub mod auth;
pub mod authorization;
pub mod boot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod database;
pub mod environment;
pub mod pagination;
pub mod password;
pub mod repository;
pub mod router;
pub mod services;
pub mod setup_tracing;

#[cfg(test)]
pub mod tests;
