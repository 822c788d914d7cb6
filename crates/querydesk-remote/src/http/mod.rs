//! HTTP implementation of the [`Collaborator`](crate::Collaborator) trait.
//!
//! Form-style endpoints take multipart bodies; regeneration takes one
//! JSON body.

mod api;
mod client;
mod config;

pub use client::HttpCollaborator;
pub use config::HttpConfig;
