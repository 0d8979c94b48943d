//! PetFriends client library
//!
//! The client, its wire types and configuration, exposed for the
//! `petfriends` binary and the API test suite.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod output;
pub mod photo;
pub mod response;
pub mod types;

pub use client::PetFriends;
pub use error::CliError;
pub use response::{ApiResponse, Body};
pub use types::{ALL_PETS, AuthKey, Credentials, MY_PETS, Pet, PetForm, PetList};
