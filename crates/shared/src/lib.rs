//! Types shared by the section tracker, the carousel engine and their hosts.

pub mod config;
pub mod domain;
pub mod error;
pub mod observer;
pub mod protocol;
