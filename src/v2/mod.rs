/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod album;
pub mod api;
pub mod client;
pub mod config;
pub mod debug_tee;
pub mod download;
pub mod errors;
pub mod feed;
pub mod paginator;
mod parsers;
pub mod photo;
pub mod properties;
pub mod upload;
pub mod user;

pub use album::*;
pub use api::*;
pub use client::*;
pub use config::*;
pub use debug_tee::*;
pub use download::*;
pub use errors::*;
pub use paginator::*;
pub use photo::*;
pub use properties::*;
pub use upload::*;
pub use user::*;
