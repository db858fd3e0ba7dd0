/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Picasa
//!
//! This library was created for working with the Picasa Web Albums Data API (GData version 2).
//!
//! ## Features
//!
//! - Album listing of a user, walked across every feed page
//! - Photo listing of an album
//!     - Can filter by bounding box, location, text and tag
//! - User information
//! - Photo download (streamed)
//! - Photo upload
//! - Optional capture of every raw feed response for debugging
//!
//! *The API uses OAuth2. This library only attaches the bearer token. Getting (and refreshing)
//! the token is left up to the consumer of this library, see [`v2::TokenSource`].*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! picasa = "0.3.0"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use picasa::v2::{Album, Client, Creds, Photo};
//! use std::fs::File;
//!
//!async fn download_everything(access_token: &str) -> anyhow::Result<()> {
//!    // The access token is obtained via an OAuth2 flow external to this library
//!    let client = Client::new(Creds::from_access_token(access_token))?;
//!
//!    // An empty user id means the authenticated user
//!    for album in Album::list(&client, "").await? {
//!        for photo in Photo::list(&client, "", &album.id).await? {
//!            let mut file = File::create(&photo.filename)?;
//!            photo.download(&client).await?.copy_to(&mut file).await?;
//!        }
//!    }
//!    Ok(())
//!}
//! ```
//!
pub mod v2;
