/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Downloads every album of a user, with the metadata of each album and photo stored as JSON
//! next to the images.

extern crate picasa;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dotenvy::dotenv;
use log::{error, info};
use picasa::v2::{
    Album, BoundingBox, Client, ClientConfig, Creds, PicasaError, Photo, QueryParams, TokenSource,
    User,
};
use serde::Deserialize;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pica-dl")]
#[command(about = "Simple Picasa Web Albums downloader")]
struct Args {
    /// OAuth2 access token
    #[arg(long, env = "PICASA_ACCESS_TOKEN")]
    token: Option<String>,

    /// Token cache file holding {"access_token": "..."}, read when no token is given
    #[arg(long, default_value = "token-cache.json")]
    cache: PathBuf,

    /// Directory to download images to. Without it the photos are only listed.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Directory to save the response XMLs to
    #[arg(long)]
    debug: Option<PathBuf>,

    /// Bounding box for the query (west,south,east,north coordinates)
    #[arg(long)]
    bbox: Option<BoundingBox>,

    /// Location for the query (e.g. London)
    #[arg(long, default_value = "")]
    location: String,

    /// Text to search for in tags, comments and title
    #[arg(long, default_value = "")]
    text: String,

    /// Tag to search for
    #[arg(long, default_value = "")]
    tag: String,

    /// User whose albums are downloaded, the authenticated user when omitted
    #[arg(default_value = "")]
    user: String,
}

// Token stored in the cache json file
#[derive(Deserialize, Debug)]
struct CachedToken {
    access_token: String,
}

/// Reads the token from the cache on every request so an external refresher can update it
#[derive(Debug)]
struct TokenCache {
    path: PathBuf,
}

impl TokenSource for TokenCache {
    fn access_token(&self) -> Result<String, PicasaError> {
        let file = File::open(&self.path)?;
        let cached: CachedToken = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| PicasaError::Auth(format!("{}: {err}", self.path.display())))?;
        Creds::from_access_token(&cached.access_token).access_token()
    }
}

fn make_client(args: &Args) -> Result<Client> {
    let mut config = ClientConfig::default();
    if let Some(debug) = &args.debug {
        config = config.with_debug_dir(debug);
    }
    let client = match &args.token {
        Some(token) => Client::with_config(Creds::from_access_token(token), config)?,
        None => Client::with_config(
            TokenCache {
                path: args.cache.clone(),
            },
            config,
        )?,
    };
    Ok(client)
}

// Names come from the server, so only their last normal component may be joined to a local dir
fn local_name(name: &str) -> Result<&OsStr> {
    Path::new(name)
        .file_name()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| anyhow!("refusing to use {name:?} as a file name"))
}

// The file is only created once the server has answered with the image
async fn download_to(client: &Client, photo: &Photo, path: &Path) -> Result<u64> {
    let download = photo.download(client).await?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let written = download.copy_to(&mut file).await?;
    Ok(written)
}

async fn download_album(
    client: &Client,
    args: &Args,
    query: &QueryParams,
    album: &Album,
) -> Result<()> {
    let album_json = serde_json::to_vec(album)?;
    let dir = match &args.dir {
        Some(root) => {
            let name = local_name(&album.name)?;
            let dir = root.join(name);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("cannot create directory {}", dir.display()))?;
            let path = dir.join(format!("album-{}.json", name.to_string_lossy()));
            std::fs::write(&path, &album_json)
                .with_context(|| format!("writing {}", path.display()))?;
            Some(dir)
        }
        None => None,
    };
    info!("downloading album {}", String::from_utf8_lossy(&album_json));

    let photos = match Photo::list_with_query(client, &args.user, &album.id, query, None).await {
        Ok(photos) => photos,
        Err(err) => {
            error!("error listing photos of {}: {err}", album.id);
            return Ok(());
        }
    };
    info!("album {} contains {} photos", album.id, photos.len());

    for photo in &photos {
        let photo_json = serde_json::to_vec(photo)?;
        info!("photo: {}", String::from_utf8_lossy(&photo_json));
        let Some(dir) = &dir else {
            continue;
        };
        let name = match local_name(&photo.filename) {
            Ok(name) => name,
            Err(err) => {
                error!("skipping photo {}: {err}", photo.id);
                continue;
            }
        };
        let path = dir.join(name);
        let meta = dir.join(format!("{}.json", name.to_string_lossy()));
        std::fs::write(&meta, &photo_json).with_context(|| format!("writing {}", meta.display()))?;
        let size = download_to(client, photo, &path)
            .await
            .with_context(|| format!("downloading {}", photo.url))?;
        info!("saved {} ({size} bytes)", path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let query = QueryParams {
        bbox: args.bbox,
        location: args.location.clone(),
        text: args.text.clone(),
        tag: args.tag.clone(),
    };
    let client = make_client(&args)?;

    match User::authenticated_user_info(&client).await {
        Ok(user) => info!("user={user:?}"),
        Err(err) => error!("cannot get user info: {err}"),
    }

    let albums = Album::list(&client, &args.user)
        .await
        .context("error listing albums")?;
    info!("user {} has {} albums", args.user, albums.len());

    for album in &albums {
        download_album(&client, &args, &query, album).await?;
    }
    Ok(())
}
