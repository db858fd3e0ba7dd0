/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use httpmock::MockServer;
use picasa::v2::{Client, ClientConfig, Creds};

pub(crate) const TOKEN: &str = "test-token";
pub(crate) const ALBUMS_PATH: &str = "/data/feed/api/user/default";

#[allow(dead_code)]
pub(crate) fn photos_path(album_id: &str) -> String {
    format!("/data/feed/api/user/default/albumid/{album_id}")
}

#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub(crate) fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_origin(&server.base_url())
}

#[allow(dead_code)]
pub(crate) fn client_for(server: &MockServer) -> Client {
    init_logging();
    Client::with_config(Creds::from_access_token(TOKEN), config_for(server)).unwrap()
}

#[allow(dead_code)]
pub(crate) fn client_with(config: ClientConfig) -> Client {
    init_logging();
    Client::with_config(Creds::from_access_token(TOKEN), config).unwrap()
}

const NAMESPACES: &str = "xmlns='http://www.w3.org/2005/Atom' \
    xmlns:openSearch='http://a9.com/-/spec/opensearch/1.1/' \
    xmlns:gphoto='http://schemas.google.com/photos/2007' \
    xmlns:media='http://search.yahoo.com/mrss/' \
    xmlns:exif='http://schemas.google.com/photos/exif/2007' \
    xmlns:georss='http://www.georss.org/georss' \
    xmlns:gml='http://www.opengis.net/gml'";

#[allow(dead_code)]
pub(crate) fn album_entry(id: &str) -> String {
    format!(
        "<entry>\
           <id>https://picasaweb.google.com/data/entry/api/user/12345/albumid/{id}</id>\
           <published>2014-03-01T10:20:30.000Z</published>\
           <updated>2014-03-02T10:20:30.000Z</updated>\
           <title>Album {id}</title>\
           <summary>About {id}</summary>\
           <link rel='http://schemas.google.com/g/2005#feed' type='application/atom+xml' \
                 href='https://picasaweb.google.com/data/feed/api/user/12345/albumid/{id}'/>\
           <author><name>Jane Doe</name><uri>https://picasaweb.google.com/12345</uri></author>\
           <gphoto:id>{id}</gphoto:id>\
           <gphoto:name>Album{id}</gphoto:name>\
           <media:group><media:title>Album {id}</media:title><media:keywords>a,b</media:keywords></media:group>\
         </entry>"
    )
}

#[allow(dead_code)]
pub(crate) fn photo_entry(id: &str, position: &str) -> String {
    format!(
        "<entry>\
           <id>https://picasaweb.google.com/data/entry/api/user/12345/albumid/100/photoid/{id}</id>\
           <title>IMG_{id}.jpg</title>\
           <summary></summary>\
           <content type='image/jpeg' src='https://lh3.example.com/{id}.jpg'/>\
           <gphoto:id>{id}</gphoto:id>\
           <gphoto:albumid>100</gphoto:albumid>\
           <georss:where><gml:Point><gml:pos>{position}</gml:pos></gml:Point></georss:where>\
           <media:group>\
             <media:content url='https://lh3.example.com/media/{id}.jpg' type='image/jpeg'/>\
             <media:title>IMG_{id}.jpg</media:title>\
           </media:group>\
         </entry>"
    )
}

/// A feed page. `num_photos` is the album's own count, present on photo listings.
#[allow(dead_code)]
pub(crate) fn feed(total: u64, start: u64, num_photos: Option<u64>, entries: &[String]) -> String {
    let num_photos = num_photos
        .map(|n| format!("<gphoto:numphotos>{n}</gphoto:numphotos>"))
        .unwrap_or_default();
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
         <feed {NAMESPACES}>\
           <id>https://picasaweb.google.com/data/feed/api/user/12345</id>\
           <title>12345</title>\
           <author><name>Jane Doe</name><uri>https://picasaweb.google.com/12345</uri></author>\
           <openSearch:totalResults>{total}</openSearch:totalResults>\
           <openSearch:startIndex>{start}</openSearch:startIndex>\
           <openSearch:itemsPerPage>1000</openSearch:itemsPerPage>\
           <gphoto:user>12345</gphoto:user>\
           <gphoto:nickname>Jane</gphoto:nickname>\
           {num_photos}\
           {}\
         </feed>",
        entries.concat()
    )
}

#[allow(dead_code)]
pub(crate) fn single_entry(entry: &str) -> String {
    // Upload responses carry the namespaces on the entry itself
    entry.replacen("<entry>", &format!("<entry {NAMESPACES}>"), 1)
}

#[allow(dead_code)]
pub(crate) fn album_entries(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| album_entry(id)).collect()
}
