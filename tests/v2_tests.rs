/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{
        ALBUMS_PATH, TOKEN, album_entries, client_for, client_with, config_for, feed, photo_entry,
        photos_path,
    };
    use futures::{StreamExt, pin_mut};
    use httpmock::prelude::*;
    use picasa::v2::{Album, CancelFlag, GeoPolicy, Photo, PicasaError, QueryParams};
    use pretty_assertions::assert_eq;

    fn ids(albums: &[Album]) -> Vec<&str> {
        albums.iter().map(|a| a.id.as_str()).collect()
    }

    #[tokio::test]
    async fn empty_feed_yields_empty_collection() {
        let server = MockServer::start();
        let page = server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "1");
            then.status(200).body(feed(12, 1, None, &[]));
        });

        let albums = Album::list(&client_for(&server), "").await.unwrap();
        page.assert_hits(1);
        assert!(albums.is_empty());
    }

    #[tokio::test]
    async fn single_page_does_not_fetch_again() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "1");
            then.status(200)
                .body(feed(3, 1, None, &album_entries(&["1", "2", "3"])));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "4");
            then.status(200).body(feed(3, 4, None, &[]));
        });

        let albums = Album::list(&client_for(&server), "").await.unwrap();
        first.assert_hits(1);
        second.assert_hits(0);
        assert_eq!(ids(&albums), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn pages_accumulate_in_server_order() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET)
                .path(ALBUMS_PATH)
                .query_param("start-index", "1")
                .header("authorization", format!("Bearer {TOKEN}"))
                .header("gdata-version", "2");
            then.status(200)
                .body(feed(5, 1, None, &album_entries(&["e", "d"])));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "3");
            then.status(200)
                .body(feed(5, 3, None, &album_entries(&["c", "b", "a"])));
        });

        let albums = Album::list(&client_for(&server), "").await.unwrap();
        first.assert_hits(1);
        second.assert_hits(1);
        assert_eq!(ids(&albums), vec!["e", "d", "c", "b", "a"]);

        let album = &albums[0];
        assert_eq!(album.title, "Album e");
        assert_eq!(album.name, "Albume");
        assert_eq!(album.author_name, "Jane Doe");
        assert_eq!(album.keywords, vec!["a", "b"]);
        assert_eq!(
            album.url,
            "https://picasaweb.google.com/data/feed/api/user/12345/albumid/e"
        );
    }

    #[tokio::test]
    async fn irregular_page_sizes_follow_actual_count() {
        let server = MockServer::start();
        let pages = [("1", vec!["1"]), ("2", vec!["2", "3", "4"]), ("5", vec!["5"])];
        let mocks: Vec<_> = pages
            .iter()
            .map(|(start, page_ids)| {
                let body = feed(5, start.parse().unwrap(), None, &album_entries(page_ids));
                server.mock(|when, then| {
                    when.method(GET).path(ALBUMS_PATH).query_param("start-index", *start);
                    then.status(200).body(body);
                })
            })
            .collect();

        let albums = Album::list(&client_for(&server), "").await.unwrap();
        for mock in &mocks {
            mock.assert_hits(1);
        }
        assert_eq!(ids(&albums), vec!["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn remote_failure_discards_earlier_pages() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "1");
            then.status(200)
                .body(feed(4, 1, None, &album_entries(&["1", "2"])));
        });
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "3");
            then.status(500).body("backend exploded");
        });

        let err = Album::list(&client_for(&server), "").await.unwrap_err();
        match err {
            PicasaError::Remote {
                method,
                url,
                status,
                body,
            } => {
                assert_eq!(method, "GET");
                assert!(url.contains("start-index=3"), "url was {url}");
                assert_eq!(status, 500);
                assert_eq!(body, "backend exploded");
            }
            other => panic!("expected a remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_page_is_a_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH);
            then.status(200).body("<feed><entry><title>cut off");
        });

        let err = Album::list(&client_for(&server), "").await.unwrap_err();
        assert!(err.is_decode(), "got {err:?}");
    }

    #[tokio::test]
    async fn entry_without_id_fails_the_listing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH);
            then.status(200)
                .body(feed(1, 1, None, &["<entry><title>anonymous</title></entry>".to_string()]));
        });

        let err = Album::list(&client_for(&server), "").await.unwrap_err();
        assert!(matches!(err, PicasaError::Mapping(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn photo_listing_stops_on_album_photo_count() {
        let server = MockServer::start();
        let path = photos_path("100");
        let first = server.mock(|when, then| {
            when.method(GET).path(&path).query_param("start-index", "1");
            // The search total is larger than the album's own count
            then.status(200).body(feed(
                50,
                1,
                Some(2),
                &[photo_entry("1", "12.5 -3.25"), photo_entry("2", "not-a-number x")],
            ));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path(&path).query_param("start-index", "3");
            then.status(200).body(feed(50, 3, Some(2), &[]));
        });

        let photos = Photo::list(&client_for(&server), "", "100").await.unwrap();
        first.assert_hits(1);
        second.assert_hits(0);
        assert_eq!(photos.len(), 2);
        assert_eq!((photos[0].latitude, photos[0].longitude), (12.5, -3.25));
        assert_eq!((photos[1].latitude, photos[1].longitude), (0.0, 0.0));
        assert_eq!(photos[0].url, "https://lh3.example.com/1.jpg");
        assert_eq!(photos[0].filename, "IMG_1.jpg");
        assert_eq!(photos[0].album_id, "100");
    }

    #[tokio::test]
    async fn photo_listing_falls_back_to_total_results() {
        let server = MockServer::start();
        let path = photos_path("100");
        let first = server.mock(|when, then| {
            when.method(GET).path(&path).query_param("start-index", "1");
            then.status(200)
                .body(feed(2, 1, None, &[photo_entry("1", "")]));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path(&path).query_param("start-index", "2");
            then.status(200)
                .body(feed(2, 2, None, &[photo_entry("2", "")]));
        });

        let photos = Photo::list(&client_for(&server), "", "100").await.unwrap();
        first.assert_hits(1);
        second.assert_hits(1);
        assert_eq!(photos.len(), 2);
    }

    #[tokio::test]
    async fn strict_geo_policy_rejects_zero_position() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(photos_path("100"));
            then.status(200)
                .body(feed(1, 1, Some(1), &[photo_entry("1", "0.0 0.0")]));
        });

        let client = client_with(config_for(&server).with_geo_policy(GeoPolicy::Strict));
        let err = Photo::list(&client, "", "100").await.unwrap_err();
        assert!(matches!(err, PicasaError::Mapping(_)), "got {err:?}");

        let photos = Photo::list(&client_for(&server), "", "100").await.unwrap();
        assert_eq!(photos[0].latitude, 0.0);
    }

    #[tokio::test]
    async fn photo_query_is_sent() {
        let server = MockServer::start();
        let page = server.mock(|when, then| {
            when.method(GET)
                .path(photos_path("100"))
                .query_param("start-index", "1")
                .query_param("q", "beach")
                .query_param("tag", "sunset")
                .query_param("bbox", "-10,35.5,5,44")
                .query_param("max-results", "25");
            then.status(200).body(feed(0, 1, Some(0), &[]));
        });

        let query = QueryParams {
            bbox: Some("-10,35.5,5,44".parse().unwrap()),
            text: "beach".to_string(),
            tag: "sunset".to_string(),
            ..Default::default()
        };
        let client = client_with(config_for(&server).with_max_results(25));
        let photos = Photo::list_with_query(&client, "", "100", &query, None)
            .await
            .unwrap();
        page.assert_hits(1);
        assert!(photos.is_empty());
    }

    #[tokio::test]
    async fn repeated_traversal_is_identical() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "1");
            then.status(200)
                .body(feed(3, 1, None, &album_entries(&["1", "2"])));
        });
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "3");
            then.status(200)
                .body(feed(3, 3, None, &album_entries(&["3"])));
        });

        let client = client_for(&server);
        let first = Album::list(&client, "").await.unwrap();
        let second = Album::list(&client, "").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn cancelled_traversal_fetches_nothing() {
        let server = MockServer::start();
        let page = server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH);
            then.status(200)
                .body(feed(1, 1, None, &album_entries(&["1"])));
        });

        let cancel = CancelFlag::new();
        cancel.cancel();
        let err = Album::list_with_cancel(&client_for(&server), "", &cancel)
            .await
            .unwrap_err();
        page.assert_hits(0);
        assert!(matches!(err, PicasaError::Cancelled { accumulated: 0 }));
    }

    #[tokio::test]
    async fn paginator_retries_the_failed_page() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "1");
            then.status(200)
                .body(feed(3, 1, None, &album_entries(&["1", "2"])));
        });
        let mut failing = server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "3");
            then.status(503);
        });

        let mut pages = Album::pages(&client_for(&server), "").unwrap();
        assert_eq!(pages.next_page().await.unwrap().unwrap().len(), 2);
        let err = pages.next_page().await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(pages.cursor().start_index, 3);
        assert_eq!(pages.cursor().accumulated, 2);

        failing.delete();
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "3");
            then.status(200)
                .body(feed(3, 3, None, &album_entries(&["3"])));
        });
        let page = pages.next_page().await.unwrap().unwrap();
        assert_eq!(ids(&page), vec!["3"]);
        assert!(pages.is_done());
        assert!(pages.next_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stream_yields_pages() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "1");
            then.status(200)
                .body(feed(3, 1, None, &album_entries(&["1", "2"])));
        });
        server.mock(|when, then| {
            when.method(GET).path(ALBUMS_PATH).query_param("start-index", "3");
            then.status(200)
                .body(feed(3, 3, None, &album_entries(&["3"])));
        });

        let client = client_for(&server);
        let pages = Album::stream(&client, "").unwrap();
        pin_mut!(pages);
        let mut sizes = Vec::new();
        while let Some(page) = pages.next().await {
            sizes.push(page.unwrap().len());
        }
        assert_eq!(sizes, vec![2, 1]);
    }

    #[tokio::test]
    async fn named_user_is_substituted() {
        let server = MockServer::start();
        let page = server.mock(|when, then| {
            when.method(GET).path("/data/feed/api/user/jane.doe");
            then.status(200).body(feed(0, 1, None, &[]));
        });

        let albums = Album::list(&client_for(&server), "jane.doe").await.unwrap();
        page.assert_hits(1);
        assert!(albums.is_empty());
    }
}
