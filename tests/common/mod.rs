//! Shared test fixtures: in-memory stores, a call-counting media host and
//! request helpers for driving the real router.
//!
//! The stores implement the same traits as the PostgreSQL implementations
//! and count every trait-method call, so tests can assert that a rejected
//! request never reached the store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use chrono::{Duration, TimeZone, Utc};
use tower::ServiceExt;
use uuid::Uuid;

use vidshare::auth::sessions::create_token;
use vidshare::routes::router::create_router;
use vidshare::server::state::AppState;
use vidshare::tweets::model::Tweet;
use vidshare::tweets::store::TweetStore;
use vidshare::uploads::{MediaFile, MediaHost, UploadError, UploadedMedia};
use vidshare::users::{User, UserStore};
use vidshare::videos::model::{NewVideo, OwnerSummary, Video, VideoChanges, VideoWithOwner};
use vidshare::videos::query::{SortDirection, SortField, VideoListing, VideoPredicate};
use vidshare::videos::store::VideoStore;

// ---------------------------------------------------------------------------
// Users

pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, username: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            avatar: Some(format!("https://media.test/avatars/{username}.png")),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().insert(user.id, user.clone());
        user
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

// ---------------------------------------------------------------------------
// Tweets

pub struct MemoryTweetStore {
    tweets: Mutex<Vec<Tweet>>,
    calls: AtomicUsize,
}

impl MemoryTweetStore {
    pub fn new() -> Self {
        Self {
            tweets: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Trait-method invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Seed a tweet without touching the call counter.
    pub fn seed(&self, owner: Uuid, content: &str) -> Tweet {
        let tweet = Tweet {
            id: Uuid::new_v4(),
            content: content.to_string(),
            owner_id: owner,
            created_at: Utc::now(),
        };
        self.tweets.lock().unwrap().push(tweet.clone());
        tweet
    }

    pub fn get(&self, id: Uuid) -> Option<Tweet> {
        self.tweets.lock().unwrap().iter().find(|t| t.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tweets.lock().unwrap().len()
    }
}

#[async_trait]
impl TweetStore for MemoryTweetStore {
    async fn create(&self, owner: Uuid, content: String) -> Result<Tweet, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let tweet = Tweet {
            id: Uuid::new_v4(),
            content,
            owner_id: owner,
            created_at: Utc::now(),
        };
        self.tweets.lock().unwrap().push(tweet.clone());
        Ok(tweet)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Tweet>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tweets: Vec<Tweet> = self
            .tweets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.owner_id == owner)
            .cloned()
            .collect();
        tweets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tweets)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        content: String,
    ) -> Result<Option<Tweet>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tweets = self.tweets.lock().unwrap();
        match tweets.iter_mut().find(|t| t.id == id && t.owner_id == owner) {
            Some(tweet) => {
                tweet.content = content;
                Ok(Some(tweet.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tweets = self.tweets.lock().unwrap();
        let before = tweets.len();
        tweets.retain(|t| !(t.id == id && t.owner_id == owner));
        Ok(tweets.len() < before)
    }
}

// ---------------------------------------------------------------------------
// Videos

pub struct MemoryVideoStore {
    videos: Mutex<Vec<Video>>,
    users: Arc<MemoryUserStore>,
    calls: AtomicUsize,
}

impl MemoryVideoStore {
    pub fn new(users: Arc<MemoryUserStore>) -> Self {
        Self {
            videos: Mutex::new(Vec::new()),
            users,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Seed a video without touching the call counter. `sequence` spaces
    /// the creation timestamps one minute apart so ordering is stable.
    pub fn seed(
        &self,
        owner: Uuid,
        title: &str,
        description: &str,
        is_published: bool,
        sequence: i64,
    ) -> Video {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let video = Video {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            video_file: format!("https://media.test/{title}.mp4"),
            thumbnail: format!("https://media.test/{title}.png"),
            duration: 60.0 + sequence as f64,
            owner_id: owner,
            is_published,
            created_at: base + Duration::minutes(sequence),
        };
        self.videos.lock().unwrap().push(video.clone());
        video
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().iter().find(|v| v.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.videos.lock().unwrap().len()
    }

    fn owner_summary(&self, owner_id: Uuid) -> OwnerSummary {
        let users = self.users.users.lock().unwrap();
        match users.get(&owner_id) {
            Some(user) => OwnerSummary {
                id: user.id,
                username: user.username.clone(),
                avatar: user.avatar.clone(),
            },
            None => OwnerSummary {
                id: owner_id,
                username: "unknown".to_string(),
                avatar: None,
            },
        }
    }

    fn matches(video: &Video, predicates: &[VideoPredicate]) -> bool {
        predicates.iter().all(|p| match p {
            VideoPredicate::Published => video.is_published,
            VideoPredicate::OwnedBy(owner) => video.owner_id == *owner,
            VideoPredicate::TextMatch(term) => {
                let term = term.to_lowercase();
                video.title.to_lowercase().contains(&term)
                    || video.description.to_lowercase().contains(&term)
            }
        })
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn create(&self, new: NewVideo) -> Result<Video, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let video = Video {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            video_file: new.video_file,
            thumbnail: new.thumbnail,
            duration: new.duration,
            owner_id: new.owner_id,
            is_published: true,
            created_at: Utc::now(),
        };
        self.videos.lock().unwrap().push(video.clone());
        Ok(video)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.get(id))
    }

    async fn find_with_owner(&self, id: Uuid) -> Result<Option<VideoWithOwner>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .get(id)
            .map(|v| {
                let owner = self.owner_summary(v.owner_id);
                VideoWithOwner::new(v, owner)
            }))
    }

    async fn list(
        &self,
        listing: &VideoListing,
    ) -> Result<(Vec<VideoWithOwner>, u64), sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut matching: Vec<Video> = self
            .videos
            .lock()
            .unwrap()
            .iter()
            .filter(|v| Self::matches(v, &listing.predicates))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering = match listing.sort.field {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::Title => a.title.cmp(&b.title),
                SortField::Duration => a.duration.partial_cmp(&b.duration).unwrap(),
            };
            match listing.sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        let total = matching.len() as u64;
        let page: Vec<VideoWithOwner> = matching
            .into_iter()
            .skip(listing.page.skip() as usize)
            .take(listing.page.size as usize)
            .map(|v| {
                let owner = self.owner_summary(v.owner_id);
                VideoWithOwner::new(v, owner)
            })
            .collect();

        Ok((page, total))
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: VideoChanges,
    ) -> Result<Option<Video>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut videos = self.videos.lock().unwrap();
        match videos.iter_mut().find(|v| v.id == id && v.owner_id == owner) {
            Some(video) => {
                if let Some(title) = changes.title {
                    video.title = title;
                }
                if let Some(description) = changes.description {
                    video.description = description;
                }
                if let Some(thumbnail) = changes.thumbnail {
                    video.thumbnail = thumbnail;
                }
                Ok(Some(video.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut videos = self.videos.lock().unwrap();
        let before = videos.len();
        videos.retain(|v| !(v.id == id && v.owner_id == owner));
        Ok(videos.len() < before)
    }

    async fn toggle_publish_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> Result<Option<bool>, sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut videos = self.videos.lock().unwrap();
        match videos.iter_mut().find(|v| v.id == id && v.owner_id == owner) {
            Some(video) => {
                video.is_published = !video.is_published;
                Ok(Some(video.is_published))
            }
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Media host

pub struct CountingMediaHost {
    calls: AtomicUsize,
    fail_on: Mutex<Option<String>>,
}

impl CountingMediaHost {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: Mutex::new(None),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make uploads of files with this name fail.
    pub fn fail_on(&self, file_name: &str) {
        *self.fail_on.lock().unwrap() = Some(file_name.to_string());
    }
}

#[async_trait]
impl MediaHost for CountingMediaHost {
    async fn upload(&self, file: &MediaFile) -> Result<UploadedMedia, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.lock().unwrap().as_deref() == Some(file.name.as_str()) {
            return Err(UploadError::Rejected("scripted failure".to_string()));
        }
        Ok(UploadedMedia {
            url: format!("https://media.test/{}", file.name),
            duration: file.name.ends_with(".mp4").then_some(33.0),
        })
    }
}

// ---------------------------------------------------------------------------
// Backend fixture

/// A router over in-memory stores, with handles kept for assertions.
pub struct TestBackend {
    pub app: Router,
    pub users: Arc<MemoryUserStore>,
    pub tweets: Arc<MemoryTweetStore>,
    pub videos: Arc<MemoryVideoStore>,
    pub media: Arc<CountingMediaHost>,
}

impl TestBackend {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let tweets = Arc::new(MemoryTweetStore::new());
        let videos = Arc::new(MemoryVideoStore::new(users.clone()));
        let media = Arc::new(CountingMediaHost::new());

        let state = AppState {
            videos: videos.clone(),
            tweets: tweets.clone(),
            users: users.clone(),
            media: media.clone(),
        };

        Self {
            app: create_router(state),
            users,
            tweets,
            videos,
            media,
        }
    }
}

pub fn bearer(user: &User) -> String {
    format!("Bearer {}", create_token(user.id, &user.username).unwrap())
}

// ---------------------------------------------------------------------------
// Request helpers

/// Send a request and decode the body as JSON (Null for empty bodies).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn patch_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::PATCH).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn delete_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

/// One part of a multipart form body.
pub enum FormPart {
    Text(&'static str, &'static str),
    File {
        name: &'static str,
        file_name: &'static str,
        bytes: &'static [u8],
    },
}

const BOUNDARY: &str = "vidshare-test-boundary";

/// Build a multipart request the way a browser would encode the form.
pub fn multipart_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    parts: &[FormPart],
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                file_name,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder().method(method).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder.body(Body::from(Bytes::from(body))).unwrap()
}
