/**
 * Application State Management
 *
 * This module defines the application state structure and the `FromRef`
 * impls for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container: store handles and the media
 * host client, all injected at construction. There is no ambient singleton;
 * tests build an `AppState` over in-memory fakes, production wires the
 * PostgreSQL stores and the HTTP media host in `server::init`.
 *
 * # Thread Safety
 *
 * All fields are `Arc`-shared trait objects. The stores hold their own
 * connection pools; no cross-request mutable state lives here.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::tweets::store::TweetStore;
use crate::uploads::MediaHost;
use crate::users::UserStore;
use crate::videos::store::VideoStore;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub videos: Arc<dyn VideoStore>,
    pub tweets: Arc<dyn TweetStore>,
    pub users: Arc<dyn UserStore>,
    pub media: Arc<dyn MediaHost>,
}

impl FromRef<AppState> for Arc<dyn VideoStore> {
    fn from_ref(state: &AppState) -> Self {
        state.videos.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TweetStore> {
    fn from_ref(state: &AppState) -> Self {
        state.tweets.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Arc<dyn MediaHost> {
    fn from_ref(state: &AppState) -> Self {
        state.media.clone()
    }
}
