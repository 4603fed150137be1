//! Lets the app be installed and opened without a network connection.
//!
//! [OfflineManifest] lists what the service worker caches. The service worker
//! script and the web app manifest are both generated from Rust so the cache
//! lists stay in one place.

use axum::{
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    Error, endpoints,
    html::{FONT_AWESOME_URL, GOOGLE_FONTS_URL},
    static_files::SERVICE_WORKER_ALLOWED,
};

/// The caches and assets the service worker manages.
#[derive(Debug, Clone, PartialEq)]
pub struct OfflineManifest {
    /// The cache for precached same-origin assets. Bump the version to invalidate it.
    pub cache_name: String,
    /// The cache for responses stored while the app is used.
    pub runtime_cache: String,
    /// Same-origin paths cached when the service worker is installed.
    pub assets: Vec<String>,
    /// Cross-origin URLs cached on install if they can be fetched.
    pub external_assets: Vec<String>,
}

impl Default for OfflineManifest {
    fn default() -> Self {
        Self {
            cache_name: "pastel-finance-v1".to_owned(),
            runtime_cache: "pastel-finance-runtime".to_owned(),
            assets: [
                "/style.css",
                "/app.js",
                "/icon.svg",
                endpoints::WEB_MANIFEST,
            ]
            .map(str::to_owned)
            .to_vec(),
            external_assets: [FONT_AWESOME_URL, GOOGLE_FONTS_URL]
                .map(str::to_owned)
                .to_vec(),
        }
    }
}

impl OfflineManifest {
    /// Generate the service worker script.
    ///
    /// # Errors
    /// Returns [Error::JSONSerializationError] if a cache list cannot be written as JSON.
    pub fn service_worker_script(&self) -> Result<String, Error> {
        Ok(SERVICE_WORKER_TEMPLATE
            .replace("__CACHE_NAME__", &to_json(&self.cache_name)?)
            .replace("__RUNTIME_CACHE__", &to_json(&self.runtime_cache)?)
            .replace("__ASSETS__", &to_json(&self.assets)?)
            .replace("__EXTERNAL_ASSETS__", &to_json(&self.external_assets)?)
            .replace("__OFFLINE_FALLBACK__", &to_json(endpoints::ROOT)?))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|error| Error::JSONSerializationError(error.to_string()))
}

const SERVICE_WORKER_TEMPLATE: &str = r#"const CACHE_NAME = __CACHE_NAME__;
const RUNTIME_CACHE = __RUNTIME_CACHE__;
const ASSETS = __ASSETS__;
const EXTERNAL_ASSETS = __EXTERNAL_ASSETS__;
const OFFLINE_FALLBACK = __OFFLINE_FALLBACK__;

self.addEventListener('install', (event) => {
    event.waitUntil(
        Promise.all([
            caches.open(CACHE_NAME).then((cache) => cache.addAll(ASSETS)),
            caches.open(RUNTIME_CACHE).then((cache) =>
                cache.addAll(EXTERNAL_ASSETS).catch(() => {
                    console.log('External assets will be cached on first use');
                })
            ),
        ])
    );
    self.skipWaiting();
});

self.addEventListener('activate', (event) => {
    event.waitUntil(
        caches.keys().then((cacheNames) =>
            Promise.all(
                cacheNames
                    .filter((cacheName) => cacheName !== CACHE_NAME && cacheName !== RUNTIME_CACHE)
                    .map((cacheName) => caches.delete(cacheName))
            )
        )
    );
    self.clients.claim();
});

function cacheResponse(request, response) {
    if (response && response.status === 200 && response.type !== 'error') {
        const responseToCache = response.clone();
        caches.open(RUNTIME_CACHE).then((cache) => cache.put(request, responseToCache));
    }
    return response;
}

function networkFirst(request, fallback) {
    return fetch(request)
        .then((response) => cacheResponse(request, response))
        .catch(() =>
            caches.match(request).then((cached) => cached || (fallback && caches.match(fallback)))
        );
}

self.addEventListener('fetch', (event) => {
    const { request } = event;
    const url = new URL(request.url);

    if (request.method !== 'GET') {
        return;
    }

    if (url.origin !== location.origin) {
        event.respondWith(networkFirst(request, null));
        return;
    }

    if (request.mode === 'navigate' || request.headers.get('HX-Request')) {
        event.respondWith(networkFirst(request, OFFLINE_FALLBACK));
        return;
    }

    event.respondWith(
        caches.match(request).then((cached) => {
            if (cached) {
                return cached;
            }

            return fetch(request)
                .then((response) => cacheResponse(request, response))
                .catch(() => caches.match(OFFLINE_FALLBACK));
        })
    );
});
"#;

/// The web app manifest that lets the app be installed to a home screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebManifest {
    /// The full name of the app.
    pub name: &'static str,
    /// The name shown under the home screen icon.
    pub short_name: &'static str,
    /// What the app is for.
    pub description: &'static str,
    /// The page opened when the app is launched.
    pub start_url: &'static str,
    /// How the app is displayed, e.g. "standalone".
    pub display: &'static str,
    /// The colour of the splash screen.
    pub background_color: &'static str,
    /// The colour of the browser UI.
    pub theme_color: &'static str,
    /// The app icons.
    pub icons: Vec<ManifestIcon>,
}

/// An icon in the [WebManifest].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestIcon {
    /// Where the icon is served from.
    pub src: &'static str,
    /// The sizes the icon can be displayed at.
    pub sizes: &'static str,
    /// The MIME type of the icon.
    #[serde(rename = "type")]
    pub mime_type: &'static str,
}

impl Default for WebManifest {
    fn default() -> Self {
        Self {
            name: "Pastel Finance",
            short_name: "Pastel",
            description: "Track your income and expenses",
            start_url: endpoints::ROOT,
            display: "standalone",
            background_color: "#FFF5FA",
            theme_color: "#FFD6EC",
            icons: vec![ManifestIcon {
                src: "/icon.svg",
                sizes: "any",
                mime_type: "image/svg+xml",
            }],
        }
    }
}

/// Route handler for the service worker script.
pub async fn get_service_worker() -> Response {
    match OfflineManifest::default().service_worker_script() {
        Ok(script) => (
            [
                (CONTENT_TYPE, "application/javascript"),
                (CACHE_CONTROL, "no-cache"),
                (SERVICE_WORKER_ALLOWED, "/"),
            ],
            script,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not generate service worker: {error}");
            error.into_response()
        }
    }
}

/// Route handler for the web app manifest.
pub async fn get_web_manifest() -> Response {
    match serde_json::to_string_pretty(&WebManifest::default()) {
        Ok(manifest) => (
            [
                (CONTENT_TYPE, "application/json"),
                (CACHE_CONTROL, "no-cache"),
            ],
            manifest,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not serialize web manifest: {error}");
            Error::JSONSerializationError(error.to_string()).into_response()
        }
    }
}
