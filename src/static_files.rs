//! Serves files from a directory on disk.
//!
//! Request paths are mapped onto the asset root, the empty path serves the
//! entry document, and anything that would step outside the root is treated
//! as missing. Every response allows cross-origin use and lets a service
//! worker claim the whole site.

use std::path::{Component, Path, PathBuf};

use axum::{
    extract::State,
    http::{
        HeaderName, HeaderValue, StatusCode, Uri,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};

use crate::Error;

/// Lets a service worker served from any path control the whole origin.
pub const SERVICE_WORKER_ALLOWED: HeaderName = HeaderName::from_static("service-worker-allowed");

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const PLAIN_TEXT: &str = "text/plain";
const NO_CACHE: &str = "no-cache";
const CACHE_FOR_AN_HOUR: &str = "public, max-age=3600";

/// Where static assets are read from.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    /// The directory request paths are resolved against.
    pub root: PathBuf,
    /// The file served for the empty path, e.g. "index.html".
    pub entry_document: String,
}

impl StaticAssets {
    /// Serve files under `root`, with "index.html" as the entry document.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entry_document: "index.html".to_owned(),
        }
    }

    /// Map a URL path onto a file under the asset root.
    ///
    /// The path is percent-decoded first. Returns `None` if the path cannot be
    /// decoded or if it contains `..`, a root or a drive prefix after
    /// stripping the leading slash.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(request_path).ok()?;
        let relative = decoded.strip_prefix('/').unwrap_or(decoded.as_ref());

        if relative.is_empty() {
            return Some(self.root.join(&self.entry_document));
        }

        let mut resolved = self.root.clone();

        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    tracing::debug!("Rejected path outside asset root: {request_path}");
                    return None;
                }
            }
        }

        Some(resolved)
    }

    /// The `Cache-Control` value for a resolved file.
    ///
    /// Same as [cache_control_for], except that the entry document is never cached.
    pub fn cache_control(&self, path: &Path) -> &'static str {
        if path == self.root.join(&self.entry_document) {
            NO_CACHE
        } else {
            cache_control_for(path)
        }
    }
}

/// The MIME type for a file, chosen from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("webmanifest") => "application/manifest+json",
        Some("txt") => PLAIN_TEXT,
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("woff") => "application/font-woff",
        Some("woff2") => "application/font-woff2",
        Some("ttf") => "application/font-ttf",
        Some("otf") => "application/font-otf",
        Some("eot") => "application/vnd.ms-fontobject",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// HTML and JSON must always be revalidated, everything else may be cached for an hour.
pub fn cache_control_for(path: &Path) -> &'static str {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some(extension)
            if extension.eq_ignore_ascii_case("html") || extension.eq_ignore_ascii_case("json") =>
        {
            NO_CACHE
        }
        _ => CACHE_FOR_AN_HOUR,
    }
}

/// Route handler that responds with the file the request path resolves to.
///
/// Missing files, directories and paths outside the asset root are a 404 with
/// the body "Not found". Any other read failure is a 500 with the body
/// "Server error".
pub async fn serve_static_asset(State(assets): State<StaticAssets>, uri: Uri) -> Response {
    let Some(path) = assets.resolve(uri.path()) else {
        return error_response(Error::NotFound, NO_CACHE);
    };

    let cache_control = assets.cache_control(&path);

    match read_asset(&path).await {
        Ok(contents) => (
            StatusCode::OK,
            asset_headers(content_type_for(&path), cache_control),
            contents,
        )
            .into_response(),
        Err(error) => error_response(error, cache_control),
    }
}

async fn read_asset(path: &Path) -> Result<Vec<u8>, Error> {
    if tokio::fs::metadata(path).await?.is_dir() {
        return Err(Error::NotFound);
    }

    Ok(tokio::fs::read(path).await?)
}

fn error_response(error: Error, cache_control: &'static str) -> Response {
    let (status_code, body) = match error {
        Error::NotFound => (StatusCode::NOT_FOUND, "Not found"),
        error => {
            tracing::error!("Could not read static asset: {error}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    };

    (status_code, asset_headers(PLAIN_TEXT, cache_control), body).into_response()
}

fn asset_headers(
    content_type: &'static str,
    cache_control: &'static str,
) -> [(HeaderName, HeaderValue); 4] {
    [
        (CONTENT_TYPE, HeaderValue::from_static(content_type)),
        (CACHE_CONTROL, HeaderValue::from_static(cache_control)),
        (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        (SERVICE_WORKER_ALLOWED, HeaderValue::from_static("/")),
    ]
}
