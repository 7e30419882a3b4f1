//! Static file server for the build output (`--serve`).
//!
//! Built on `tiny_http`, single-threaded, blocking until Ctrl+C:
//!
//! - `/a/b` serves `static/a/b` if it is a file, else `static/a/b/index.html`
//! - anything else, including paths escaping the output directory, is 404
//!
//! No rebuilds happen while serving; rerun the build to pick up changes.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, anyhow, bail};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Ports tried after the configured one is taken
const MAX_PORT_RETRIES: u16 = 10;

const INDEX_FILE: &str = "index.html";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve `config.output_dir()` on the configured interface and port.
///
/// Binds with auto-retry on port conflicts and blocks until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid serve.interface `{}`", config.serve.interface))?;
    let root = config.output_dir();

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{} ({})", addr, root.display());

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &root) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Bind `base_port`, or the next free port among the following `max_retries - 1`.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    match last_error {
        Some(e) => Err(anyhow!(
            "Failed to bind after {} attempts (ports {}-{}): {}",
            max_retries,
            base_port,
            base_port.saturating_add(max_retries - 1),
            e
        )),
        None => bail!("No ports to try"),
    }
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request(request: Request, root: &Path) -> Result<()> {
    match resolve(root, request.url()) {
        Some(path) => serve_file(request, &path),
        None => serve_not_found(request),
    }
}

/// Map a request URL to a file under `root`.
///
/// The query string is dropped and `%xx` escapes decoded. Directories
/// resolve to their `index.html`. Any `..` component is rejected.
fn resolve(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = urlencoding::decode(path).ok()?;
    let relative = Path::new(decoded.trim_matches('/'));

    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }

    let local = root.join(relative);
    if local.is_file() {
        return Some(local);
    }
    let index = local.join(INDEX_FILE);
    index.is_file().then_some(index)
}

// ============================================================================
// Response Helpers
// ============================================================================

fn content_type(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("Invalid header value `{value}`"))
}

fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = Response::from_data(content).with_header(content_type(guess_content_type(path))?);
    request.respond(response)?;
    Ok(())
}

fn serve_not_found(request: Request) -> Result<()> {
    let body = "404 Not Found";
    let response = Response::new(
        StatusCode(404),
        vec![content_type("text/plain; charset=utf-8")?],
        Cursor::new(body),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// MIME type by extension; `application/octet-stream` when unknown.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/rss+xml; charset=utf-8",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",

        _ => "application/octet-stream",
    }
}
