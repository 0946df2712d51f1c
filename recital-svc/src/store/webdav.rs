//! WebDAV-backed blob store
//!
//! Talks to a WebDAV endpoint (Nextcloud in production) with basic auth:
//! `PROPFIND` depth-1 for directory listings, `PUT` for uploads. Listing
//! responses are RFC 4918 multistatus XML.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use recital_common::config::Settings;
use recital_common::{Error, Result};
use reqwest::{Method, StatusCode};

use super::{BlobStore, FileEntry};

const USER_AGENT: &str = concat!("recital-svc/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// WebDAV store handle. Cheap to clone; constructed once at startup and
/// injected through the application state.
#[derive(Debug, Clone)]
pub struct WebDavStore {
    http: reqwest::Client,
    /// Endpoint URL without trailing slash, e.g.
    /// `https://cloud.example.org/remote.php/webdav`
    base_url: String,
    username: String,
    password: String,
}

impl WebDavStore {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Upstream(format!("HTTP client construction failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.webdav_url.trim_end_matches('/').to_string(),
            username: settings.webdav_username.clone(),
            password: settings.webdav_password.clone(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Path component of the endpoint URL, used to relativize listing hrefs
    /// (Nextcloud returns `/remote.php/webdav/Recordings/...`).
    fn base_path(&self) -> &str {
        match self.base_url.find("://") {
            Some(scheme_end) => match self.base_url[scheme_end + 3..].find('/') {
                Some(host_end) => &self.base_url[scheme_end + 3 + host_end..],
                None => "",
            },
            None => &self.base_url,
        }
    }

    async fn propfind(&self, path: &str, depth: &str) -> Result<reqwest::Response> {
        let method = Method::from_bytes(b"PROPFIND").expect("valid method token");
        self.http
            .request(method, self.url_for(path))
            .basic_auth(&self.username, Some(&self.password))
            .header("Depth", depth)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("WebDAV request failed: {}", e)))
    }
}

#[async_trait]
impl BlobStore for WebDavStore {
    async fn list(&self, dir: &str) -> Result<Vec<FileEntry>> {
        let response = self.propfind(dir, "1").await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(Error::NotFound(format!("Remote directory {} not found", dir)))
            }
            status if !status.is_success() => {
                return Err(Error::Upstream(format!(
                    "WebDAV listing of {} failed with status {}",
                    dir, status
                )))
            }
            _ => {}
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Upstream(format!("WebDAV listing read failed: {}", e)))?;

        let dir_trimmed = dir.trim_end_matches('/');
        let base_path = self.base_path().to_string();

        let entries = parse_multistatus(&body)?
            .into_iter()
            .filter_map(|raw| {
                let decoded = percent_decode_str(&raw.href).decode_utf8().ok()?;
                let path = decoded
                    .strip_prefix(&base_path)
                    .unwrap_or(&decoded)
                    .trim_end_matches('/')
                    .to_string();
                // The listing includes the directory itself; skip it
                if path == dir_trimmed {
                    return None;
                }
                let base_name = path.rsplit('/').next().unwrap_or(&path).to_string();
                Some(FileEntry {
                    path,
                    base_name,
                    is_file: !raw.is_collection,
                    content_type: raw.content_type,
                    last_modified: raw.last_modified,
                    message: raw.message,
                })
            })
            .collect();

        Ok(entries)
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<()> {
        let response = self
            .http
            .put(self.url_for(path))
            .basic_auth(&self.username, Some(&self.password))
            .body(bytes)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("WebDAV upload failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "WebDAV upload of {} failed with status {}",
                path, status
            )));
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let response = self.propfind(path, "0").await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(Error::Upstream(format!(
                "WebDAV probe of {} failed with status {}",
                path, status
            ))),
        }
    }
}

/// One `<d:response>` of a multistatus body, before href decoding.
#[derive(Debug, Default)]
struct RawResponse {
    href: String,
    is_collection: bool,
    content_type: String,
    last_modified: DateTime<Utc>,
    message: String,
}

/// Property element the parser is currently inside.
enum Field {
    Href,
    ContentType,
    LastModified,
    Message,
}

/// Parse an RFC 4918 multistatus body. Namespace prefixes vary between
/// servers (`d:`, `D:`, none), so elements are matched by local name.
fn parse_multistatus(xml: &str) -> Result<Vec<RawResponse>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut responses = Vec::new();
    let mut current: Option<RawResponse> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"response" => current = Some(RawResponse::default()),
                b"href" => field = Some(Field::Href),
                b"getcontenttype" => field = Some(Field::ContentType),
                b"getlastmodified" => field = Some(Field::LastModified),
                b"message" => field = Some(Field::Message),
                b"collection" => {
                    if let Some(cur) = current.as_mut() {
                        cur.is_collection = true;
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"collection" {
                    if let Some(cur) = current.as_mut() {
                        cur.is_collection = true;
                    }
                }
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| Error::Upstream(format!("Malformed WebDAV listing: {}", e)))?;
                if let Some(cur) = current.as_mut() {
                    match field {
                        Some(Field::Href) => cur.href = text.into_owned(),
                        Some(Field::ContentType) => cur.content_type = text.into_owned(),
                        Some(Field::LastModified) => {
                            cur.last_modified = parse_http_date(&text);
                        }
                        Some(Field::Message) => cur.message = text.into_owned(),
                        None => {}
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"response" => {
                    if let Some(cur) = current.take() {
                        responses.push(cur);
                    }
                }
                b"href" | b"getcontenttype" | b"getlastmodified" | b"message" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Upstream(format!("Malformed WebDAV listing: {}", e)));
            }
            _ => {}
        }
    }

    Ok(responses)
}

/// Parse the RFC 1123 date WebDAV reports in `getlastmodified`. An
/// unparseable date degrades to the epoch rather than dropping the entry.
fn parse_http_date(text: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc2822(text) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            tracing::debug!(date = text, error = %e, "Unparseable last-modified, using epoch");
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTISTATUS: &str = r#"<?xml version="1.0"?>
        <d:multistatus xmlns:d="DAV:">
          <d:response>
            <d:href>/remote.php/webdav/Recordings/</d:href>
            <d:propstat>
              <d:prop>
                <d:resourcetype><d:collection/></d:resourcetype>
                <d:getlastmodified>Tue, 05 Mar 2024 10:00:00 GMT</d:getlastmodified>
              </d:prop>
              <d:status>HTTP/1.1 200 OK</d:status>
            </d:propstat>
          </d:response>
          <d:response>
            <d:href>/remote.php/webdav/Recordings/ClassA-Jane%20Doe-20240305.webm</d:href>
            <d:propstat>
              <d:prop>
                <d:resourcetype/>
                <d:getcontenttype>video/webm</d:getcontenttype>
                <d:getlastmodified>Tue, 05 Mar 2024 09:30:00 GMT</d:getlastmodified>
              </d:prop>
              <d:status>HTTP/1.1 200 OK</d:status>
            </d:propstat>
          </d:response>
        </d:multistatus>"#;

    #[test]
    fn multistatus_parses_collections_and_files() {
        let responses = parse_multistatus(MULTISTATUS).unwrap();
        assert_eq!(responses.len(), 2);

        assert!(responses[0].is_collection);
        assert_eq!(responses[0].href, "/remote.php/webdav/Recordings/");

        assert!(!responses[1].is_collection);
        assert_eq!(responses[1].content_type, "video/webm");
        assert_eq!(
            responses[1].last_modified,
            DateTime::parse_from_rfc2822("Tue, 05 Mar 2024 09:30:00 GMT").unwrap()
        );
    }

    #[test]
    fn malformed_xml_is_an_upstream_error() {
        let err = parse_multistatus("<multistatus><response></mismatch></multistatus>").unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[test]
    fn unparseable_dates_degrade_to_epoch() {
        assert_eq!(parse_http_date("not a date"), DateTime::<Utc>::UNIX_EPOCH);
    }
}
