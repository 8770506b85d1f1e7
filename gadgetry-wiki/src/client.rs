//! MediaWiki Action API client.
//!
//! One [`WikiClient`] is a session against a single `api.php` endpoint. The
//! connection is verified up front with a `siteinfo` query so that an
//! unreachable wiki fails before any pass starts. Credentials are optional:
//! reads work anonymously, and anonymous edits are left to the wiki to
//! accept or reject.

use std::collections::HashMap;
use std::env;
use std::thread;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::WikiError;

/// Environment variable holding the bot username.
pub const USERNAME_VAR: &str = "GADGETRY_USERNAME";
/// Environment variable holding the bot password.
pub const PASSWORD_VAR: &str = "GADGETRY_PASSWORD";

// ---------------------------------------------------------------------------
// Page store trait
// ---------------------------------------------------------------------------

/// Read/write access to wiki pages, keyed by title.
///
/// The sync passes depend on this seam; [`WikiClient`] is the production
/// implementation.
pub trait PageStore {
    /// Full text of `title`, or `None` when the page does not exist.
    fn read_page(&mut self, title: &str) -> Result<Option<String>, WikiError>;

    /// Whether `title` exists.
    fn exists(&mut self, title: &str) -> Result<bool, WikiError> {
        Ok(self.read_page(title)?.is_some())
    }

    /// Overwrite `title` with `text`, recording `summary` as the edit summary.
    fn save_page(&mut self, title: &str, text: &str, summary: &str) -> Result<(), WikiError>;
}

// ---------------------------------------------------------------------------
// Response payloads (formatversion=2)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    info: String,
}

#[derive(Debug, Deserialize)]
struct SiteInfoResponse {
    error: Option<ApiErrorBody>,
    query: Option<SiteInfoQuery>,
}

#[derive(Debug, Deserialize)]
struct SiteInfoQuery {
    general: SiteInfoGeneral,
}

#[derive(Debug, Deserialize)]
struct SiteInfoGeneral {
    sitename: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    error: Option<ApiErrorBody>,
    query: Option<TokenQuery>,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    tokens: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RevisionsResponse {
    error: Option<ApiErrorBody>,
    query: Option<RevisionsQuery>,
}

#[derive(Debug, Deserialize)]
struct RevisionsQuery {
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    revisions: Vec<Revision>,
}

#[derive(Debug, Deserialize)]
struct Revision {
    slots: Slots,
}

#[derive(Debug, Deserialize)]
struct Slots {
    main: SlotContent,
}

#[derive(Debug, Deserialize)]
struct SlotContent {
    content: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    error: Option<ApiErrorBody>,
    login: Option<LoginResult>,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    result: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    error: Option<ApiErrorBody>,
    edit: Option<EditResult>,
}

#[derive(Debug, Deserialize)]
struct EditResult {
    result: String,
}

fn check_api_error(error: Option<ApiErrorBody>) -> Result<(), WikiError> {
    match error {
        Some(e) => Err(WikiError::Api { code: e.code, info: e.info }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Session against one Action API endpoint.
pub struct WikiClient {
    agent: ureq::Agent,
    api_url: String,
    save_delay: Duration,
    last_save: Option<Instant>,
    csrf_token: Option<String>,
    username: Option<String>,
}

impl WikiClient {
    /// Open a session and verify the endpoint answers a `siteinfo` query.
    ///
    /// `save_delay` is the minimum pause between consecutive saves; reads
    /// are never throttled.
    pub fn connect(api_url: &str, save_delay: Duration) -> Result<Self, WikiError> {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("gadgetry/", env!("CARGO_PKG_VERSION")))
            .build();
        let client = Self {
            agent,
            api_url: api_url.to_owned(),
            save_delay,
            last_save: None,
            csrf_token: None,
            username: None,
        };

        let site: SiteInfoResponse =
            client.get(&[("action", "query"), ("meta", "siteinfo"), ("siprop", "general")])?;
        check_api_error(site.error)?;
        let general = site
            .query
            .ok_or(WikiError::Malformed { what: "siteinfo query" })?
            .general;
        tracing::info!("connected to {} ({api_url})", general.sitename);
        Ok(client)
    }

    /// Log in with `GADGETRY_USERNAME` / `GADGETRY_PASSWORD` when both are
    /// set; otherwise stay anonymous. Returns whether a login happened.
    pub fn login_from_env(&mut self) -> Result<bool, WikiError> {
        match (env::var(USERNAME_VAR), env::var(PASSWORD_VAR)) {
            (Ok(username), Ok(password)) => {
                self.login(&username, &password)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Authenticate with a bot password.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), WikiError> {
        let token = self.fetch_token("login")?;
        let response: LoginResponse = self.post(&[
            ("action", "login"),
            ("lgname", username),
            ("lgpassword", password),
            ("lgtoken", &token),
        ])?;
        check_api_error(response.error)?;
        let login = response
            .login
            .ok_or(WikiError::Malformed { what: "login result" })?;
        if login.result != "Success" {
            return Err(WikiError::LoginFailed {
                username: username.to_owned(),
                reason: login.reason.unwrap_or(login.result),
            });
        }

        // Edit tokens are per-session; drop any pre-login one.
        self.csrf_token = None;
        self.username = Some(username.to_owned());
        tracing::info!("logged in as {username}");
        Ok(())
    }

    /// The logged-in username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn fetch_token(&self, kind: &str) -> Result<String, WikiError> {
        let response: TokenResponse =
            self.get(&[("action", "query"), ("meta", "tokens"), ("type", kind)])?;
        check_api_error(response.error)?;
        response
            .query
            .and_then(|q| q.tokens.get(&format!("{kind}token")).cloned())
            .ok_or(WikiError::Malformed { what: "token" })
    }

    fn csrf_token(&mut self) -> Result<String, WikiError> {
        if let Some(token) = &self.csrf_token {
            return Ok(token.clone());
        }
        let token = self.fetch_token("csrf")?;
        self.csrf_token = Some(token.clone());
        Ok(token)
    }

    fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, WikiError> {
        let mut request = self
            .agent
            .get(&self.api_url)
            .query("format", "json")
            .query("formatversion", "2");
        for (key, value) in params {
            request = request.query(key, value);
        }
        Ok(request.call()?.into_json()?)
    }

    fn post<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, WikiError> {
        let mut form: Vec<(&str, &str)> = vec![("format", "json"), ("formatversion", "2")];
        form.extend_from_slice(params);
        Ok(self.agent.post(&self.api_url).send_form(&form)?.into_json()?)
    }

    fn throttle(&mut self) {
        if let Some(last) = self.last_save {
            let elapsed = last.elapsed();
            if elapsed < self.save_delay {
                thread::sleep(self.save_delay - elapsed);
            }
        }
        self.last_save = Some(Instant::now());
    }
}

impl PageStore for WikiClient {
    fn read_page(&mut self, title: &str) -> Result<Option<String>, WikiError> {
        let response: RevisionsResponse = self.get(&[
            ("action", "query"),
            ("prop", "revisions"),
            ("rvprop", "content"),
            ("rvslots", "main"),
            ("titles", title),
        ])?;
        check_api_error(response.error)?;
        let pages = response
            .query
            .ok_or(WikiError::Malformed { what: "revisions query" })?
            .pages;
        let page = pages
            .into_iter()
            .next()
            .ok_or(WikiError::Malformed { what: "page entry" })?;
        if page.missing {
            tracing::debug!("{title} does not exist");
            return Ok(None);
        }
        let revision = page
            .revisions
            .into_iter()
            .next()
            .ok_or(WikiError::Malformed { what: "revision content" })?;
        Ok(Some(revision.slots.main.content))
    }

    fn save_page(&mut self, title: &str, text: &str, summary: &str) -> Result<(), WikiError> {
        let token = self.csrf_token()?;
        self.throttle();
        let response: EditResponse = self.post(&[
            ("action", "edit"),
            ("title", title),
            ("text", text),
            ("summary", summary),
            ("bot", "1"),
            ("token", &token),
        ])?;
        check_api_error(response.error)?;
        let edit = response
            .edit
            .ok_or(WikiError::Malformed { what: "edit result" })?;
        if edit.result != "Success" {
            return Err(WikiError::EditRejected {
                title: title.to_owned(),
                result: edit.result,
            });
        }
        tracing::debug!("saved {title}");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests — canned payload parsing; no network involved
// ---------------------------------------------------------------------------
