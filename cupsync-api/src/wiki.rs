//! The wiki client.
//!
//! A minimal MediaWiki API client covering exactly what the sync needs:
//! logging in, reading one section's wikitext and writing it back with a
//! change summary. Session cookies are captured from every response and
//! replayed on the next request.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Region;
use crate::http::{Client, Request, Response};
use crate::{Error, Result};

/// The wiki's API endpoint.
pub const API_URL: &str = "https://liquipedia.net/starcraft2/api.php";

/// Section index of the participant list on a cup page.
pub const PARTICIPANTS_SECTION: u32 = 3;
/// Section index of the results bracket on a cup page.
pub const RESULTS_SECTION: u32 = 4;

const USER_AGENT: &str = concat!("cupsync/", env!("CARGO_PKG_VERSION"));

/// Expands a page name template, substituting `${region}` and `${edition}`.
pub fn page_name(template: &str, region: Region, edition: u32) -> String {
    template
        .replace("${region}", region.code())
        .replace("${edition}", &edition.to_string())
}

#[derive(Debug)]
pub struct WikiClient {
    http: Client,
    api_url: String,
    cookies: BTreeMap<String, String>,
}

impl WikiClient {
    /// Creates a client against [`API_URL`].
    pub fn new() -> Self {
        Self::with_api_url(API_URL)
    }

    pub fn with_api_url<T>(api_url: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            cookies: BTreeMap::new(),
        }
    }

    /// Logs in with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] when the wiki rejects the
    /// credentials.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let token = self.token("login").await?;

        let resp: LoginResponse = self
            .post(&[
                ("action", "login"),
                ("format", "json"),
                ("lgname", username),
                ("lgpassword", password),
                ("lgtoken", &token),
            ])
            .await?;

        if resp.login.result != "Success" {
            return Err(Error::Unauthorized);
        }

        log::info!("logged in as {}", username);
        Ok(())
    }

    /// Returns the wikitext of one section of `page`.
    pub async fn section_text(&mut self, page: &str, section: u32) -> Result<String> {
        let resp: ParseResponse = self
            .get(&[
                ("action", "parse"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "wikitext"),
                ("page", page),
                ("section", &section.to_string()),
            ])
            .await?;

        Ok(resp.parse.wikitext)
    }

    /// Replaces one section of `page` with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EditRejected`] when the wiki refuses the edit.
    pub async fn edit_section(
        &mut self,
        page: &str,
        section: u32,
        text: &str,
        summary: &str,
    ) -> Result<()> {
        let token = self.token("csrf").await?;

        let resp: EditResponse = self
            .post(&[
                ("action", "edit"),
                ("format", "json"),
                ("title", page),
                ("section", &section.to_string()),
                ("text", text),
                ("summary", summary),
                ("token", &token),
            ])
            .await?;

        if resp.edit.result != "Success" {
            return Err(Error::EditRejected(resp.edit.result));
        }

        log::info!("edited {} section {}: {}", page, section, summary);
        Ok(())
    }

    async fn token(&mut self, kind: &str) -> Result<String> {
        let resp: TokenResponse = self
            .get(&[
                ("action", "query"),
                ("format", "json"),
                ("meta", "tokens"),
                ("type", kind),
            ])
            .await?;

        let mut tokens = resp.query.tokens;
        tokens
            .remove(&format!("{}token", kind))
            .ok_or_else(|| Error::MissingToken(kind.to_owned()))
    }

    async fn get<T>(&mut self, params: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let query = serde_urlencoded::to_string(params)?;
        let req = self
            .request()
            .get()
            .uri(&format!("{}?{}", self.api_url, query))
            .build();

        self.dispatch(req).await
    }

    async fn post<T>(&mut self, params: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let req = self
            .request()
            .post()
            .uri(&self.api_url)
            .form(&params)
            .build();

        self.dispatch(req).await
    }

    async fn dispatch<T>(&mut self, req: Request) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = self.http.send(req).await?;
        self.absorb_cookies(&resp);

        if !resp.is_success() {
            return Err(Error::BadStatusCode(resp.status()));
        }

        resp.json().await
    }

    fn request(&self) -> crate::http::RequestBuilder {
        let builder = Request::builder().header("User-Agent", USER_AGENT);

        if self.cookies.is_empty() {
            builder
        } else {
            let cookies: Vec<String> = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();

            builder.header("Cookie", cookies.join("; "))
        }
    }

    fn absorb_cookies(&mut self, resp: &Response) {
        for cookie in resp.cookies() {
            if let Some((name, value)) = cookie.split_once('=') {
                self.cookies.insert(name.to_owned(), value.to_owned());
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    query: TokenQuery,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    tokens: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    login: LoginResult,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: ParseResult,
}

#[derive(Debug, Deserialize)]
struct ParseResult {
    wikitext: String,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    edit: EditResult,
}

#[derive(Debug, Deserialize)]
struct EditResult {
    result: String,
}

#[cfg(test)]
mod tests {
    use super::page_name;
    use crate::config::Region;

    #[test]
    fn test_page_name() {
        assert_eq!(
            page_name("ESL_Open_Cup_${region}/${edition}", Region::Korea, 128),
            "ESL_Open_Cup_KR/128"
        );

        // A template without placeholders is used verbatim.
        assert_eq!(
            page_name("Some_Fixed_Page", Region::Europe, 128),
            "Some_Fixed_Page"
        );
    }
}
