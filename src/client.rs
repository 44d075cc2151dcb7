//! Blocking HTTP client for the class search site.
//!
//! The landing page body is streamed straight into the option extractor. The
//! search and detail pages are small and go through `dom_query`, so they are
//! read whole and transcoded first.

use reqwest::blocking::{Client, Response};
use tracing::{debug, info};
use url::Url;

use crate::classes::{self, ClassBriefInfo, ClassDetails, SearchOptions};
use crate::encoding::transcode_to_utf8;
use crate::error::{Error, Result};
use crate::option_extractor::extract_options;
use crate::options::{ClientOptions, Options};
use crate::result::ExtractionResult;

/// Client for the landing page, the search endpoint and class detail pages.
///
/// ```rust,no_run
/// use rs_ucscclasses::{CatalogClient, ClientOptions, SearchOptions};
///
/// let client = CatalogClient::new(ClientOptions::default())?;
/// let data = client.fixed_data()?;
/// let term = data.selected_term().map(|t| t.value.clone()).unwrap_or_default();
/// for class in client.search(&SearchOptions::for_term(term))? {
///     println!("{} {}", class.full_number, class.name);
/// }
/// # Ok::<(), rs_ucscclasses::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    extract: Options,
}

impl CatalogClient {
    /// Build a client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the base URL does not parse and
    /// [`Error::Http`] if the TLS backend cannot be initialized.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = Url::parse(&options.base_url)?;
        let http = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url,
            extract: options.extract,
        })
    }

    /// Endpoint every request is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the term, subject and GE option lists from the landing page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] or [`Error::HttpStatus`] if the fetch fails and
    /// [`Error::StreamRead`] if the body cannot be read.
    pub fn fixed_data(&self) -> Result<ExtractionResult> {
        info!(url = %self.base_url, "fetching landing page");
        let mut response = check_status(self.http.get(self.base_url.clone()).send()?)?;
        extract_options(&mut response, &self.extract)
    }

    /// Run a class search.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] or [`Error::HttpStatus`] if the request fails.
    pub fn search(&self, search: &SearchOptions) -> Result<Vec<ClassBriefInfo>> {
        info!(term = %search.term, subject = %search.subject, number = %search.number, "searching classes");
        let response = self
            .http
            .post(self.base_url.clone())
            .form(&search.form_fields())
            .send()?;
        let body = check_status(response)?.bytes()?;

        let results = classes::parse_search_results(&transcode_to_utf8(&body));
        debug!(results = results.len(), "search complete");
        Ok(results)
    }

    /// Fetch and parse a class detail page.
    ///
    /// `details_url` may be absolute or relative to the base URL, as found
    /// in [`ClassBriefInfo::details_url`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the link cannot be resolved, a
    /// transport or status error if the fetch fails, or any error from
    /// [`parse_class_details`](crate::parse_class_details).
    pub fn class_details(&self, details_url: &str) -> Result<ClassDetails> {
        let url = self.resolve(details_url)?;
        info!(url = %url, "fetching class details");
        let body = check_status(self.http.get(url).send()?)?.bytes()?;
        classes::parse_class_details(&transcode_to_utf8(&body))
    }

    fn resolve(&self, link: &str) -> Result<Url> {
        Ok(self.base_url.join(link)?)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::HttpStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}
