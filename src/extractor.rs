/// Content extractor: reads the article out of the page it runs in
use log::{debug, warn};
use serde_json::Value;

use crate::config::SiteProfile;
use crate::error::RelayError;
use crate::messages::{ArticlePayload, RelayEnvelope, RelayRequest};

/// Read-only view of a page.
pub trait PageDocument {
    /// Text of the first element matching `selector`, if any
    fn first_text(&self, selector: &str) -> Result<Option<String>, RelayError>;

    /// Text of every element matching `selector`, in document order
    fn all_texts(&self, selector: &str) -> Result<Vec<String>, RelayError>;
}

impl PageDocument for web_sys::Document {
    fn first_text(&self, selector: &str) -> Result<Option<String>, RelayError> {
        let element = self
            .query_selector(selector)
            .map_err(|_| RelayError::InvalidSelector(selector.to_string()))?;
        Ok(element.map(|el| el.text_content().unwrap_or_default()))
    }

    fn all_texts(&self, selector: &str) -> Result<Vec<String>, RelayError> {
        let nodes = self
            .query_selector_all(selector)
            .map_err(|_| RelayError::InvalidSelector(selector.to_string()))?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .map(|node| node.text_content().unwrap_or_default())
            .collect())
    }
}

/// Correlation id for one extraction
pub fn article_id_at(now_millis: f64) -> String {
    format!("article_{}", now_millis.max(0.0) as u64)
}

/// Each paragraph trimmed and newline-terminated
pub fn join_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> String {
    paragraphs.iter().fold(String::new(), |mut content, p| {
        content.push_str(p.as_ref().trim());
        content.push('\n');
        content
    })
}

/// Build the article payload from the page.
///
/// A missing title becomes the site's placeholder and missing paragraphs
/// become empty content; only an unusable selector fails.
pub fn extract_article<D: PageDocument>(
    document: &D,
    site: &SiteProfile,
    now_millis: f64,
) -> Result<ArticlePayload, RelayError> {
    let title = match document.first_text(&site.title_selector)? {
        Some(text) => {
            debug!("Found title: {}", text.trim());
            text.trim().to_string()
        }
        None => {
            warn!("No title element ({}) on this page", site.title_selector);
            site.missing_title_placeholder.clone()
        }
    };

    let paragraphs = document.all_texts(&site.paragraph_selector)?;
    if paragraphs.is_empty() {
        warn!("No content elements ({}) on this page", site.paragraph_selector);
    } else {
        debug!("Found {} paragraphs", paragraphs.len());
    }

    Ok(ArticlePayload {
        title,
        content: join_paragraphs(&paragraphs),
        article_id: article_id_at(now_millis),
    })
}

/// Answer one message delivered to the content script
pub fn handle_message<D: PageDocument>(
    raw: Value,
    document: &D,
    site: &SiteProfile,
    now_millis: f64,
) -> RelayEnvelope {
    match RelayRequest::from_value(raw) {
        Ok(RelayRequest::GetArticleContent) => {
            debug!("Content script: extracting article");
            extract_article(document, site, now_millis).into()
        }
        Ok(other) => RelayError::UnsupportedRequest(format!(
            "the page cannot handle '{}'",
            other.action()
        ))
        .into(),
        Err(err) => err.into(),
    }
}

/// Parsed HTML pages, so the extraction rules run without a browser
#[cfg(test)]
mod parsed {
    use scraper::{Html, Selector};

    use super::PageDocument;
    use crate::error::RelayError;

    fn parse_selector(selector: &str) -> Result<Selector, RelayError> {
        Selector::parse(selector).map_err(|_| RelayError::InvalidSelector(selector.to_string()))
    }

    impl PageDocument for Html {
        fn first_text(&self, selector: &str) -> Result<Option<String>, RelayError> {
            let selector = parse_selector(selector)?;
            Ok(self
                .select(&selector)
                .next()
                .map(|el| el.text().collect::<String>()))
        }

        fn all_texts(&self, selector: &str) -> Result<Vec<String>, RelayError> {
            let selector = parse_selector(selector)?;
            Ok(self
                .select(&selector)
                .map(|el| el.text().collect::<String>())
                .collect())
        }
    }
}
