/// Matching browser tabs against the supported news site
use url::Url;

use crate::config::SiteProfile;
use crate::tab_data::TabInfo;

/// Whether `url` points into the supported site.
///
/// Plain prefix match on the raw address, so `https://vneconomy.vn/` matches
/// article pages but not `http://` or look-alike hosts such as
/// `https://vneconomy.vn.example.com/`.
pub fn is_supported_url(url: &str, site: &SiteProfile) -> bool {
    !site.url_prefix.is_empty() && url.trim_start().starts_with(&site.url_prefix)
}

/// Whether the active tab is an analyzable article page
pub fn is_supported_tab(tab: &TabInfo, site: &SiteProfile) -> bool {
    tab.url
        .as_deref()
        .map_or(false, |url| is_supported_url(url, site))
}

/// Short description of where a tab is, for diagnostics
pub fn describe_location(tab: Option<&TabInfo>) -> String {
    let Some(url) = tab.and_then(|t| t.url.as_deref()) else {
        return "this tab".to_string();
    };

    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_lowercase(),
            None => parsed.scheme().to_string(),
        },
        Err(_) => url.to_string(),
    }
}
