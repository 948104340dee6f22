use reqwest::header::HeaderMap;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::GitHubClient;

/// One page of a list endpoint together with its `Link` navigation.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
    pub last_page: Option<u64>,
}

impl<T> Page<T> {
    pub fn from_headers(items: Vec<T>, headers: &HeaderMap) -> Self {
        let link = headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        Self {
            items,
            has_next: has_next_page(link),
            last_page: last_page(link),
        }
    }
}

pub fn has_next_page(link: &str) -> bool {
    link.contains("rel=\"next\"")
}

/// Extracts the `page` query value of the `rel="last"` entry, e.g.
/// `<https://api.github.com/x?per_page=1&page=34>; rel="last"` yields 34.
pub fn last_page(link: &str) -> Option<u64> {
    let entry = link
        .split(',')
        .map(str::trim)
        .find(|part| part.contains("rel=\"last\""))?;

    let start = entry.find('<')? + 1;
    let end = entry[start..].find('>')? + start;
    let url = Url::parse(&entry[start..end]).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

pub struct Paginator<'a> {
    github: &'a GitHubClient,
}

impl<'a> Paginator<'a> {
    pub fn new(github: &'a GitHubClient) -> Self {
        Self { github }
    }

    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        per_page: u32,
    ) -> Result<Vec<T>> {
        self.fetch_pages(path, query, per_page, None).await
    }

    pub async fn fetch_limited<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        per_page: u32,
        max_items: u32,
    ) -> Result<Vec<T>> {
        let mut items = self
            .fetch_pages(path, query, per_page, Some(max_items as usize))
            .await?;
        items.truncate(max_items as usize);
        Ok(items)
    }

    async fn fetch_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        per_page: u32,
        max_items: Option<usize>,
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1u32;

        loop {
            let mut params = query.to_vec();
            params.push(("per_page", per_page.to_string()));
            params.push(("page", page.to_string()));

            let result: Page<T> = self.github.get_page(path, &params).await?;
            let items_count = result.items.len();
            all_items.extend(result.items);

            let reached_limit = max_items.is_some_and(|max| all_items.len() >= max);
            if reached_limit || !result.has_next || items_count == 0 {
                break;
            }

            page += 1;
        }

        tracing::debug!("Fetched {} items from {} ({} pages)", all_items.len(), path, page);
        Ok(all_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_from_link() {
        let link = r#"<https://api.github.com/repositories/1/pulls?state=all&per_page=1&page=2>; rel="next", <https://api.github.com/repositories/1/pulls?state=all&per_page=1&page=34>; rel="last""#;
        assert_eq!(last_page(link), Some(34));
        assert!(has_next_page(link));
    }

    #[test]
    fn test_last_page_missing() {
        assert_eq!(last_page(""), None);
        assert_eq!(
            last_page(r#"<https://api.github.com/x?page=2>; rel="next""#),
            None
        );
        assert_eq!(last_page(r#"<not a url>; rel="last""#), None);
        assert_eq!(last_page(r#"<https://api.github.com/x?per_page=1>; rel="last""#), None);
    }

    #[test]
    fn test_no_next_on_last_page() {
        let link = r#"<https://api.github.com/x?page=1>; rel="prev", <https://api.github.com/x?page=1>; rel="first""#;
        assert!(!has_next_page(link));
    }
}
