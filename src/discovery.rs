use std::collections::{HashSet, VecDeque};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use indexmap::IndexSet;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::fetch::PageSource;

static RECIPE_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+-").unwrap());
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Outcome of one crawl.
#[derive(Debug, Default)]
pub struct Discovered {
    pub recipes: Vec<String>,
    pub pages_crawled: usize,
    pub errors: usize,
}

/// Crawl state for a single run: visited set, work queue, recipes found so far.
pub struct Crawl {
    base: Url,
    blocked: Vec<String>,
    limit: Option<usize>,
    visited: HashSet<String>,
    queue: VecDeque<String>,
    queued: HashSet<String>,
    recipes: IndexSet<String>,
}

impl Crawl {
    pub fn new(base_url: &str, blocked: &[String], limit: Option<usize>) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        Ok(Self {
            base,
            blocked: blocked.to_vec(),
            limit,
            visited: HashSet::new(),
            queue: VecDeque::new(),
            queued: HashSet::new(),
            recipes: IndexSet::new(),
        })
    }

    /// Breadth-first crawl from `start_paths`, following links inside each path's top section.
    pub async fn run<S: PageSource>(mut self, source: &S, start_paths: &[String]) -> Discovered {
        for path in start_paths {
            match self.base.join(path) {
                Ok(url) => self.enqueue(url.to_string()),
                Err(e) => warn!("Skipping start path {}: {}", path, e),
            }
        }

        let mut pages_crawled = 0usize;
        let mut errors = 0usize;

        while !self.limit_reached() {
            let Some(url) = self.queue.pop_front() else {
                break;
            };
            if !self.visited.insert(url.clone()) {
                continue;
            }

            let root_scope = root_scope(&url);
            let html = match source.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Error fetching {}: {}", url, e);
                    errors += 1;
                    continue;
                }
            };
            pages_crawled += 1;

            for href in extract_hrefs(&html) {
                let Some(link) = self.resolve(&href) else {
                    continue;
                };

                if is_recipe_url(&link) {
                    if self.recipes.insert(link.clone()) {
                        debug!(url = %link, "recipe");
                    }
                    if self.limit_reached() {
                        break;
                    }
                } else if self.is_category_url(&link, &root_scope) {
                    self.enqueue(link);
                }
            }
        }

        info!(
            "Discovery complete. Found {} recipes on {} pages ({} errors).",
            self.recipes.len(),
            pages_crawled,
            errors
        );

        Discovered {
            recipes: self.recipes.into_iter().collect(),
            pages_crawled,
            errors,
        }
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|n| self.recipes.len() >= n)
    }

    fn enqueue(&mut self, url: String) {
        if self.visited.contains(&url) || !self.queued.insert(url.clone()) {
            return;
        }
        self.queue.push_back(url);
    }

    fn resolve(&self, href: &str) -> Option<String> {
        let mut url = self.base.join(href.trim()).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        url.set_fragment(None);
        Some(url.to_string())
    }

    /// Same host, under the branch's root section, and not a blocked utility path.
    fn is_category_url(&self, link: &str, root_scope: &str) -> bool {
        let Ok(url) = Url::parse(link) else {
            return false;
        };
        if url.host_str() != self.base.host_str() {
            return false;
        }
        let path = url.path();
        path.starts_with(root_scope) && !self.blocked.iter().any(|b| path.contains(b.as_str()))
    }
}

/// A recipe URL has at least three path segments, the third being `<id>-<slug>`.
pub fn is_recipe_url(href: &str) -> bool {
    let path = match Url::parse(href) {
        Ok(url) => url.path().to_string(),
        Err(_) => href.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    parts.len() >= 3 && RECIPE_SEGMENT_RE.is_match(parts[2])
}

/// `/` plus the first path segment, e.g. `/indonesian`.
fn root_scope(url: &str) -> String {
    let path = Url::parse(url).map(|u| u.path().to_string()).unwrap_or_default();
    let first = path.trim_matches('/').split('/').next().unwrap_or_default();
    format!("/{}", first)
}

fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

// ── Tests ──
