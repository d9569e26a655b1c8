use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::sections::collapse_whitespace;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img[src]").unwrap());
static CONTAINER_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["div.item-page", "div.com-content-article", r#"div[itemprop="articleBody"]"#]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});
// Rating widgets, breadcrumbs, article info and page navigation inside the article.
static NOISE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        ".content_rating, .form-inline, .page-header, .article-info, .pagenavigation, .item-image, script, style",
    )
    .unwrap()
});

pub struct Page {
    document: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Text of the first `h1`, whitespace collapsed. Empty when missing.
    pub fn title(&self) -> String {
        self.document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|h1| collapse_whitespace(&h1.text().collect::<String>()))
            .unwrap_or_default()
    }

    /// Main article container.
    pub fn content(&self) -> Option<ElementRef<'_>> {
        CONTAINER_SELECTORS
            .iter()
            .find_map(|sel| self.document.select(sel).next())
    }

    /// First image in the article, resolved against `page_url` when relative.
    pub fn image(&self, page_url: &str) -> Option<String> {
        let src = self
            .content()?
            .select(&IMAGE_SELECTOR)
            .filter_map(|img| img.value().attr("src"))
            .map(str::trim)
            .find(|src| !src.is_empty())?;

        let resolved = Url::parse(page_url)
            .and_then(|base| base.join(src))
            .map(|u| u.to_string());
        Some(resolved.unwrap_or_else(|_| src.to_string()))
    }

    /// Non-empty text lines of the article, noise elements skipped.
    pub fn content_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(root) = self.content() {
            collect_lines(root, &mut lines);
        }
        lines
    }
}

fn collect_lines(element: ElementRef<'_>, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string),
            );
        } else if let Some(el) = ElementRef::wrap(child) {
            if !NOISE_SELECTOR.matches(&el) {
                collect_lines(el, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h1>  Rendang
             Padang </h1>
          <div class="item-page">
            <div class="page-header"><h2>Breadcrumb</h2></div>
            <div class="content_rating">4.5 sterren</div>
            <p><img src="/images/rendang.jpg"></p>
            <p>Een <strong>klassieker</strong>.<br>Tweede regel</p>
            <script>var x = 1;</script>
          </div>
        </body></html>"#;

    #[test]
    fn title_and_image() {
        let page = Page::parse(PAGE);
        assert_eq!(page.title(), "Rendang Padang");
        assert_eq!(
            page.image("https://www.kokkieblanda.nl/indonesian/x/1-rendang").as_deref(),
            Some("https://www.kokkieblanda.nl/images/rendang.jpg")
        );
    }

    #[test]
    fn lines_skip_noise() {
        let page = Page::parse(PAGE);
        assert_eq!(
            page.content_lines(),
            vec!["Een", "klassieker", ".", "Tweede regel"]
        );
    }

    #[test]
    fn missing_container() {
        let page = Page::parse("<html><body><h1>Alleen titel</h1><img src='a.jpg'></body></html>");
        assert!(page.content().is_none());
        assert!(page.content_lines().is_empty());
        assert_eq!(page.image("https://x.test/a/b/1-c"), None);
        assert_eq!(page.title(), "Alleen titel");
    }

    #[test]
    fn fallback_container() {
        let page = Page::parse(r#"<div itemprop="articleBody"><p>Tekst</p></div>"#);
        assert_eq!(page.content_lines(), vec!["Tekst"]);
    }
}
