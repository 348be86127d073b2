use crate::model::IndexEntry;

pub const NO_RESULTS: &str = "No results";

/// Presentation of a result list. Every call replaces what was rendered before.
pub trait Render {
    fn render(&mut self, results: &[&IndexEntry]);
}

/// Markup for the `#results` container of the search page.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    markup: String,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

impl Render for HtmlRenderer {
    fn render(&mut self, results: &[&IndexEntry]) {
        self.markup.clear();
        if results.is_empty() {
            self.markup.push_str(&format!("<p>{}</p>", NO_RESULTS));
            return;
        }
        for a in results {
            let author = a
                .author
                .as_deref()
                .map(|name| format!(" • <span class=\"author\">By {}</span>", escape(name)))
                .unwrap_or_default();
            let tags = a
                .tags
                .iter()
                .map(|t| format!("<span class=\"tag\">{}</span>", escape(t)))
                .collect::<Vec<_>>()
                .join(" ");

            self.markup.push_str(&format!(
                "<article class=\"article-item\">\n  \
                 <h3><a href=\"categories/{}/{}.html\">{}</a></h3>\n  \
                 <p class=\"meta\"><span class=\"date\">{}</span>{}</p>\n  \
                 <p class=\"excerpt\">{}</p>\n  \
                 <p class=\"tags\">{}</p>\n\
                 </article>\n",
                escape(&a.category),
                escape(&a.slug),
                escape(&a.title),
                escape(a.date.as_deref().unwrap_or("")),
                author,
                escape(&a.excerpt),
                tags,
            ));
        }
    }
}

/// One line per result, for terminals.
#[derive(Debug, Default)]
pub struct TextRenderer {
    output: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }
}

impl Render for TextRenderer {
    fn render(&mut self, results: &[&IndexEntry]) {
        self.output.clear();
        if results.is_empty() {
            self.output.push_str(NO_RESULTS);
            self.output.push('\n');
            return;
        }
        for a in results {
            let by = a
                .author
                .as_deref()
                .map(|name| format!(" by {}", name))
                .unwrap_or_default();
            self.output.push_str(&format!(
                "{:<10} | {} [{}/{}]{}\n",
                a.date.as_deref().unwrap_or("-"),
                a.title,
                a.category,
                a.slug,
                by
            ));
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> IndexEntry {
        IndexEntry {
            title: "Q&A <live>".into(),
            slug: "qa-live".into(),
            category: "events".into(),
            date: Some("2024-01-01".into()),
            excerpt: "Ask us".into(),
            tags: vec!["ama".into(), "law".into()],
            author: Some("Ana".into()),
        }
    }

    #[test]
    fn html_escapes_and_links() {
        let e = entry();
        let mut r = HtmlRenderer::new();
        r.render(&[&e]);
        let html = r.markup();
        assert!(html.contains(r#"<a href="categories/events/qa-live.html">Q&amp;A &lt;live&gt;</a>"#));
        assert!(html.contains(r#"<span class="author">By Ana</span>"#));
        assert!(html.contains(r#"<span class="tag">ama</span> <span class="tag">law</span>"#));
    }

    #[test]
    fn render_replaces_previous_output() {
        let e = entry();
        let mut r = HtmlRenderer::new();
        r.render(&[&e]);
        r.render(&[]);
        assert_eq!(r.markup(), "<p>No results</p>");

        let mut t = TextRenderer::new();
        t.render(&[&e, &e]);
        assert_eq!(t.output().lines().count(), 2);
        t.render(&[]);
        assert_eq!(t.output(), "No results\n");
    }
}
