//! Text helpers shared by the detail-page extractors
//!
//! TopCV markup nests text in many small inline nodes. These helpers flatten
//! an element to text the same way for every layout: each text node trimmed,
//! empty ones dropped, the rest joined.

use scraper::{ElementRef, Selector};

use crate::models::Fields;
use crate::parser::selectors::COMMON;

/// Trimmed text nodes of `el` joined without separator
pub fn stripped_text(el: ElementRef<'_>) -> String {
    joined_text(el, "")
}

/// Trimmed, non-empty text nodes of `el` joined with `sep`
pub fn joined_text(el: ElementRef<'_>, sep: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Stripped text of the first descendant matching `selector`
pub fn select_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(stripped_text)
}

/// Render a description section
///
/// Sections holding list items become one line per item. Otherwise the first
/// nested `div` is rendered one text node per line.
pub fn render_section(section: ElementRef<'_>) -> Option<String> {
    let items: Vec<String> = section.select(&COMMON.li).map(stripped_text).collect();
    if !items.is_empty() {
        return Some(items.join("\n"));
    }

    section
        .select(&COMMON.div)
        .next()
        .map(|body| joined_text(body, "\n"))
}

/// Visible text of a tag container's links, or of its spans when it has none
pub fn tag_texts(container: ElementRef<'_>) -> Vec<String> {
    let links: Vec<String> = container.select(&COMMON.a).map(stripped_text).collect();
    if !links.is_empty() {
        return links;
    }
    container.select(&COMMON.span).map(stripped_text).collect()
}

/// Merge custom-form blocks under `scope` into a description map
///
/// Blocks missing their heading or content are skipped.
pub fn merge_custom_forms(scope: ElementRef<'_>, description: &mut Fields) {
    for item in scope.select(&COMMON.custom_form_item) {
        let title = select_text(item, &COMMON.h3);
        let content = select_text(item, &COMMON.custom_form_content);
        if let (Some(title), Some(content)) = (title, content) {
            description.insert(title, content);
        }
    }
}

/// First non-empty text of `el` that is not inside a nested `span`
pub fn own_text(el: ElementRef<'_>) -> Option<String> {
    el.descendants()
        .filter_map(|node| node.value().as_text().map(|t| (node, t)))
        .filter(|(node, _)| {
            !node
                .ancestors()
                .take_while(|a| a.id() != el.id())
                .filter_map(|a| a.value().as_element())
                .any(|e| e.name() == "span")
        })
        .map(|(_, t)| t.trim())
        .find(|t| !t.is_empty())
        .map(String::from)
}

/// Whether `el` carries `class` as its first class attribute token
pub fn first_class_is(el: ElementRef<'_>, class: &str) -> bool {
    el.value()
        .attr("class")
        .and_then(|c| c.split_whitespace().next())
        == Some(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        let selector = Selector::parse(css).unwrap();
        doc.select(&selector).next().unwrap()
    }

    #[test]
    fn test_stripped_text_joins_nodes() {
        let doc = Html::parse_fragment("<div> Lương <b> 20 - 30 </b> triệu </div>");
        assert_eq!(stripped_text(first(&doc, "div")), "Lương20 - 30triệu");
        assert_eq!(joined_text(first(&doc, "div"), " "), "Lương 20 - 30 triệu");
    }

    #[test]
    fn test_render_section_list() {
        let doc = Html::parse_fragment(
            "<section><h3>Yêu cầu</h3><div><ul><li> Rust </li><li>SQL</li></ul></div></section>",
        );
        assert_eq!(
            render_section(first(&doc, "section")).as_deref(),
            Some("Rust\nSQL")
        );
    }

    #[test]
    fn test_render_section_prose() {
        let doc = Html::parse_fragment(
            "<section><h3>Mô tả</h3><div><p>Build APIs.</p><p>Review code.</p></div></section>",
        );
        assert_eq!(
            render_section(first(&doc, "section")).as_deref(),
            Some("Build APIs.\nReview code.")
        );
    }

    #[test]
    fn test_render_section_without_body() {
        let doc = Html::parse_fragment("<section><h3>Empty</h3></section>");
        assert!(render_section(first(&doc, "section")).is_none());
    }

    #[test]
    fn test_tag_texts_prefers_links() {
        let doc = Html::parse_fragment(
            r#"<div class="t"><a>Java</a><a> Go </a><span>ignored</span></div>"#,
        );
        assert_eq!(tag_texts(first(&doc, "div.t")), vec!["Java", "Go"]);

        let doc = Html::parse_fragment(r#"<div class="t"><span>Backend</span></div>"#);
        assert_eq!(tag_texts(first(&doc, "div.t")), vec!["Backend"]);
    }

    #[test]
    fn test_merge_custom_forms() {
        let doc = Html::parse_fragment(
            r#"<div id="scope">
                <div class="custom-form-job__item"><h3>Phúc lợi</h3>
                    <div class="custom-form-job__item--content">Thưởng Tết</div></div>
                <div class="custom-form-job__item"><div class="custom-form-job__item--content">orphan</div></div>
            </div>"#,
        );
        let mut description = Fields::new();
        merge_custom_forms(first(&doc, "#scope"), &mut description);
        assert_eq!(description.len(), 1);
        assert_eq!(description["Phúc lợi"], "Thưởng Tết");
    }

    #[test]
    fn test_own_text_skips_span() {
        let doc = Html::parse_fragment(
            r#"<label class="label-update"><span> Cập nhật </span> 1 ngày trước </label>"#,
        );
        assert_eq!(
            own_text(first(&doc, "label")).as_deref(),
            Some("1 ngày trước")
        );
    }

    #[test]
    fn test_own_text_empty_label() {
        let doc = Html::parse_fragment("<label><span>only span</span></label>");
        assert!(own_text(first(&doc, "label")).is_none());
    }

    #[test]
    fn test_first_class_is() {
        let doc = Html::parse_fragment(r#"<div class="footer-info-content extra">x</div>"#);
        assert!(first_class_is(first(&doc, "div"), "footer-info-content"));
        assert!(!first_class_is(first(&doc, "div"), "extra"));
    }
}
