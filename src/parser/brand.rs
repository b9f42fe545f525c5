//! Extractor for brand pages without a premium container (`div.block-left`)
//!
//! Brand pages spread the record across the detail column and the page
//! footer: job data comes from `div.block-left`, company data from
//! `div.footer-info`.

use scraper::{ElementRef, Html};

use crate::models::{Fields, JobRecord, Variant};
use crate::parser::html::{first_class_is, merge_custom_forms, select_text, stripped_text};
use crate::parser::selectors::{BRAND, COMMON};
use crate::parser::{ExtractContext, JobExtractor};
use crate::utils::error::ExtractError;

/// Brand layout extractor
#[derive(Default)]
pub struct BrandExtractor {
    document: Option<Html>,
}

/// Parts collected from the `box-info` sections
#[derive(Default)]
struct Details {
    general_info: Fields,
    job_description: Fields,
    job_tags: Vec<String>,
}

impl BrandExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn job_info(job: ElementRef<'_>, job_box: ElementRef<'_>) -> Result<Fields, ExtractError> {
        let title = select_text(job, &BRAND.title).ok_or(ExtractError::MissingField("title"))?;

        let mut info = Fields::new();
        info.insert("job_title".to_string(), title);

        if let Some(address) = job_box.select(&BRAND.address).next() {
            let lines: Vec<String> = address
                .children()
                .filter_map(ElementRef::wrap)
                .map(stripped_text)
                .filter(|line| !line.is_empty())
                .collect();
            info.insert("location".to_string(), lines.join("\n"));
        }
        Ok(info)
    }

    fn details(job_box: ElementRef<'_>) -> Details {
        let mut details = Details::default();

        for section in job_box.select(&BRAND.info_section) {
            if let Some(main) = section.select(&BRAND.main).next() {
                for item in main.select(&BRAND.item) {
                    let label = select_text(item, &COMMON.strong);
                    let value = select_text(item, &COMMON.span);
                    if let (Some(label), Some(value)) = (label, value) {
                        details.general_info.insert(label, value);
                    }
                }
                continue;
            }

            if let Some(title) = select_text(section, &COMMON.h2) {
                let content = section
                    .select(&BRAND.content_tab)
                    .next()
                    .map(content_lines)
                    .unwrap_or_default();
                details.job_description.insert(title, content);
            }

            merge_custom_forms(section, &mut details.job_description);
            details
                .job_tags
                .extend(section.select(&BRAND.job_tags).map(stripped_text));
        }

        details
    }

    fn company_info(document: &Html) -> Fields {
        let mut company = Fields::new();
        let Some(footer) = document.select(&BRAND.footer).next() else {
            return company;
        };

        if let Some(name) = select_text(footer, &BRAND.footer_company_name) {
            company.insert("name".to_string(), name);
        }

        for title in footer.select(&BRAND.footer_title) {
            let content = title
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .next()
                .filter(|el| el.value().name() == "div" && first_class_is(*el, "footer-info-content"));
            if let Some(content) = content {
                company.insert(stripped_text(title), stripped_text(content));
            }
        }
        company
    }
}

/// Render a content tab one line per block
///
/// Lists give one `- item` line per entry; `div` and `p` blocks give one
/// line of text each, unless they wrap a list, in which case they are
/// rendered block by block.
fn content_lines(tab: ElementRef<'_>) -> String {
    let mut lines = Vec::new();
    push_block_lines(tab, &mut lines);
    lines.join("\n")
}

fn push_block_lines(parent: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in parent.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "ul" | "ol" => lines.extend(
                child
                    .select(&COMMON.li)
                    .map(|li| format!("- {}", stripped_text(li))),
            ),
            "div" | "p" if child.select(&COMMON.li).next().is_some() => {
                push_block_lines(child, lines);
            }
            "div" | "p" => {
                let text = stripped_text(child);
                if !text.is_empty() {
                    lines.push(text);
                }
            }
            _ => {}
        }
    }
}

impl JobExtractor for BrandExtractor {
    fn variant(&self) -> Variant {
        Variant::Brand
    }

    fn load(&mut self, html: &str) -> bool {
        let document = Html::parse_document(html);
        let found = document.select(&BRAND.root).next().is_some();
        self.document = found.then_some(document);
        found
    }

    fn extract(&self, ctx: &ExtractContext) -> Result<JobRecord, ExtractError> {
        let document = self.document.as_ref().ok_or(ExtractError::NotLoaded)?;
        let job = document
            .select(&BRAND.root)
            .next()
            .ok_or(ExtractError::MissingContent { variant: "brand" })?;
        let job_box = job
            .select(&BRAND.job_info)
            .next()
            .ok_or(ExtractError::MissingField("box-job-info"))?;

        let mut record = ctx.blank_record(Variant::Brand);
        record.job_info = Self::job_info(job, job_box)?;

        let details = Self::details(job_box);
        record.general_info = details.general_info;
        record.job_description = details.job_description;
        record.tags.job_tags = details.job_tags;
        record.company_info = Self::company_info(document);
        Ok(record)
    }
}
