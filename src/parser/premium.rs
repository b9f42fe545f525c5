//! Extractor for premium brand pages (`div.premium-job`)
//!
//! Premium pages carry no company block inside the detail container, so
//! `company_info` stays empty.

use indexmap::IndexMap;
use scraper::{ElementRef, Html};

use crate::models::{Fields, JobRecord, JobTags, Variant};
use crate::parser::html::{merge_custom_forms, render_section, select_text, stripped_text};
use crate::parser::selectors::{COMMON, PREMIUM};
use crate::parser::{ExtractContext, JobExtractor};
use crate::utils::error::ExtractError;

/// Premium layout extractor
#[derive(Default)]
pub struct PremiumExtractor {
    document: Option<Html>,
}

impl PremiumExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn job_info(job: ElementRef<'_>) -> Result<Fields, ExtractError> {
        let title = select_text(job, &PREMIUM.title).ok_or(ExtractError::MissingField(
            "premium-job-basic-information__content--title",
        ))?;

        let sections = job
            .select(&PREMIUM.info_sections)
            .next()
            .ok_or(ExtractError::MissingField(
                "premium-job-basic-information__content--sections",
            ))?;

        // Salary, location and experience are positional; a value-less item
        // must not shift the ones after it.
        let items: Vec<ElementRef<'_>> = sections.select(&PREMIUM.info_item).take(3).collect();
        let value = |index: usize| {
            items
                .get(index)
                .and_then(|item| select_text(*item, &PREMIUM.info_value))
                .ok_or(ExtractError::MissingField("basic-information-item__data--value"))
        };
        let salary = value(0)?;
        let location = value(1)?;
        let experience = value(2)?;

        let mut info = Fields::new();
        info.insert("job_title".to_string(), title);
        info.insert("salary".to_string(), salary);
        info.insert("location".to_string(), location);
        info.insert("experience".to_string(), experience);
        Ok(info)
    }

    fn general_info(job: ElementRef<'_>) -> Fields {
        let mut info = Fields::new();
        for row in job.select(&PREMIUM.general_data) {
            let label = select_text(row, &PREMIUM.general_label);
            let value = select_text(row, &PREMIUM.general_value);
            if let (Some(label), Some(value)) = (label, value) {
                info.insert(label, value);
            }
        }
        info
    }

    fn description(job: ElementRef<'_>) -> Fields {
        let mut description = Fields::new();
        for description_box in job.select(&PREMIUM.description_box) {
            let title = select_text(description_box, &COMMON.h2);
            if let (Some(title), Some(content)) = (title, render_section(description_box)) {
                description.insert(title, content);
            }
        }

        merge_custom_forms(job, &mut description);
        description
    }

    fn tags(job: ElementRef<'_>) -> JobTags {
        let job_tags = job.select(&PREMIUM.job_tags).map(stripped_text).collect();

        let mut related_tags = IndexMap::new();
        for section in job.select(&PREMIUM.related_section) {
            let Some(title) = select_text(section, &PREMIUM.related_title) else {
                continue;
            };
            let items = section.select(&PREMIUM.tag_item).map(stripped_text).collect();
            related_tags.insert(title, items);
        }

        JobTags {
            job_tags,
            related_tags,
        }
    }
}

impl JobExtractor for PremiumExtractor {
    fn variant(&self) -> Variant {
        Variant::Premium
    }

    fn load(&mut self, html: &str) -> bool {
        let document = Html::parse_document(html);
        let found = document.select(&PREMIUM.root).next().is_some();
        self.document = found.then_some(document);
        found
    }

    fn extract(&self, ctx: &ExtractContext) -> Result<JobRecord, ExtractError> {
        let document = self.document.as_ref().ok_or(ExtractError::NotLoaded)?;
        let job = document
            .select(&PREMIUM.root)
            .next()
            .ok_or(ExtractError::MissingContent { variant: "premium" })?;

        let mut record = ctx.blank_record(Variant::Premium);
        record.job_info = Self::job_info(job)?;
        record.general_info = Self::general_info(job);
        record.job_description = Self::description(job);
        record.tags = Self::tags(job);
        Ok(record)
    }
}
