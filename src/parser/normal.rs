//! Extractor for the standard job detail layout (`/viec-lam/...`)

use indexmap::IndexMap;
use scraper::{ElementRef, Html};

use crate::models::{Fields, JobRecord, Variant};
use crate::parser::html::{
    joined_text, merge_custom_forms, render_section, select_text, stripped_text, tag_texts,
};
use crate::parser::selectors::{COMMON, NORMAL};
use crate::parser::{ExtractContext, JobExtractor};
use crate::utils::error::ExtractError;

/// Standard layout extractor
#[derive(Default)]
pub struct NormalExtractor {
    document: Option<Html>,
}

impl NormalExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn company_info(job: ElementRef<'_>) -> Result<Fields, ExtractError> {
        let name = select_text(job, &NORMAL.company_name)
            .ok_or(ExtractError::MissingField("company-name-label"))?;

        let mut info = Fields::new();
        info.insert("company_name".to_string(), name);

        // The remaining rows come and go with the employer profile
        let fields = [
            ("company_scale", &NORMAL.company_scale),
            ("company_address", &NORMAL.company_address),
            ("company_field", &NORMAL.company_field),
        ];
        for (key, selector) in fields {
            if let Some(value) = select_text(job, selector) {
                info.insert(key.to_string(), value);
            }
        }
        Ok(info)
    }

    fn job_info(job: ElementRef<'_>) -> Result<Fields, ExtractError> {
        let title = job
            .select(&NORMAL.title)
            .next()
            .map(|el| joined_text(el, " "))
            .ok_or(ExtractError::MissingField("job-detail__info--title"))?;

        let values: Vec<String> = job.select(&NORMAL.info_value).map(stripped_text).collect();
        let [salary, location, experience] = match values.as_slice() {
            [s, l, e, ..] => [s.clone(), l.clone(), e.clone()],
            _ => {
                return Err(ExtractError::MissingField(
                    "job-detail__info--section-content-value",
                ))
            }
        };

        let mut info = Fields::new();
        info.insert("job_title".to_string(), title);
        info.insert("salary".to_string(), salary);
        info.insert("location".to_string(), location);
        info.insert("experience".to_string(), experience);
        Ok(info)
    }

    fn general_info(job: ElementRef<'_>) -> Fields {
        let mut info = Fields::new();
        let Some(box_general) = job.select(&NORMAL.general_box).next() else {
            return info;
        };

        for group in box_general.select(&NORMAL.general_group) {
            let title = select_text(group, &NORMAL.general_title);
            let value = select_text(group, &NORMAL.general_value);
            if let (Some(title), Some(value)) = (title, value) {
                info.insert(title, value);
            }
        }
        info
    }

    fn description(job: ElementRef<'_>) -> Result<Fields, ExtractError> {
        let container = job
            .select(&NORMAL.description)
            .next()
            .ok_or(ExtractError::MissingField("job-description"))?;

        let mut description = Fields::new();
        for item in container.select(&NORMAL.description_item) {
            let title = select_text(item, &COMMON.h3);
            if let (Some(title), Some(content)) = (title, render_section(item)) {
                description.insert(title, content);
            }
        }

        merge_custom_forms(job, &mut description);
        Ok(description)
    }

    fn categories(job: ElementRef<'_>) -> Result<IndexMap<String, Vec<String>>, ExtractError> {
        let category_box = job
            .select(&NORMAL.category_box)
            .next()
            .ok_or(ExtractError::MissingField("job-detail__body-right--box-category"))?;

        let mut categories = IndexMap::new();
        for category in category_box.select(&NORMAL.category) {
            let title = select_text(category, &NORMAL.category_title);
            let tags = category.select(&NORMAL.category_tags).next().map(tag_texts);
            if let (Some(title), Some(tags)) = (title, tags) {
                categories.insert(title, tags);
            }
        }
        Ok(categories)
    }
}

impl JobExtractor for NormalExtractor {
    fn variant(&self) -> Variant {
        Variant::Normal
    }

    fn load(&mut self, html: &str) -> bool {
        let document = Html::parse_document(html);
        let found = document.select(&NORMAL.root).next().is_some();
        self.document = found.then_some(document);
        found
    }

    fn extract(&self, ctx: &ExtractContext) -> Result<JobRecord, ExtractError> {
        let document = self.document.as_ref().ok_or(ExtractError::NotLoaded)?;
        let job = document
            .select(&NORMAL.root)
            .next()
            .ok_or(ExtractError::MissingContent { variant: "normal" })?;

        let mut record = ctx.blank_record(Variant::Normal);
        record.company_info = Self::company_info(job)?;
        record.job_info = Self::job_info(job)?;
        record.general_info = Self::general_info(job);
        record.job_description = Self::description(job)?;
        record.tags.related_tags = Self::categories(job)?;
        Ok(record)
    }
}
