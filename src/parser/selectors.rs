//! CSS selectors for TopCV listing and detail pages
//!
//! One selector table per page layout. Tables are built once on first use.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

/// Listing page (search result cards)
pub struct ListingSelectors {
    pub card: Selector,
    pub label: Selector,
    pub link: Selector,
}

/// Selectors shared by every detail layout
pub struct CommonSelectors {
    pub li: Selector,
    pub div: Selector,
    pub h2: Selector,
    pub h3: Selector,
    pub a: Selector,
    pub span: Selector,
    pub strong: Selector,
    pub custom_form_item: Selector,
    pub custom_form_content: Selector,
    pub premium_marker: Selector,
}

/// Normal layout (`/viec-lam/...`)
pub struct NormalSelectors {
    pub root: Selector,
    pub company_name: Selector,
    pub company_scale: Selector,
    pub company_address: Selector,
    pub company_field: Selector,
    pub title: Selector,
    pub info_value: Selector,
    pub general_box: Selector,
    pub general_group: Selector,
    pub general_title: Selector,
    pub general_value: Selector,
    pub description: Selector,
    pub description_item: Selector,
    pub category_box: Selector,
    pub category: Selector,
    pub category_title: Selector,
    pub category_tags: Selector,
}

/// Premium layout (`/brand/...` with a premium container)
pub struct PremiumSelectors {
    pub root: Selector,
    pub title: Selector,
    pub info_sections: Selector,
    pub info_item: Selector,
    pub info_value: Selector,
    pub general_data: Selector,
    pub general_label: Selector,
    pub general_value: Selector,
    pub description_box: Selector,
    pub job_tags: Selector,
    pub related_section: Selector,
    pub related_title: Selector,
    pub tag_item: Selector,
}

/// Brand layout (`/brand/...` without a premium container)
pub struct BrandSelectors {
    pub root: Selector,
    pub title: Selector,
    pub job_info: Selector,
    pub address: Selector,
    pub info_section: Selector,
    pub main: Selector,
    pub item: Selector,
    pub content_tab: Selector,
    pub job_tags: Selector,
    pub footer: Selector,
    pub footer_company_name: Selector,
    pub footer_title: Selector,
}

lazy_static! {
    pub static ref LISTING: ListingSelectors = ListingSelectors {
        card: parse_selector!(r#"div[data-box="BoxSearchResult"]"#),
        label: parse_selector!("label.label-update"),
        link: parse_selector!("h3.title a[href]"),
    };

    pub static ref COMMON: CommonSelectors = CommonSelectors {
        li: parse_selector!("li"),
        div: parse_selector!("div"),
        h2: parse_selector!("h2"),
        h3: parse_selector!("h3"),
        a: parse_selector!("a"),
        span: parse_selector!("span"),
        strong: parse_selector!("strong"),
        custom_form_item: parse_selector!("div.custom-form-job__item"),
        custom_form_content: parse_selector!("div.custom-form-job__item--content"),
        premium_marker: parse_selector!("div.premium-job"),
    };

    pub static ref NORMAL: NormalSelectors = NormalSelectors {
        root: parse_selector!("div.job-detail__body"),
        company_name: parse_selector!("div.company-name-label a.name"),
        company_scale: parse_selector!("div.company-scale div.company-value"),
        company_address: parse_selector!("div.company-address div.company-value"),
        company_field: parse_selector!("div.company-field div.company-value"),
        title: parse_selector!("h1.job-detail__info--title"),
        info_value: parse_selector!("div.job-detail__info--section-content-value"),
        general_box: parse_selector!("div.job-detail__body-right--box-general"),
        general_group: parse_selector!("div.box-general-group-info"),
        general_title: parse_selector!("div.box-general-group-info-title"),
        general_value: parse_selector!("div.box-general-group-info-value"),
        description: parse_selector!("div.job-description"),
        description_item: parse_selector!("div.job-description__item"),
        category_box: parse_selector!("div.job-detail__body-right--box-category"),
        category: parse_selector!("div.box-category, div.box-category-collapsed"),
        category_title: parse_selector!("div.box-title"),
        category_tags: parse_selector!("div.box-category-tags"),
    };

    pub static ref PREMIUM: PremiumSelectors = PremiumSelectors {
        root: parse_selector!("div.premium-job"),
        title: parse_selector!("h2.premium-job-basic-information__content--title"),
        info_sections: parse_selector!("div.premium-job-basic-information__content--sections"),
        info_item: parse_selector!("div.basic-information-item"),
        info_value: parse_selector!("div.basic-information-item__data--value"),
        general_data: parse_selector!("div.general-information-data"),
        general_label: parse_selector!("div.general-information-data__label"),
        general_value: parse_selector!("div.general-information-data__value"),
        description_box: parse_selector!("div.premium-job-description__box"),
        job_tags: parse_selector!("div.job-tags a"),
        related_section: parse_selector!("div.premium-job-related-tags__section"),
        related_title: parse_selector!("h2.premium-job-box__title"),
        tag_item: parse_selector!(".tag-item"),
    };

    pub static ref BRAND: BrandSelectors = BrandSelectors {
        root: parse_selector!("div.block-left"),
        title: parse_selector!("h2.title"),
        job_info: parse_selector!("div.box-job-info"),
        address: parse_selector!("div.box-address"),
        info_section: parse_selector!("div.box-info"),
        main: parse_selector!("div.box-main"),
        item: parse_selector!("div.box-item"),
        content_tab: parse_selector!("div.content-tab"),
        job_tags: parse_selector!("div.job-tags a"),
        footer: parse_selector!("div.footer-info"),
        footer_company_name: parse_selector!("div.footer-info-company-name"),
        footer_title: parse_selector!("div.footer-info-title"),
    };
}
