//! Common test utilities and HTML fixtures

#![allow(dead_code)]

use jobsnitch::config::Config;

/// User agent pinned for every test fetcher
pub const TEST_USER_AGENT: &str = "jobsnitch-test-agent/1.0";

/// Listing path served by the mock server
pub const LISTING_PATH: &str = "/tim-viec-lam-cong-nghe-thong-tin-cr257";

/// Config pointed at a mock server, with every delay removed
pub fn test_config(server_uri: &str) -> Config {
    let mut config = Config::default();
    config.crawler.listing_base_url = format!("{server_uri}{LISTING_PATH}");
    config.crawler.user_agents = vec![TEST_USER_AGENT.to_string()];
    config.crawler.requests_per_second = 100;
    config.crawler.retry_delay_secs = 0;
    config.crawler.politeness_delay_secs = 0;
    config.crawler.request_timeout_secs = 5;
    config
}

/// One search-result card
pub fn card(label: &str, href: &str) -> String {
    format!(
        r#"<div class="job-item-search-result" data-box="BoxSearchResult">
  <h3 class="title"><a href="{href}" target="_blank"><span>Job</span></a></h3>
  <label class="address mobile-hidden label-update">{label}<span class="hidden">x</span></label>
</div>"#
    )
}

/// Listing page wrapping `cards`
pub fn listing_page(cards: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><body><div class="job-list-search-result">{}</div></body></html>"#,
        cards.join("\n")
    )
}

/// Standard detail layout
pub const NORMAL_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="job-detail__body">
  <div class="job-detail__company">
    <div class="company-name-label"><a class="name" href="/cong-ty/fpt/1.html">Công ty FPT Software</a></div>
    <div class="company-scale"><div class="company-value">1000+ nhân viên</div></div>
    <div class="company-address"><div class="company-value">Cầu Giấy, Hà Nội</div></div>
    <div class="company-field"><div class="company-value">IT - Phần mềm</div></div>
  </div>
  <h1 class="job-detail__info--title">Senior <a>Rust</a> Engineer</h1>
  <div class="job-detail__info--section-content-value">30 - 45 triệu</div>
  <div class="job-detail__info--section-content-value">Hà Nội</div>
  <div class="job-detail__info--section-content-value">3 năm</div>
  <div class="job-detail__body-right--box-general">
    <div class="box-general-group-info">
      <div class="box-general-group-info-title">Cấp bậc</div>
      <div class="box-general-group-info-value">Trưởng nhóm</div>
    </div>
    <div class="box-general-group-info">
      <div class="box-general-group-info-title">Số lượng tuyển</div>
      <div class="box-general-group-info-value">2 người</div>
    </div>
  </div>
  <div class="job-description">
    <div class="job-description__item"><h3>Mô tả công việc</h3>
      <div><ul><li>Thiết kế hệ thống</li><li>Review code</li></ul></div></div>
    <div class="job-description__item"><h3>Yêu cầu ứng viên</h3>
      <div><p>Thành thạo Rust</p><p>Hiểu biết về tokio</p></div></div>
  </div>
  <div class="job-detail__body-right--box-category">
    <div class="box-category"><div class="box-title">Chuyên môn</div>
      <div class="box-category-tags"><a>Rust</a><a>Backend</a></div></div>
  </div>
</div>
</body></html>"#;

/// Premium detail layout, served under `/brand/...`
pub const PREMIUM_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="premium-job">
  <h2 class="premium-job-basic-information__content--title">Data Engineer</h2>
  <div class="premium-job-basic-information__content--sections">
    <div class="basic-information-item"><div class="basic-information-item__data--value">Thoả thuận</div></div>
    <div class="basic-information-item"><div class="basic-information-item__data--value">Hồ Chí Minh</div></div>
    <div class="basic-information-item"><div class="basic-information-item__data--value">2 năm</div></div>
  </div>
  <div class="general-information-data">
    <div class="general-information-data__label">Hình thức làm việc</div>
    <div class="general-information-data__value">Toàn thời gian</div>
  </div>
  <div class="premium-job-description__box"><h2>Mô tả công việc</h2>
    <div><ul><li>Xây dựng pipeline dữ liệu</li></ul></div></div>
  <div class="job-tags"><a>Spark</a><a>Airflow</a></div>
  <div class="premium-job-related-tags__section">
    <h2 class="premium-job-box__title">Ngành nghề</h2>
    <span class="tag-item">Data</span>
  </div>
</div>
</body></html>"#;

/// Plain brand detail layout, served under `/brand/...`
pub const BRAND_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="block-left">
  <h2 class="title">Kỹ sư DevOps</h2>
  <div class="box-job-info">
    <div class="box-address"><div>- Hà Nội: Tòa nhà MISA</div></div>
    <div class="box-info">
      <div class="box-main">
        <div class="box-item"><strong>Mức lương</strong><span>Tới 40 triệu</span></div>
      </div>
    </div>
    <div class="box-info">
      <h2>Mô tả công việc</h2>
      <div class="content-tab"><ul><li>Vận hành Kubernetes</li></ul></div>
      <div class="job-tags"><a>DevOps</a></div>
    </div>
  </div>
</div>
<div class="footer-info">
  <div class="footer-info-content footer-info-company-name">Công ty Cổ phần MISA</div>
  <div class="footer-info-title">Địa chỉ</div>
  <div class="footer-info-content">Cầu Giấy, Hà Nội</div>
</div>
</body></html>"#;
