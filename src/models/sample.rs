use super::Article;

const SAMPLE_TITLE: &str = "نمونه مقاله تولید شده با هوش مصنوعی";

const SAMPLE_CONTENT: &str = "# این یک مقاله نمونه است\n\n\
این مقاله به صورت نمایشی توسط دکمه \"تولید مقاله\" ساخته شده است.\n\n\
- قابلیت نوشتن با Markdown\n\
- پیش‌نمایش زنده\n\
- جستجو و فیلتر مقالات\n";

/// The canned article behind the "generate with AI" button.
///
/// Nothing is generated: the same Markdown document is returned every time.
pub fn sample_article() -> Article {
    Article {
        title: SAMPLE_TITLE.to_string(),
        content: SAMPLE_CONTENT.to_string(),
        image: None,
        date: None,
        tags: None,
        url: None,
    }
}
