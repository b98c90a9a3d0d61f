//! Pure list operations over aggregated articles: search, category filter,
//! ordering, pagination and the lookups behind the detail page.

use std::collections::HashSet;

use serde::Deserialize;

use crate::models::Article;

/// Pseudo-category that matches every article ("all").
pub const ALL_CATEGORIES: &str = "همه";

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const RELATED_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Title,
}

/// One page of a longer list. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Case-insensitive substring match on title, content or any tag.
pub fn matches_query(article: &Article, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    article.title.to_lowercase().contains(&query)
        || article.content.to_lowercase().contains(&query)
        || article
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query))
}

pub fn matches_category(article: &Article, category: &str) -> bool {
    category == ALL_CATEGORIES || article.has_tag(category)
}

pub fn filter<P>(articles: &[Article], predicate: P) -> Vec<Article>
where
    P: Fn(&Article) -> bool,
{
    articles.iter().filter(|a| predicate(*a)).cloned().collect()
}

/// Stable in-place sort.
///
/// Date orders compare parsed timestamps; articles with a missing or
/// unparseable date count as older than any dated article.
pub fn sort_by(articles: &mut [Article], order: SortOrder) {
    match order {
        SortOrder::Newest => articles.sort_by(|a, b| b.published_at().cmp(&a.published_at())),
        SortOrder::Oldest => articles.sort_by(|a, b| a.published_at().cmp(&b.published_at())),
        SortOrder::Title => articles.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

/// Slice out page `page` (1-based) of `page_size` items.
///
/// Zero is treated as one for both arguments; pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, page_size: usize, page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size);

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total,
    }
}

/// [`ALL_CATEGORIES`] followed by every distinct tag in first-seen order.
pub fn categories(articles: &[Article]) -> Vec<String> {
    let mut seen = HashSet::new();
    std::iter::once(ALL_CATEGORIES)
        .chain(articles.iter().flat_map(|a| a.tags().iter().map(String::as_str)))
        .filter(|tag| seen.insert(*tag))
        .map(str::to_string)
        .collect()
}

/// First article whose title equals `title`.
pub fn find_by_title<'a>(articles: &'a [Article], title: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.title == title)
}

/// Up to `limit` other articles sharing at least one tag with `target`.
pub fn related(articles: &[Article], target: &Article, limit: usize) -> Vec<Article> {
    articles
        .iter()
        .filter(|a| a.title != target.title)
        .filter(|a| a.tags().iter().any(|tag| target.has_tag(tag)))
        .take(limit)
        .cloned()
        .collect()
}
