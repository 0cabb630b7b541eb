use std::cmp::Reverse;

use crate::models::photo::Photo;

/// Sort key value for photos without a keyword hit.
pub const PRIORITY_NORMAL: i32 = 1;
/// Sort key value for flagged photos; sorts after every normal photo.
pub const PRIORITY_DEMOTED: i32 = 2;

/// Configured keywords that demote (not hide) matching photos in ranked
/// results. A photo is flagged when any keyword occurs as a case-insensitive
/// substring of its title, its prompt, or any of its tags.
///
/// Substring matching can flag incidental hits ("assassin" style false
/// positives); operators tune the list via `FEED_DEMOTED_KEYWORDS` rather
/// than the code switching to exact-word matching, which would change
/// observable ordering.
#[derive(Debug, Clone)]
pub struct DemotionList {
    keywords: Vec<String>,
}

impl DemotionList {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn flags(&self, photo: &Photo) -> bool {
        self.keywords.iter().any(|kw| {
            photo.title.to_lowercase().contains(kw)
                || photo
                    .prompt
                    .as_deref()
                    .is_some_and(|p| p.to_lowercase().contains(kw))
                || photo.tags.iter().any(|t| t.to_lowercase().contains(kw))
        })
    }

    pub fn priority(&self, photo: &Photo) -> i32 {
        if self.flags(photo) {
            PRIORITY_DEMOTED
        } else {
            PRIORITY_NORMAL
        }
    }

    /// Orders photos by `(priority, created_at DESC)`: recency governs within
    /// a priority class but never across classes. Mirrors the ORDER BY the
    /// Postgres repository emits for the same list.
    pub fn rank(&self, photos: &mut [Photo]) {
        photos.sort_by_key(|p| (self.priority(p), Reverse(p.created_at)));
    }

    /// The keywords as `ILIKE` patterns, for pushing the flagged test into
    /// the database query.
    pub fn like_patterns(&self) -> Vec<String> {
        self.keywords.iter().map(|kw| like_pattern(kw)).collect()
    }
}

/// Wraps a term in `%...%` with LIKE metacharacters escaped, so a literal
/// keyword or search term never acts as a wildcard.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use uuid::Uuid;

    use super::*;

    fn photo(title: &str, prompt: Option<&str>, tags: &[&str], minute: i64) -> Photo {
        Photo {
            id: Uuid::new_v4(),
            title: title.to_string(),
            prompt: prompt.map(str::to_string),
            image_url: "https://images.test/x.webp".to_string(),
            width: Some(1024),
            height: Some(1024),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: DateTime::from_timestamp(minute * 60, 0).unwrap(),
        }
    }

    fn list(keywords: &[&str]) -> DemotionList {
        DemotionList::new(keywords.iter().map(|k| k.to_string()).collect())
    }

    #[test]
    fn flags_substring_matches_in_every_field() {
        let demoted = list(&["gore"]);
        assert!(demoted.flags(&photo("Gorey sunset", None, &[], 0)));
        assert!(demoted.flags(&photo("Sunset", Some("dripping GORE"), &[], 0)));
        assert!(demoted.flags(&photo("Sunset", None, &["gorefest"], 0)));
        assert!(!demoted.flags(&photo("Sunset", Some("calm sea"), &["beach"], 0)));
    }

    #[test]
    fn empty_list_flags_nothing() {
        let demoted = list(&[]);
        assert!(demoted.is_empty());
        assert!(!demoted.flags(&photo("anything", Some("at all"), &["tag"], 0)));
    }

    #[test]
    fn flagged_photos_sort_after_clean_ones_regardless_of_recency() {
        let demoted = list(&["nsfw"]);
        let mut photos = vec![
            photo("nsfw newest", None, &[], 30),
            photo("old clean", None, &[], 1),
            photo("new clean", None, &[], 20),
            photo("nsfw older", None, &[], 10),
        ];
        demoted.rank(&mut photos);

        let titles: Vec<&str> = photos.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["new clean", "old clean", "nsfw newest", "nsfw older"]
        );
    }

    #[test]
    fn like_patterns_escape_metacharacters() {
        let demoted = list(&["100%_real"]);
        assert_eq!(demoted.like_patterns(), vec!["%100\\%\\_real%".to_string()]);
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }
}
