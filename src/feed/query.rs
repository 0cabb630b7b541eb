use uuid::Uuid;

/// The single retrieval predicate a feed request resolves to. Modes are
/// mutually exclusive; one request never combines them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFilter {
    /// Explicit id list (e.g. the saved/favorites tab). May be empty, in
    /// which case the feed short-circuits without touching the database.
    Ids(Vec<Uuid>),
    /// Exact, case-sensitive tag membership.
    Tag(String),
    /// Case-insensitive substring over title, prompt and tags.
    Search(String),
    /// No filter: explore mode.
    All,
}

impl FeedFilter {
    /// Resolves request parameters into one filter, first match wins:
    /// ids > tag > search > explore.
    ///
    /// An `ids` parameter that is present but yields no parseable ids still
    /// selects id-list mode; supplying ids means "fetch exactly these", and
    /// an empty selection must not degrade into an unbounded match-all query.
    /// Blank `tag`/`search` values count as absent.
    pub fn resolve(ids: Option<&str>, tag: Option<&str>, search: Option<&str>) -> FeedFilter {
        if let Some(raw) = ids {
            let list = raw
                .split(',')
                .filter_map(|s| Uuid::parse_str(s.trim()).ok())
                .collect();
            return FeedFilter::Ids(list);
        }
        if let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) {
            return FeedFilter::Tag(tag.to_string());
        }
        if let Some(q) = search.map(str::trim).filter(|q| !q.is_empty()) {
            return FeedFilter::Search(q.to_string());
        }
        FeedFilter::All
    }

    /// Whether a deterministic (ranked, paginated) query is in effect.
    pub fn filtered(&self) -> bool {
        !matches!(self, FeedFilter::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_take_precedence_over_tag_and_search() {
        let id = Uuid::new_v4();
        let ids = id.to_string();
        let filter = FeedFilter::resolve(Some(&ids), Some("cyberpunk"), Some("neon"));
        assert_eq!(filter, FeedFilter::Ids(vec![id]));
    }

    #[test]
    fn tag_takes_precedence_over_search() {
        let filter = FeedFilter::resolve(None, Some("cyberpunk"), Some("neon"));
        assert_eq!(filter, FeedFilter::Tag("cyberpunk".into()));
    }

    #[test]
    fn no_parameters_resolve_to_explore() {
        assert_eq!(FeedFilter::resolve(None, None, None), FeedFilter::All);
        assert!(!FeedFilter::resolve(None, None, None).filtered());
    }

    #[test]
    fn blank_tag_and_search_count_as_absent() {
        assert_eq!(FeedFilter::resolve(None, Some("  "), Some("")), FeedFilter::All);
    }

    #[test]
    fn present_but_empty_ids_resolve_to_empty_id_list() {
        assert_eq!(FeedFilter::resolve(Some(""), None, None), FeedFilter::Ids(vec![]));
        assert_eq!(FeedFilter::resolve(Some(","), None, None), FeedFilter::Ids(vec![]));
    }

    #[test]
    fn unparseable_ids_are_dropped() {
        let id = Uuid::new_v4();
        let raw = format!("not-a-uuid, {id} ,");
        assert_eq!(
            FeedFilter::resolve(Some(&raw), None, None),
            FeedFilter::Ids(vec![id])
        );
    }
}
