use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 15;

/// Sanitized pagination input. Invalid or non-positive values fall back to
/// the defaults; bad pagination is never a request error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Rows to skip on the deterministic path. Explore mode ignores this.
    pub fn skip(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn meta(&self, total: i64) -> FeedMeta {
        FeedMeta {
            total,
            page: self.page,
            total_pages: (total + self.limit - 1) / self.limit,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMeta {
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_falls_back_to_defaults() {
        for (page, limit) in [
            (None, None),
            (Some("abc"), Some("")),
            (Some("-1"), Some("0")),
            (Some("2.5"), Some(" ")),
        ] {
            let req = PageRequest::from_raw(page, limit);
            assert_eq!(req.page, DEFAULT_PAGE);
            assert_eq!(req.limit, DEFAULT_LIMIT);
        }
    }

    #[test]
    fn skip_is_zero_indexed_offset() {
        assert_eq!(PageRequest::from_raw(Some("1"), Some("15")).skip(), 0);
        assert_eq!(PageRequest::from_raw(Some("3"), Some("10")).skip(), 20);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        let req = PageRequest::from_raw(Some("1"), Some("15"));
        assert_eq!(req.meta(0).total_pages, 0);
        assert_eq!(req.meta(1).total_pages, 1);
        assert_eq!(req.meta(15).total_pages, 1);
        assert_eq!(req.meta(16).total_pages, 2);
        assert_eq!(req.meta(45).total_pages, 3);
    }

    #[test]
    fn zero_pages_only_when_empty() {
        let req = PageRequest::from_raw(None, None);
        for total in 1..50 {
            assert!(req.meta(total).total_pages > 0);
        }
        assert_eq!(req.meta(0).total, 0);
    }
}
