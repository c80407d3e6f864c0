use super::error::ApiError;

pub const PAGE_SIZE: usize = 10;

/// Returns the 1-based `page` slice of an ordered collection. Pages past the
/// end are empty; callers report an empty page as not found.
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// A missing page parameter defaults to the first page; non-positive values
/// are rejected rather than clamped.
pub fn resolve_page(page: Option<i64>) -> Result<usize, ApiError> {
    match page {
        None => Ok(1),
        Some(p) if p >= 1 => Ok(p as usize),
        Some(_) => Err(ApiError::BadRequest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_len(total: usize, page: usize) -> usize {
        PAGE_SIZE.min(total.saturating_sub((page - 1) * PAGE_SIZE))
    }

    #[test]
    fn page_length_matches_formula() {
        let items: Vec<usize> = (0..23).collect();
        for page in 1..=4 {
            assert_eq!(paginate(&items, page).len(), expected_len(items.len(), page));
        }
    }

    #[test]
    fn first_page_starts_at_first_item() {
        let items: Vec<usize> = (0..23).collect();
        assert_eq!(paginate(&items, 1), &items[0..10]);
    }

    #[test]
    fn last_partial_page_is_truncated() {
        let items: Vec<usize> = (0..23).collect();
        assert_eq!(paginate(&items, 3), &items[20..23]);
    }

    #[test]
    fn page_beyond_end_is_empty() {
        let items: Vec<usize> = (0..23).collect();
        assert!(paginate(&items, 4).is_empty());
        assert!(paginate(&items, 1000).is_empty());
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let items: Vec<usize> = (0..20).collect();
        assert_eq!(paginate(&items, 2).len(), 10);
        assert!(paginate(&items, 3).is_empty());
    }

    #[test]
    fn empty_collection_yields_empty_page() {
        let items: Vec<usize> = Vec::new();
        assert!(paginate(&items, 1).is_empty());
    }

    #[test]
    fn missing_page_defaults_to_one() {
        assert_eq!(resolve_page(None).unwrap(), 1);
        assert_eq!(resolve_page(Some(7)).unwrap(), 7);
    }

    #[test]
    fn non_positive_pages_are_rejected() {
        assert_eq!(resolve_page(Some(0)), Err(ApiError::BadRequest));
        assert_eq!(resolve_page(Some(-3)), Err(ApiError::BadRequest));
    }
}
