//! Page splitting for batched store calls
//!
//! Every batch write and batch delete goes through [`chunk`], so no single
//! store call carries more than `store.page_size` items.

use crate::domain::{Result, TombolaError};

/// Splits `items` into contiguous, order-preserving pages
///
/// Every page holds exactly `page_size` items except possibly the last,
/// which holds the remainder. Empty input yields no pages.
///
/// # Errors
///
/// Returns `InvalidArgument` when `page_size` is zero.
///
/// # Examples
///
/// ```
/// use tombola::core::pages::chunk;
///
/// let pages = chunk(vec![1, 2, 3, 4, 5], 2).unwrap();
/// assert_eq!(pages, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn chunk<T>(items: Vec<T>, page_size: usize) -> Result<Vec<Vec<T>>> {
    if page_size == 0 {
        return Err(TombolaError::InvalidArgument(
            "page size must be at least 1".to_string(),
        ));
    }

    let mut pages = Vec::with_capacity(page_count(items.len(), page_size));
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        pages.push(items.by_ref().take(page_size).collect());
    }
    Ok(pages)
}

/// Number of pages [`chunk`] would produce
///
/// Returns 0 when `page_size` is zero.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 25, 0 ; "empty input")]
    #[test_case(1, 25, 1 ; "single item")]
    #[test_case(25, 25, 1 ; "exact page")]
    #[test_case(26, 25, 2 ; "one over")]
    #[test_case(600, 25, 24 ; "six hundred")]
    #[test_case(7, 1, 7 ; "page of one")]
    fn test_chunk_shape(len: usize, page_size: usize, expected_pages: usize) {
        let items: Vec<usize> = (0..len).collect();
        let pages = chunk(items.clone(), page_size).unwrap();

        assert_eq!(pages.len(), expected_pages);
        assert_eq!(page_count(len, page_size), expected_pages);

        // All but the last page are full
        if let Some((last, full)) = pages.split_last() {
            assert!(full.iter().all(|p| p.len() == page_size));
            assert!(!last.is_empty() && last.len() <= page_size);
        }

        let flattened: Vec<usize> = pages.into_iter().flatten().collect();
        assert_eq!(flattened, items);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = chunk(vec![1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, TombolaError::InvalidArgument(_)));
        assert_eq!(page_count(3, 0), 0);
    }

    #[test]
    fn test_remainder_page() {
        let pages = chunk((1..=7).collect::<Vec<_>>(), 3).unwrap();
        assert_eq!(pages, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }
}
