
/// One entry of a page navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    /// Skipped run of pages, shown as "…"
    Gap,
}

/// Page numbers to show around `current` (1-based) out of `total` pages.
///
/// The first and last pages are always present, plus up to `delta` pages on
/// either side of the current one. Skipped runs collapse to a single gap.
pub fn pagination_range(current: usize, total: usize, delta: usize) -> Vec<PageItem> {
    let left = current.saturating_sub(delta).max(2);
    let right = total.saturating_sub(1).min(current.saturating_add(delta));

    let mut range = vec![PageItem::Page(1)];
    if left > 2 {
        range.push(PageItem::Gap);
    }
    range.extend((left..=right).map(PageItem::Page));
    if right < total.saturating_sub(1) {
        range.push(PageItem::Gap);
    }
    if total > 1 {
        range.push(PageItem::Page(total));
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Gap, Page};

    #[test]
    fn few_pages_have_no_gaps() {
        assert_eq!(pagination_range(1, 3, 2), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(pagination_range(2, 5, 2), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
    }

    #[test]
    fn gaps_on_both_sides() {
        assert_eq!(
            pagination_range(5, 10, 2),
            vec![Page(1), Gap, Page(3), Page(4), Page(5), Page(6), Page(7), Gap, Page(10)],
        );
    }

    #[test]
    fn edges() {
        assert_eq!(pagination_range(1, 10, 2), vec![Page(1), Page(2), Page(3), Gap, Page(10)]);
        assert_eq!(pagination_range(10, 10, 2), vec![Page(1), Gap, Page(8), Page(9), Page(10)]);
        assert_eq!(pagination_range(1, 10, 0), vec![Page(1), Gap, Page(10)]);
    }

    #[test]
    fn single_or_no_pages() {
        assert_eq!(pagination_range(1, 1, 2), vec![Page(1)]);
        assert_eq!(pagination_range(1, 0, 2), vec![Page(1)]);
    }
}
