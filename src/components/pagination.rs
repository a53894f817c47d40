//! Pagination Component
//!
//! Page buttons for client-side paged tables.

use leptos::prelude::*;

/// Buttons shown around the current page
const WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(usize),
    Gap,
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Slice of `items` shown on 1-based `page`
pub fn page_slice<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    items
        .iter()
        .skip(page.saturating_sub(1) * page_size)
        .take(page_size)
        .cloned()
        .collect()
}

/// Window of up to five pages around `current`, with the first and last
/// page always reachable
pub fn page_numbers(current: usize, total: usize) -> Vec<PageButton> {
    if total == 0 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(2).max(1);
    let end = (start + WINDOW - 1).min(total);
    if end - start < WINDOW - 1 {
        start = (end + 1).saturating_sub(WINDOW).max(1);
    }

    let mut buttons = Vec::with_capacity(WINDOW + 4);
    if start > 1 {
        buttons.push(PageButton::Page(1));
        if start > 2 {
            buttons.push(PageButton::Gap);
        }
    }
    buttons.extend((start..=end).map(PageButton::Page));
    if end < total {
        if end < total - 1 {
            buttons.push(PageButton::Gap);
        }
        buttons.push(PageButton::Page(total));
    }
    buttons
}

/// Hidden when everything fits on one page
#[component]
pub fn Pagination(
    #[prop(into)] current: Signal<usize>,
    #[prop(into)] total_items: Signal<usize>,
    page_size: usize,
    #[prop(into)] on_change: Callback<usize>,
) -> impl IntoView {
    let pages = move || total_pages(total_items.get(), page_size);

    move || {
        let total = pages();
        if total <= 1 {
            return None;
        }
        let page = current.get();
        Some(view! {
            <div class="pagination">
                <button title="First Page" disabled={page == 1} on:click=move |_| on_change.run(1)>"«"</button>
                <button title="Previous Page" disabled={page == 1} on:click=move |_| on_change.run(page.saturating_sub(1).max(1))>"‹"</button>
                {page_numbers(page, total).into_iter().map(|button| match button {
                    PageButton::Page(n) => view! {
                        <button
                            class={if n == page { "page-btn active" } else { "page-btn" }}
                            on:click=move |_| on_change.run(n)
                        >
                            {n}
                        </button>
                    }.into_any(),
                    PageButton::Gap => view! { <span class="page-gap">"..."</span> }.into_any(),
                }).collect_view()}
                <button title="Next Page" disabled={page == total} on:click=move |_| on_change.run(page + 1)>"›"</button>
                <button title="Last Page" disabled={page == total} on:click=move |_| on_change.run(total)>"»"</button>
            </div>
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageButton::{Gap, Page};

    #[test]
    fn test_small_total_shows_all_pages() {
        assert_eq!(page_numbers(1, 3), vec![Page(1), Page(2), Page(3)]);
        assert!(page_numbers(1, 0).is_empty());
    }

    #[test]
    fn test_window_at_start() {
        assert_eq!(
            page_numbers(1, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Gap, Page(10)]
        );
    }

    #[test]
    fn test_window_in_middle() {
        assert_eq!(
            page_numbers(6, 12),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Page(7), Page(8), Gap, Page(12)]
        );
    }

    #[test]
    fn test_window_at_end_shifts_back() {
        assert_eq!(
            page_numbers(10, 10),
            vec![Page(1), Gap, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_no_gap_next_to_edges() {
        assert_eq!(
            page_numbers(4, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_total_pages_and_slice() {
        assert_eq!(total_pages(41, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(0, 20), 0);

        let items: Vec<u32> = (1..=45).collect();
        assert_eq!(page_slice(&items, 3, 20), vec![41, 42, 43, 44, 45]);
        assert_eq!(page_slice(&items, 1, 20).len(), 20);
    }
}
