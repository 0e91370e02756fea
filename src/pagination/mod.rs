//! Pagination module
//!
//! Cursor pagination over the `{ data, next_token, prev_token }` envelope.
//!
//! # Overview
//!
//! The server is the only authority on cursor validity. A [`Pager`] never
//! computes offsets or totals; it remembers the two opaque tokens needed to
//! request the adjacent pages and updates them after each successful fetch.

mod pager;
mod types;

pub use pager::{fetch_all_pages, Pager, DEFAULT_PAGE_LIMIT};
pub use types::{append_query, PageOptions, Paginated, PagerState};
