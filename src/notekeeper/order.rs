//! # Ordering and Pagination
//!
//! Display order is derived from the full note set on every call; nothing is
//! cached between calls.
//!
//! 1. Pinned notes come before unpinned notes, whatever their timestamps.
//! 2. Inside each group, the most recently updated note comes first.
//! 3. Notes with equal `updated_at` keep their input order. The sort is
//!    stable, so sorting an already sorted list changes nothing.
//!
//! Pages are 1-based and fixed-size. Asking for a page that does not exist
//! (page 0, past the last page, or any page of an empty set) yields an empty
//! page rather than an error.

use crate::model::Note;
use std::cmp::Ordering;

/// One window of the sorted note set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub notes: Vec<Note>,
    pub page: usize,
    pub total_pages: usize,
    pub total_notes: usize,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

fn display_order(a: &Note, b: &Note) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
}

/// Returns the notes in display order.
pub fn sort_notes(notes: &[Note]) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    sorted.sort_by(display_order);
    sorted
}

/// `ceil(total / page_size)`; zero for an empty set or a zero page size.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Sorts `notes` and returns the requested 1-based page of `page_size` notes.
pub fn paginate(notes: &[Note], page: usize, page_size: usize) -> Page {
    let sorted = sort_notes(notes);
    let total_notes = sorted.len();
    let total_pages = total_pages(total_notes, page_size);

    let visible = if page == 0 || page > total_pages {
        Vec::new()
    } else {
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_notes);
        sorted[start..end].to_vec()
    };

    Page {
        notes: visible,
        page,
        total_pages,
        total_notes,
    }
}
