//! Ordered work queue of chapters with remaining pages.

use std::collections::VecDeque;

use crate::models::Chapter;

/// A chapter still waiting for pages to be assigned.
#[derive(Clone, Debug)]
pub struct QueueEntry<'a> {
    pub chapter: &'a Chapter,
    /// Pages not yet assigned during this run.
    pub remaining: i32,
}

/// Pages carved off the front of the queue for a single day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation<'a> {
    pub chapter: &'a Chapter,
    pub pages: i32,
    /// Inclusive page range within the chapter.
    pub start_page: i32,
    pub end_page: i32,
    /// Whether this allocation used up the chapter.
    pub exhausted: bool,
}

/// Chapters in priority order, consumed strictly front to back.
///
/// Invariant: every entry has `remaining > 0`.
#[derive(Clone, Debug, Default)]
pub struct ChapterQueue<'a> {
    entries: VecDeque<QueueEntry<'a>>,
}

impl<'a> ChapterQueue<'a> {
    /// Build the queue from chapters sorted by `order_index`, skipping finished ones.
    ///
    /// The sort is stable, so chapters sharing an order key keep their input order.
    pub fn new(chapters: &'a [Chapter]) -> Self {
        let mut sorted: Vec<&Chapter> = chapters.iter().collect();
        sorted.sort_by_key(|c| c.order_index);

        let entries = sorted
            .into_iter()
            .filter_map(|chapter| {
                let remaining = chapter.remaining_pages();
                (remaining > 0).then_some(QueueEntry { chapter, remaining })
            })
            .collect();

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn front(&self) -> Option<&QueueEntry<'a>> {
        self.entries.front()
    }

    /// Total pages still unassigned across all queued chapters.
    pub fn total_remaining(&self) -> i64 {
        self.entries.iter().map(|e| e.remaining as i64).sum()
    }

    /// Assign up to `capacity` pages of the front chapter.
    ///
    /// The page range continues from where earlier allocations in this run
    /// left off. The front entry is popped once its remaining pages reach zero.
    pub fn take(&mut self, capacity: i32) -> Option<Allocation<'a>> {
        if capacity <= 0 {
            return None;
        }
        let entry = self.entries.front_mut()?;
        let chapter = entry.chapter;
        let pages = capacity.min(entry.remaining);

        let studied = chapter.effective_pages_studied();
        let assigned_this_run = chapter.total_pages - studied - entry.remaining;
        let start_page = studied + assigned_this_run + 1;
        let end_page = start_page + pages - 1;

        entry.remaining -= pages;
        let exhausted = entry.remaining <= 0;
        if exhausted {
            self.entries.pop_front();
        }

        Some(Allocation {
            chapter,
            pages,
            start_page,
            end_page,
            exhausted,
        })
    }
}
