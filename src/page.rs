//! Pagination over IMAP sequence numbers.
//!
//! IMAP exposes messages ordered oldest-first by a dense 1-based sequence
//! number from 1 to the mailbox count. A "page" in this library is
//! newest-first, so page 1 covers the highest sequence numbers. This module
//! only computes the window; fetching and newest-first presentation are the
//! caller's job.

/// Closed interval of sequence numbers covering one page.
///
/// Invariant: `1 <= oldest <= newest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqWindow {
    /// Lowest sequence number in the page (oldest message).
    pub oldest: u32,
    /// Highest sequence number in the page (newest message).
    pub newest: u32,
}

impl SeqWindow {
    /// Render the window as an IMAP sequence set, e.g. `"16:25"`.
    pub fn fetch_set(&self) -> String {
        format!("{}:{}", self.oldest, self.newest)
    }

    /// Number of sequence numbers covered. Never zero.
    pub fn len(&self) -> u32 {
        self.newest - self.oldest + 1
    }
}

/// Map a `(page, page_size)` request onto a sequence-number window.
///
/// Returns `None` when the mailbox is empty or the page lies entirely
/// beyond the available messages — an empty page, not an error. Zero
/// `page`/`page_size` are out of contract and clamp to 1.
pub fn seq_window(total_count: u32, page: u32, page_size: u32) -> Option<SeqWindow> {
    let page = page.max(1);
    let page_size = page_size.max(1);

    if total_count == 0 {
        return None;
    }

    let offset = (page as u64 - 1) * page_size as u64;
    if offset >= total_count as u64 {
        return None;
    }

    let newest = total_count - offset as u32;
    let oldest = if newest > page_size {
        newest - page_size + 1
    } else {
        1
    };

    Some(SeqWindow { oldest, newest })
}
