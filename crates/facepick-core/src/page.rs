//! Page arithmetic shared by the API layer and the client pager.

/// Number of records per page when the caller does not say otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A 1-based page request, always normalised (`page >= 1`, `limit >= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page:  u32,
  pub limit: u32,
}

impl Default for PageRequest {
  fn default() -> Self { Self { page: 1, limit: DEFAULT_PAGE_SIZE } }
}

impl PageRequest {
  /// Build from raw query-string values. Missing, zero and unparsable values
  /// fall back to the defaults, so `?page=abc&limit=0` reads as page 1 of
  /// 100.
  pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
    fn positive(raw: Option<&str>) -> Option<u32> {
      raw
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
    }

    let defaults = Self::default();
    Self {
      page:  positive(page).unwrap_or(defaults.page),
      limit: positive(limit).unwrap_or(defaults.limit),
    }
  }

  /// The `LIMIT`/`OFFSET` pair this page selects.
  pub fn window(self) -> PageWindow {
    PageWindow {
      limit:  u64::from(self.limit),
      offset: u64::from(self.page.saturating_sub(1)) * u64::from(self.limit),
    }
  }
}

/// A `LIMIT ... OFFSET ...` window over the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
  pub limit:  u64,
  pub offset: u64,
}

/// `ceil(total / page_size)`; zero records means zero pages.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
  if page_size == 0 {
    return 0;
  }
  let pages = total.div_ceil(u64::from(page_size));
  u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_to_missing_zero_and_garbage() {
    assert_eq!(PageRequest::from_query(None, None), PageRequest::default());
    assert_eq!(
      PageRequest::from_query(Some("0"), Some("0")),
      PageRequest { page: 1, limit: 100 }
    );
    assert_eq!(
      PageRequest::from_query(Some("abc"), Some("-5")),
      PageRequest { page: 1, limit: 100 }
    );
    assert_eq!(
      PageRequest::from_query(Some("3"), Some("25")),
      PageRequest { page: 3, limit: 25 }
    );
  }

  #[test]
  fn windows_are_contiguous_and_non_overlapping() {
    let limit = 100;
    let mut expected_offset = 0;
    for page in 1..=5 {
      let w = PageRequest { page, limit }.window();
      assert_eq!(w.limit, 100);
      assert_eq!(w.offset, expected_offset);
      expected_offset += w.limit;
    }
  }

  #[test]
  fn offset_does_not_overflow_u32() {
    let w = PageRequest { page: u32::MAX, limit: u32::MAX }.window();
    assert_eq!(w.offset, u64::from(u32::MAX - 1) * u64::from(u32::MAX));
  }

  #[test]
  fn total_pages_rounds_up() {
    assert_eq!(total_pages(250, 100), 3);
    assert_eq!(total_pages(200, 100), 2);
    assert_eq!(total_pages(1, 100), 1);
    assert_eq!(total_pages(0, 100), 0);
    assert_eq!(total_pages(20_000, 100), 200);
  }
}
