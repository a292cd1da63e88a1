use crate::models::PaginationResult;
use crate::services::interleaving::{InterleavingError, InterleavingResult, Result};

/// Slice one page out of an interleaved sequence.
///
/// `page` is 1-based and clamped into `[1, max(1, total_pages)]`; the
/// clamped value is returned as `current_page`. A zero `per_page` is
/// rejected.
pub fn paginate(result: &InterleavingResult, page: usize, per_page: usize) -> Result<PaginationResult> {
    if per_page == 0 {
        return Err(InterleavingError::InvalidPageSize(per_page));
    }

    let total_items = result.len();
    let total_pages = total_items.div_ceil(per_page);
    let current_page = page.clamp(1, total_pages.max(1));

    let start = ((current_page - 1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);

    Ok(PaginationResult {
        items: result.sequence()[start..end].to_vec(),
        source_tags: result.attribution()[start..end].to_vec(),
        total_pages,
        current_page,
        per_page,
        total_items,
    })
}
