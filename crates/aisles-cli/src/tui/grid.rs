//! Card grid geometry: how many columns fit, and which row is scrolled to
//! the top.

/// Height of one card, borders included. Description and specialties get
/// two wrapped lines each.
pub(crate) const CARD_HEIGHT: u16 = 11;
/// Narrowest a card column may get before the grid drops a column. The
/// address, phone and hours rows fit on one line at this width.
pub(crate) const CARD_MIN_WIDTH: u16 = 52;
const MAX_COLUMNS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GridShape {
    pub columns: usize,
    /// Card rows that fit in the viewport, at least one.
    pub visible_rows: usize,
    pub total_rows: usize,
}

impl GridShape {
    pub(crate) fn new(width: u16, height: u16, cards: usize) -> Self {
        let columns = usize::from((width / CARD_MIN_WIDTH).clamp(1, MAX_COLUMNS));
        let visible_rows = usize::from((height / CARD_HEIGHT).max(1));
        Self {
            columns,
            visible_rows,
            total_rows: cards.div_ceil(columns),
        }
    }

    pub(crate) fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    fn max_first_row(&self) -> usize {
        self.total_rows.saturating_sub(self.visible_rows)
    }

    /// First row that puts card `index` in the vertical middle.
    pub(crate) fn centre_on(&self, index: usize) -> usize {
        let row = self.row_of(index);
        row.saturating_sub((self.visible_rows - 1) / 2)
            .min(self.max_first_row())
    }

    /// Smallest change to `first_row` that keeps card `index` visible.
    pub(crate) fn follow(&self, first_row: usize, index: usize) -> usize {
        let row = self.row_of(index);
        let first = if row < first_row {
            row
        } else if row >= first_row + self.visible_rows {
            row + 1 - self.visible_rows
        } else {
            first_row
        };
        first.min(self.max_first_row())
    }
}
