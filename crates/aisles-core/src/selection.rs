use crate::catalog::StoreId;

/// Which store, if any, is expanded in the grid and highlighted on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(StoreId),
}

impl Selection {
    /// Activating the selected store clears the selection; activating any
    /// other store selects it.
    #[must_use]
    pub fn toggle(self, id: StoreId) -> Selection {
        match self {
            Selection::Selected(current) if current == id => Selection::None,
            _ => Selection::Selected(id),
        }
    }

    #[must_use]
    pub fn id(self) -> Option<StoreId> {
        match self {
            Selection::None => None,
            Selection::Selected(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is(self, id: StoreId) -> bool {
        self.id() == Some(id)
    }
}
