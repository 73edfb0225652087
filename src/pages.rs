//! Page navigation for the simulator window.
//!
//! Press `Y` to switch between the watch face and the debug page.

/// Pages the simulator can show.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// The watch face as the host would present it.
    #[default]
    Face,

    /// Render metrics, engine counters and the engine log.
    Debug,
}

impl Page {
    /// Switch to the other page.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Face => Self::Debug,
            Self::Debug => Self::Face,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        assert_eq!(Page::default(), Page::Face);
    }

    #[test]
    fn test_page_toggle_cycle() {
        assert_eq!(Page::Face.toggle(), Page::Debug);
        assert_eq!(Page::Face.toggle().toggle(), Page::Face);
    }
}
