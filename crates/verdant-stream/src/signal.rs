/// Single-slot "something changed" event.
///
/// Raising while already raised is a no-op, so any number of updates between
/// two acknowledgements collapse into one notification. There is no history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateSignal {
    pending: bool,
}

impl UpdateSignal {
    #[inline]
    pub const fn new() -> Self {
        Self { pending: false }
    }

    #[inline]
    pub fn raise(&mut self) {
        self.pending = true;
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.pending
    }

    /// Clears the slot; returns whether it was raised.
    #[inline]
    pub fn acknowledge(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_raises_collapse_into_one_notification() {
        let mut s = UpdateSignal::new();
        assert!(!s.is_raised());
        s.raise();
        s.raise();
        s.raise();
        assert!(s.is_raised());
        assert!(s.acknowledge());
        assert!(!s.is_raised());
        assert!(!s.acknowledge());
    }
}
