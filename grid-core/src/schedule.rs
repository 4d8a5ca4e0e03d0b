/// Coalesces redraw requests into at most one pending frame.
///
/// Callers schedule an animation frame only when [`RedrawGate::request`]
/// returns true; the frame callback calls [`RedrawGate::take`] and draws
/// whatever configuration is current at that moment.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedrawGate {
    pending: bool,
}

impl RedrawGate {
    pub fn request(&mut self) -> bool {
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    pub fn take(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_collapse_into_one_frame() {
        let mut g = RedrawGate::default();
        let scheduled = (0..10).filter(|_| g.request()).count();
        assert_eq!(scheduled, 1);
        assert!(g.take());
        assert!(!g.take());
        assert!(g.request());
    }
}
