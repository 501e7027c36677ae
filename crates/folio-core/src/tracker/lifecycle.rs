use crate::error::TrackerError;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared "still mounted" flag. Deferred callbacks hold a clone and check it
/// before touching tracker state.
#[derive(Clone, Debug)]
pub struct MountToken {
    mounted: Arc<AtomicBool>,
}

impl Default for MountToken {
    fn default() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl MountToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn check_mounted(&self, stage: &'static str) -> Result<(), TrackerError> {
        if !self.is_mounted() {
            return Err(TrackerError::Unmounted(stage));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_unmount() {
        let token = MountToken::new();
        let deferred = token.clone();
        assert!(deferred.is_mounted());

        token.unmount();
        assert!(!deferred.is_mounted());
        assert_eq!(
            deferred.check_mounted("frame"),
            Err(TrackerError::Unmounted("frame"))
        );
    }
}
