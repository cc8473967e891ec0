//! Error types for the stage catalog.

use super::Stage;

/// A stage was used where only interview stages make sense.
///
/// Only `Stage::Summary` can trigger this: it has no opening prompt, no
/// guidance and no answer slot. Reaching it is a programming error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Stage {0} is not an interview stage")]
pub struct InvalidStageError(pub Stage);
