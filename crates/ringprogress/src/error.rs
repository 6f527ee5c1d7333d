use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RingError {
    #[error("ring index {index} out of range for {ring_count} rings")]
    IndexOutOfRange { index: usize, ring_count: usize },
    #[error("unknown paint role '{0}'")]
    UnknownRole(String),
    #[error("invalid color '{0}', expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

impl RingError {
    /// Fails with `IndexOutOfRange` unless `index < ring_count`.
    pub fn check_index(index: usize, ring_count: usize) -> Result<(), Self> {
        if index < ring_count {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, ring_count })
        }
    }
}
