use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("sprite animation '{id}' has {count} frames (max = {limit})")]
    SizeLimitExceeded {
        id: String,
        count: usize,
        limit: usize,
    },

    #[error("sprite animation '{id}': loop index {value} is out of range (max = 255)")]
    LoopIndexOutOfRange { id: String, value: u16 },
}
