use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("talent {node} references unknown prerequisite {prereq}")]
    DanglingPrereq { node: String, prereq: String },

    #[error("prerequisite cycle involving talent {0}")]
    PrereqCycle(String),

    #[error("talent tree {0} has a zero tier gate or tier count")]
    InvalidTierConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
