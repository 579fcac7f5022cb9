use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required drive total was not given.
    #[error("{0} required")]
    MissingInput(&'static str),

    #[error("{what} must be a whole number of at least zero, got {value:?}")]
    InvalidNumber { what: &'static str, value: String },

    /// Drive totals that cannot describe a block grid, or sector arithmetic
    /// that left the 64-bit range.
    #[error(transparent)]
    Geometry(#[from] blockmap::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
