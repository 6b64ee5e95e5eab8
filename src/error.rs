use thiserror::Error;

/// Failures surfaced by shape decoding, handle access and motion correction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollisionError {
    #[error("unsupported shape kind id: {0}")]
    UnsupportedShape(u8),

    #[error("handle refers to a record that has already been removed")]
    StaleHandle,

    #[error("handle was issued by a different collision world")]
    ForeignHandle,

    #[error("motion correction exceeded {limit} march steps against a single record")]
    MarchLimit { limit: u32 },
}
