pub type Result<T> = core::result::Result<T, Error>;

/// All errors `cpfgen` can produce.
///
/// Every variant is a construction-time contract violation. Once an
/// enumerator or a format has been built, generation itself is infallible.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A [`RegionSet`](crate::RegionSet) was built from an empty digit list.
    #[error("region set must contain at least one digit")]
    EmptyRegionSet,

    /// A region digit outside `0..=9` was supplied.
    #[error("invalid region digit: {0}")]
    InvalidRegionDigit(u8),

    /// An output format code other than 1, 2 or 3 was supplied.
    #[error("unsupported output format code: {0} (expected 1, 2 or 3)")]
    InvalidFormat(u8),

    /// More unique samples were requested than distinct base sequences exist
    /// for the configured region set. The sampling loop could never
    /// terminate, so the request is rejected up front.
    #[error("sample count {requested} exceeds the {available} distinct base sequences available")]
    SampleSpaceExceeded { requested: u64, available: u64 },
}
