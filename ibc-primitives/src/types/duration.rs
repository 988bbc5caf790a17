use core::time::Duration;

use ibc_proto::google::protobuf::Duration as RawDuration;

/// Zero duration, the lower bound every configured period must exceed.
pub const ZERO_DURATION: Duration = Duration::from_secs(0);

/// Converts a `core::time::Duration` into its protobuf form, or `None` when
/// the seconds do not fit an `i64`.
pub fn duration_to_proto(d: Duration) -> Option<RawDuration> {
    let seconds = i64::try_from(d.as_secs()).ok()?;
    let nanos = i32::try_from(d.subsec_nanos()).ok()?;
    Some(RawDuration { seconds, nanos })
}

/// Converts a protobuf duration back, rejecting negative components.
pub fn duration_from_proto(d: RawDuration) -> Option<Duration> {
    let seconds = u64::try_from(d.seconds).ok()?;
    let nanos = u32::try_from(d.nanos).ok()?;
    if nanos >= 1_000_000_000 {
        return None;
    }
    Some(Duration::new(seconds, nanos))
}
