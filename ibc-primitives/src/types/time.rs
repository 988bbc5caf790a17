use core::time::Duration;

use ibc_proto::google::protobuf::Timestamp as RawTimestamp;
use tendermint::Time;
use tendermint_proto::google::protobuf as tpb;

/// Time elapsed from `earlier` to `later`, saturating at zero when `later`
/// is not after `earlier`.
pub fn elapsed_since(later: Time, earlier: Time) -> Duration {
    later.duration_since(earlier).unwrap_or_default()
}

/// Nanoseconds since the unix epoch, saturating at zero for pre-epoch
/// times.
pub fn unix_nanos(time: Time) -> u64 {
    u64::try_from(time.unix_timestamp_nanos()).unwrap_or_default()
}

/// Inverse of [`unix_nanos`].
pub fn time_from_unix_nanos(nanos: u64) -> Result<Time, tendermint::Error> {
    const NANOS_PER_SECOND: u64 = 1_000_000_000;
    // `u64::MAX` nanoseconds is about 1.8e10 seconds, well within `i64`.
    let seconds = (nanos / NANOS_PER_SECOND) as i64;
    let subsec_nanos = (nanos % NANOS_PER_SECOND) as u32;
    Time::from_unix_timestamp(seconds, subsec_nanos)
}

/// Converts a `Time` into the `ibc-proto` timestamp message.
pub fn time_to_proto(time: Time) -> RawTimestamp {
    // The two google timestamp types are distinct structs with the same
    // fields.
    let tpb::Timestamp { seconds, nanos } = time.into();
    RawTimestamp { seconds, nanos }
}

/// Converts an `ibc-proto` timestamp message into a `Time`.
pub fn time_from_proto(raw: RawTimestamp) -> Result<Time, tendermint::Error> {
    let RawTimestamp { seconds, nanos } = raw;
    Time::try_from(tpb::Timestamp { seconds, nanos })
}
