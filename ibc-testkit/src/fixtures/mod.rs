pub mod chain;
pub mod client_state;
pub mod commitment;

use core::time::Duration;

use tendermint::Time;

/// Time of the block the test clients are created from.
pub fn genesis_time() -> Time {
    Time::from_unix_timestamp(1_700_000_000, 0).expect("Never fails")
}

/// `time + delta`, for tests that walk the clock forward.
pub fn after(time: Time, delta: Duration) -> Time {
    (time + delta).expect("Never fails")
}
