//! Fuzz target: JSON decoding and validation of the create-user body.
//!
//! Arbitrary bytes must never panic the decoder or the validator; a payload
//! that validates must echo its fields unchanged.

#![no_main]

use backend_core::{Clock, SystemClock};
use backend_gateway::extract::decode_json_user;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = decode_json_user(data) else {
        return;
    };
    let expected = payload.clone();
    if let Ok(created) = payload.into_user(SystemClock.now()) {
        assert_eq!(Some(created.user.name), expected.name);
        assert_eq!(Some(created.user.email), expected.email);
    }
});
