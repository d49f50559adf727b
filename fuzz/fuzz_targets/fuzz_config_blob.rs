//! Fuzz target: postcard config blobs
//!
//! Feeds arbitrary bytes to `ConfigBlob::load` and checks:
//! - No panics under arbitrary byte inputs
//! - Anything accepted passes validation and re-encodes losslessly
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use porter::adapters::config_store::{ConfigBlob, encode_blob};
use porter::app::ports::ConfigPort;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = ConfigBlob::new(data).load() else {
        return;
    };
    assert!(config.validate().is_ok(), "accepted an invalid config");

    let bytes = encode_blob(&config).expect("valid config must encode");
    let again = ConfigBlob::new(&bytes).load().expect("re-encoded blob must load");
    assert_eq!(config, again);
});
