#![no_main]

use af_core::EngineConfig;
use af_diagram::api::{CHAT_PATH, GENERATE_PATH, handle_request};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = EngineConfig::default();
    for path in [GENERATE_PATH, CHAT_PATH] {
        let response = handle_request("POST", path, data, &config);
        assert!(matches!(response.status, 200 | 400));
        let _: serde_json::Value =
            serde_json::from_str(&response.body).expect("responses are json");
    }
});
