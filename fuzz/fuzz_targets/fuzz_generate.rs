#![no_main]

use af_core::{DiagramMode, EngineConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let mode = match selector % 3 {
        0 => DiagramMode::Auto,
        1 => DiagramMode::Flow,
        _ => DiagramMode::Hierarchy,
    };

    let diagram = af_diagram::build(text, mode, &EngineConfig::default());
    assert!(!diagram.nodes.is_empty());
    assert!(diagram.dangling_edges().is_empty());
    assert_eq!(diagram.node_ids().len(), diagram.nodes.len());

    let json = serde_json::to_string(&diagram).expect("diagram serializes");
    let _: serde_json::Value = serde_json::from_str(&json).expect("diagram json parses");
});
