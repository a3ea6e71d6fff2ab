#![allow(missing_docs)]

use core::fmt::Write;

use json5extract::{Recovery, ScanOptions, Value, scan_str, scan_str_with, to_json5_array};

fn render(values: &[Value]) -> String {
    let mut out = String::new();
    for value in values {
        writeln!(out, "{} {}", value.kind(), value.raw_text()).unwrap();
    }
    out
}

#[test]
fn snapshot_config_fragment() {
    let text = r#"
# deploy.conf
server = { host: 'api.local', port: 0x1F90, tls: true, }
weights = [0.5, .25, -Infinity, NaN] // tuned
name = "edge\x31"
"#;
    let values = scan_str(text).unwrap();

    insta::assert_snapshot!(render(&values), @r#"
    object {host:'api.local',port:0x1F90,tls:true}
    array [0.5,.25,-Infinity,NaN]
    string "edge\x31"
    "#);
    insta::assert_snapshot!(
        to_json5_array(&values),
        @r#"[{host:'api.local',port:0x1F90,tls:true},[0.5,.25,-Infinity,NaN],"edge\x31"]"#
    );
    assert_eq!(values[2].as_str(), Ok("edge1"));
}

#[test]
fn snapshot_recovery_modes() {
    let text = "[1,,2] {a:1 b:2} 'x";
    let forward = scan_str(text).unwrap();
    let rewind = scan_str_with(
        text,
        ScanOptions {
            recovery: Recovery::Rewind,
            ..ScanOptions::default()
        },
    )
    .unwrap();

    insta::assert_snapshot!(to_json5_array(&forward), @"[2,2]");
    insta::assert_snapshot!(to_json5_array(&rewind), @"[1,2,1,2]");
}

#[test]
fn snapshot_mixed_prose() {
    let text = "Set `limit` to 10 (or {\"limit\": 20}) -- see [docs, 'v2'].";
    insta::assert_snapshot!(render(&scan_str(text).unwrap()), @r#"
    integer 10
    object {"limit":20}
    string 'v2'
    "#);
}
