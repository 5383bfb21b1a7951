use std::fs;

use assert_cmd::Command;

/// Legacy pcap capture holding one Ethernet/IPv4 frame, 10.0.0.1 -> 10.0.0.2
fn one_packet_capture() -> Vec<u8> {
    let mut frame = vec![
        0x74, 0xa6, 0xcd, 0xb1, 0xf9, 0x8b, // destination MAC
        0xc2, 0x17, 0x54, 0x77, 0x7a, 0x64, // source MAC
        0x08, 0x00, // EtherType: IPv4
        0x45, 0x00, 0x00, 0x14, // version/IHL, DSCP/ECN, total length 20
        0x00, 0x00, 0x40, 0x00, // id, flags/fragment offset
        0x40, 0x06, 0x00, 0x00, // TTL, protocol, checksum
    ];
    frame.extend_from_slice(&[10, 0, 0, 1]);
    frame.extend_from_slice(&[10, 0, 0, 2]);

    let mut buf = Vec::new();
    buf.extend_from_slice(&0xa1b2_c3d4u32.to_le_bytes());
    buf.extend_from_slice(&2u16.to_le_bytes());
    buf.extend_from_slice(&4u16.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&65535u32.to_le_bytes());
    buf.extend_from_slice(&1u32.to_le_bytes()); // LINKTYPE_ETHERNET
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&(frame.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(frame.len() as u32).to_le_bytes());
    buf.extend_from_slice(&frame);
    buf
}

#[test]
fn missing_arguments_is_a_usage_error() {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.assert().failure();

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg("input.pcap").assert().failure();
}

#[test]
fn writes_edge_list_and_svg() {
    let mut input_path = std::env::temp_dir();
    input_path.push("pcap_graph_cli_test.pcap");
    fs::write(&input_path, one_packet_capture()).unwrap();

    let mut basename = std::env::temp_dir();
    basename.push("pcap_graph_cli_test_out");
    let basename_s = basename.to_str().unwrap().to_string();

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg(&input_path).arg(&basename_s).assert().success();

    let edge_list = fs::read_to_string(format!("{basename_s}.txt")).unwrap();
    assert_eq!(edge_list, "10.0.0.1 10.0.0.2\n");

    let svg = fs::read_to_string(format!("{basename_s}.svg")).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("10.0.0.1"));
    assert!(svg.contains("10.0.0.2"));

    fs::remove_file(&input_path).unwrap();
    fs::remove_file(format!("{basename_s}.txt")).unwrap();
    fs::remove_file(format!("{basename_s}.svg")).unwrap();
}

#[test]
fn unreadable_input_fails() {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg("/nonexistent/capture.pcap")
        .arg("out")
        .assert()
        .failure();
}
