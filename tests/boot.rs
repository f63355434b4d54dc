use serde_json::json;
use std::process::Command;
use tradewinds_testkit::{nassau_descriptor, PortFixture};

fn tradewinds() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tradewinds"))
}

#[test]
fn boots_configured_port() {
    let fixture = PortFixture::with_basic_table("boot").unwrap();
    fixture
        .write_descriptor(2, &nassau_descriptor(json!([{ "name": "Jack" }]), json!([])))
        .unwrap();
    fixture.write_filled_grid(2, 1).unwrap();

    let output = tradewinds()
        .args(["--config", "does/not/exist.toml", "--port", "2", "--assets"])
        .arg(fixture.root())
        .output()
        .expect("binary runs");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Nassau (Caribbean) - PIRATE"), "{stdout}");
    assert!(stdout.contains("price index 100.00"), "{stdout}");
    assert!(stdout.contains("96x64 tiles, 1 npcs, 0 buildings, 1 distinct tiles"), "{stdout}");
}

#[test]
fn missing_collision_table_fails_cleanly() {
    let fixture = PortFixture::new("boot_missing").unwrap();
    let output = tradewinds()
        .args(["--config", "does/not/exist.toml", "--assets"])
        .arg(fixture.root())
        .output()
        .expect("binary runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("portTileCollision"), "{stderr}");
}
