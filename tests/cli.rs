use image::{ImageBuffer, Rgb};
use std::error::Error;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn lsb_vault_command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lsb_vault"));
    command
        .env_remove("LSB_VAULT_PASSPHRASE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    command
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(lsb_vault_command().args(args).output()?)
}

#[test]
fn cli_end_to_end_flow() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    let hidden = dir.path().join("hidden.png");

    ImageBuffer::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 128])).save(&cover)?;

    let hide = run(&[
        "hide",
        "--image",
        cover.to_str().unwrap(),
        "--message",
        "meet at noon",
        "--passphrase",
        "abc",
        "--dest",
        hidden.to_str().unwrap(),
    ])?;
    assert!(
        hide.status.success(),
        "hide command failed: {}",
        String::from_utf8_lossy(&hide.stderr)
    );
    assert!(hidden.exists(), "hidden image should exist after hide");

    let recover = run(&[
        "recover",
        "--image",
        hidden.to_str().unwrap(),
        "--passphrase",
        "abc",
        "--stdout",
    ])?;
    assert!(
        recover.status.success(),
        "recover command failed: {}",
        String::from_utf8_lossy(&recover.stderr)
    );
    assert_eq!(String::from_utf8(recover.stdout)?.trim_end(), "meet at noon");

    let wrong = run(&[
        "recover",
        "--image",
        hidden.to_str().unwrap(),
        "--passphrase",
        "xyz",
        "--stdout",
    ])?;
    assert!(!wrong.status.success(), "wrong passphrase must fail");
    assert!(String::from_utf8_lossy(&wrong.stderr).contains("Incorrect passphrase"));

    Ok(())
}

#[test]
fn cli_reads_passphrase_from_environment() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.bmp");
    let text = dir.path().join("secret.txt");

    ImageBuffer::from_pixel(12, 12, Rgb([10u8, 20, 30])).save(&cover)?;
    fs::write(&text, "from a file")?;

    let hide = lsb_vault_command()
        .env("LSB_VAULT_PASSPHRASE", "env-pass")
        .args(["hide", "-i", cover.to_str().unwrap(), "-t", text.to_str().unwrap()])
        .output()?;
    assert!(
        hide.status.success(),
        "hide command failed: {}",
        String::from_utf8_lossy(&hide.stderr)
    );

    let hidden = dir.path().join("doctored_cover.bmp");
    assert!(hidden.exists(), "default destination should be used");

    let recover = lsb_vault_command()
        .env("LSB_VAULT_PASSPHRASE", "env-pass")
        .args(["recover", "-i", hidden.to_str().unwrap()])
        .output()?;
    assert!(
        recover.status.success(),
        "recover command failed: {}",
        String::from_utf8_lossy(&recover.stderr)
    );

    let recovered = fs::read_to_string(dir.path().join("recovered_doctored_cover.txt"))?;
    assert_eq!(recovered, "from a file");

    Ok(())
}

#[test]
fn cli_capacity_reports_bits() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    ImageBuffer::from_pixel(8, 8, Rgb([0u8, 0, 0])).save(&cover)?;

    let capacity = run(&["capacity", "-i", cover.to_str().unwrap(), "-p", "abc"])?;
    assert!(capacity.status.success());

    let stdout = String::from_utf8(capacity.stdout)?;
    assert!(
        stdout.contains("Capacity: 192 bits"),
        "8x8 image should report 192 bits: {stdout}"
    );
    // 24 字节 - "abc" - 分隔符 - 结束字节 = 19
    assert!(
        stdout
            .lines()
            .any(|line| line == "Longest message with this passphrase: 19 characters"),
        "longest message should be reported: {stdout}"
    );

    Ok(())
}
