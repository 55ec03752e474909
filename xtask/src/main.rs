// ReplyPilot - Build Task Runner
// Usage: cargo xtask <build|test|check|run>

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use xshell::{cmd, Shell};

const PACKAGE: &str = "replypilot";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let sh = Shell::new()?;
    sh.change_dir(workspace_root()?);

    let flag = |name: &str| args.iter().any(|a| a == name);
    match args.first().map(String::as_str) {
        Some("build") => build(&sh, flag("--release")),
        Some("test") => {
            cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;
            println!("✅ All tests passed!");
            Ok(())
        }
        Some("check") => check(&sh),
        Some("run") => {
            let passthrough = args[1..].iter().skip_while(|a| a.as_str() == "--");
            cmd!(sh, "cargo run -p {PACKAGE} -- {passthrough...}")
                .run()
                .context("Failed to run ReplyPilot")?;
            Ok(())
        }
        _ => {
            println!("Usage: cargo xtask <COMMAND>");
            println!();
            println!("  build [--release]   Build the backend (release also stages build/dist)");
            println!("  test                Run all workspace tests");
            println!("  check               rustfmt --check + clippy (warnings denied)");
            println!("  run [-- ARGS...]    Run the backend, e.g. run -- --config conf/config.toml");
            Ok(())
        }
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    if !release {
        cmd!(sh, "cargo build -p {PACKAGE}").run().context("Failed to build backend")?;
        return Ok(());
    }

    cmd!(sh, "cargo build --release -p {PACKAGE}")
        .run()
        .context("Failed to build backend in release mode")?;

    // build/dist/{bin,conf,logs}
    let dist = sh.current_dir().join("build/dist");
    for dir in ["bin", "conf", "logs"] {
        sh.create_dir(dist.join(dir))?;
    }
    sh.copy_file(format!("target/release/{PACKAGE}"), dist.join("bin"))
        .context("Failed to stage binary")?;
    sh.copy_file("conf/config.toml", dist.join("conf"))
        .context("Failed to stage default config")?;

    println!("✅ Release build staged in {}", dist.display());
    Ok(())
}

fn check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .context("Code is not formatted, run `cargo fmt --all`")?;
    cmd!(sh, "cargo clippy --workspace --all-targets -- --deny warnings")
        .run()
        .context("Clippy checks failed")?;
    println!("✅ fmt and clippy clean");
    Ok(())
}

fn workspace_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the workspace root")
}
