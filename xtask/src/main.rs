//! Build automation tasks for EduTech Academy
//!
//! Usage:
//!   cargo xtask build-web [--dev]   # Build WASM into dist/web
//!   cargo xtask package-web         # Zip dist/web for static hosting

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const BINARY: &str = "edutech-academy";
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for EduTech Academy")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM for web deployment
    BuildWeb {
        /// Debug build with a DEV marker in the page title
        #[arg(long)]
        dev: bool,
    },
    /// Build the web release and zip it
    PackageWeb,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::PackageWeb => package_web(),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Download a file from URL to destination
fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(Command::new("curl").args(["-L", "-o"]).arg(dest).arg(url))
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Build WASM for web deployment
fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");
    let profile = if dev { "debug" } else { "release" };

    println!("Building WASM ({})...", profile);
    let mut cargo = Command::new("cargo");
    cargo
        .current_dir(&root)
        .args(["build", "--target", "wasm32-unknown-unknown"]);
    if !dev {
        cargo.arg("--release");
    }
    run_cmd(&mut cargo)?;

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    let wasm = format!("{}.wasm", BINARY);
    std::fs::copy(
        root.join("target/wasm32-unknown-unknown").join(profile).join(&wasm),
        dist.join(&wasm),
    )
    .context("copying wasm binary")?;

    std::fs::copy(root.join("web/index.html"), dist.join("index.html")).context("copying index.html")?;

    let mq_js = dist.join("mq_js_bundle.js");
    if !mq_js.exists() {
        download_file(MQ_JS_BUNDLE, &mq_js)?;
    }

    copy_dir_recursive(&root.join("assets"), &dist.join("assets"))?;

    if dev {
        let index_path = dist.join("index.html");
        let index = std::fs::read_to_string(&index_path)?;
        let index = index.replace("<title>EduTech Academy", "<title>[DEV] EduTech Academy");
        std::fs::write(&index_path, index)?;
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

/// Zip the release web build
fn package_web() -> Result<()> {
    build_web(false)?;

    let dist = project_root()?.join("dist");
    let zip_name = format!("{}-web.zip", BINARY);
    let zip_path = dist.join(&zip_name);

    if zip_path.exists() {
        std::fs::remove_file(&zip_path)?;
    }

    println!("Creating {}...", zip_name);
    run_cmd(
        Command::new("zip")
            .current_dir(dist.join("web"))
            .args(["-r", &format!("../{}", zip_name), "."]),
    )?;

    println!("Web package ready: dist/{}", zip_name);
    Ok(())
}
