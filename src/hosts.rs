//! Hosts file rewriting.
//!
//! A hosts file managed by dnshole has two parts: whatever the user wrote,
//! and below a marker line the generated block list:
//!
//! ```text
//! 127.0.0.1 localhost
//!
//! # ==== dnshole ==== Do not edit this line or following lines.
//! # They are automatically generated by dnshole.
//! # Generated Monday 2020-05-04 13:22:01 MST
//!
//! 0.0.0.0 ads.example
//! ```
//!
//! Each run copies the user part verbatim and regenerates the rest.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::debug;

use crate::utils::same_file;

/// Start of the line separating user content from generated content
pub const MARKER_PREFIX: &str = "# ==== dnshole ====";

/// Address blocked names resolve to
pub const NULL_ADDRESS: &str = "0.0.0.0";

const HEADER_LINES: [&str; 2] = [
    "# ==== dnshole ==== Do not edit this line or following lines.",
    "# They are automatically generated by dnshole.",
];

/// Where the rewritten hosts file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Path(PathBuf),
}

impl OutputTarget {
    /// `-` means standard output; no argument means the hosts file itself.
    pub fn from_arg(arg: Option<&str>, hosts_path: &Path) -> Self {
        match arg {
            Some("-") => OutputTarget::Stdout,
            Some(path) => OutputTarget::Path(PathBuf::from(path)),
            None => OutputTarget::Path(hosts_path.to_path_buf()),
        }
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("<stdout>"),
            OutputTarget::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

pub fn is_marker_line(line: &str) -> bool {
    line.starts_with(MARKER_PREFIX)
}

/// Timestamp for the `# Generated` line, e.g. `Monday 2020-05-04 13:22:01 MST`.
pub fn generated_stamp(now: &DateTime<Local>) -> String {
    format!(
        "{} {}",
        now.format("%A %Y-%m-%d %H:%M:%S"),
        zone_abbreviation(now)
    )
}

// chrono only knows numeric offsets for the local zone; the C library has the name.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "macos", target_os = "freebsd"))]
fn zone_abbreviation(now: &DateTime<Local>) -> String {
    use std::ffi::CStr;

    // POSIX; the libc crate only binds it for Windows
    extern "C" {
        fn tzset();
    }

    let secs = now.timestamp() as libc::time_t;
    // SAFETY: tm is plain data; localtime_r only writes into it. tm_zone, when
    // set, points at static storage owned by the C library.
    unsafe {
        let mut tm: libc::tm = std::mem::zeroed();
        tzset();
        if !libc::localtime_r(&secs, &mut tm).is_null() && !tm.tm_zone.is_null() {
            return CStr::from_ptr(tm.tm_zone).to_string_lossy().into_owned();
        }
    }
    now.format("%Z").to_string()
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos", target_os = "freebsd")))]
fn zone_abbreviation(now: &DateTime<Local>) -> String {
    now.format("%Z").to_string()
}

/// Copy `input` up to its marker line into `out`, then append the generated
/// section listing `domains`.
///
/// Lines before the marker are copied byte for byte. One blank line is
/// inserted before the marker unless the copied part already ends with one.
pub fn write_hosts<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    domains: &[String],
    stamp: &str,
) -> io::Result<()> {
    let mut line = Vec::new();
    let mut last_blank = true;
    let mut needs_newline = false;

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.starts_with(MARKER_PREFIX.as_bytes()) {
            break;
        }
        out.write_all(&line)?;
        last_blank = line.iter().all(u8::is_ascii_whitespace);
        needs_newline = !line.ends_with(b"\n");
    }

    if needs_newline {
        out.write_all(b"\n")?;
    }
    if !last_blank {
        out.write_all(b"\n")?;
    }

    for header in HEADER_LINES {
        writeln!(out, "{}", header)?;
    }
    writeln!(out, "# Generated {}", stamp)?;
    writeln!(out)?;

    for domain in domains {
        writeln!(out, "{} {}", NULL_ADDRESS, domain)?;
    }

    Ok(())
}

/// Rewrite the hosts file at `hosts_path` with a fresh block list.
///
/// When `target` is the hosts file itself, the new content is written to a
/// temporary file next to it and renamed over it once fully written, so an
/// interrupted run leaves the original intact.
pub fn rewrite(hosts_path: &Path, target: &OutputTarget, domains: &[String]) -> Result<()> {
    let input = File::open(hosts_path)
        .with_context(|| format!("Failed to open hosts file: {:?}", hosts_path))?;
    let input = BufReader::new(input);
    let stamp = generated_stamp(&Local::now());

    match target {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_hosts(input, &mut out, domains, &stamp)
                .and_then(|_| out.flush())
                .context("Failed to write hosts file to stdout")?;
        }
        OutputTarget::Path(path) if same_file(hosts_path, path) => {
            replace_in_place(input, hosts_path, domains, &stamp)?;
        }
        OutputTarget::Path(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            let mut out = BufWriter::new(file);
            write_hosts(input, &mut out, domains, &stamp)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            let file = out
                .into_inner()
                .map_err(|e| e.into_error())
                .with_context(|| format!("Failed to flush output file: {:?}", path))?;
            file.sync_all()
                .with_context(|| format!("Failed to close output file: {:?}", path))?;
        }
    }

    Ok(())
}

fn replace_in_place<R: BufRead>(
    input: R,
    hosts_path: &Path,
    domains: &[String],
    stamp: &str,
) -> Result<()> {
    let dir = match hosts_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let permissions = std::fs::metadata(hosts_path)
        .with_context(|| format!("Failed to stat hosts file: {:?}", hosts_path))?
        .permissions();

    // Removed on drop unless persisted
    let mut temp = Builder::new()
        .prefix(".dnshole_tmp_hosts")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
    debug!("Writing temporary hosts file {:?}", temp.path());

    {
        let mut out = BufWriter::new(temp.as_file_mut());
        write_hosts(input, &mut out, domains, stamp)
            .and_then(|_| out.flush())
            .context("Failed to write temporary hosts file")?;
    }
    temp.as_file()
        .sync_all()
        .context("Failed to sync temporary hosts file")?;
    std::fs::set_permissions(temp.path(), permissions)
        .context("Failed to set temporary hosts file permissions")?;

    temp.persist(hosts_path)
        .with_context(|| format!("Failed to replace hosts file: {:?}", hosts_path))?;

    Ok(())
}
