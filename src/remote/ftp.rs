use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use super::error::RemoteError;
use super::format::FileFormat;
use super::markers::MarkerSet;
use super::process::{run_with_timeout, spawn_piped, stream_with_timeout, CommandOutput};
use super::{is_script_safe, RemoteLocation, RemoteStore};
use crate::dataset::RemoteFile;

/// Docker image bundling ProteoWizard `msconvert` with vendor readers.
pub const DEFAULT_CONVERTER_IMAGE: &str = "chambm/pwiz-skyline-i-agree-to-the-vendor-licenses";

/// Tool locations and time budgets for [`FtpToolchain`].
#[derive(Debug, Clone)]
pub struct FtpSettings {
    /// `lftp` binary used for recursive listing and directory mirroring
    pub lftp: String,
    /// `curl` binary used for streaming and downloads
    pub curl: String,
    /// `docker` binary used to run the converter
    pub docker: String,
    /// Converter image
    pub converter_image: String,
    /// Budget for one recursive listing
    pub listing_timeout: Duration,
    /// Budget for streaming one file through the marker counter
    pub count_timeout: Duration,
    /// Budget for downloading one vendor file
    pub download_timeout: Duration,
    /// Budget for converting one vendor file
    pub convert_timeout: Duration,
    /// Budget for each converter availability check
    pub probe_timeout: Duration,
}

impl Default for FtpSettings {
    fn default() -> Self {
        Self {
            lftp: "lftp".to_string(),
            curl: "curl".to_string(),
            docker: "docker".to_string(),
            converter_image: DEFAULT_CONVERTER_IMAGE.to_string(),
            listing_timeout: Duration::from_secs(600),
            count_timeout: Duration::from_secs(3600),
            download_timeout: Duration::from_secs(7200),
            convert_timeout: Duration::from_secs(7200),
            probe_timeout: Duration::from_secs(15),
        }
    }
}

/// [`RemoteStore`] backed by `lftp`, `curl` and dockerised `msconvert`.
#[derive(Debug, Clone, Default)]
pub struct FtpToolchain {
    settings: FtpSettings,
}

impl FtpToolchain {
    /// Create a toolchain with the given settings.
    pub fn new(settings: FtpSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    pub fn settings(&self) -> &FtpSettings {
        &self.settings
    }

    fn lftp_script(&self, location: &RemoteLocation, script: String) -> Command {
        let mut cmd = Command::new(&self.settings.lftp);
        cmd.arg("-e")
            .arg(format!("set ftp:ssl-allow no; {}; bye", script))
            .arg(&location.server);
        cmd
    }

    fn download(
        &self,
        location: &RemoteLocation,
        file: &RemoteFile,
        dest: &Path,
    ) -> Result<(), RemoteError> {
        let operation = format!("download of {}", file.filename);
        let (tool, output) = if file.format() == Some(FileFormat::BrukerD) {
            // .d acquisitions are directories; curl cannot fetch them
            let dest = dest.to_string_lossy();
            for path in [file.path.as_str(), &*dest] {
                if !is_script_safe(path) {
                    return Err(RemoteError::UnsafePath(path.to_string()));
                }
            }
            let script = format!("mirror \"{}\" \"{}\"", file.path, dest);
            let output = run_with_timeout(
                &mut self.lftp_script(location, script),
                self.settings.download_timeout,
                &operation,
            )?;
            (&self.settings.lftp, output)
        } else {
            let mut cmd = Command::new(&self.settings.curl);
            cmd.args(["--ftp-pasv", "-s", "--create-dirs", "-o"])
                .arg(dest)
                .arg(location.url_for(&file.path));
            let output = run_with_timeout(&mut cmd, self.settings.download_timeout, &operation)?;
            (&self.settings.curl, output)
        };
        check_status(tool, output).map(|_| ())
    }

    fn docker_ok(&self, args: &[&str]) -> bool {
        let mut cmd = Command::new(&self.settings.docker);
        cmd.args(args);
        match run_with_timeout(&mut cmd, self.settings.probe_timeout, "docker probe") {
            Ok(output) if output.status.success() => true,
            Ok(output) => {
                warn!(
                    "docker {} failed: {}",
                    args.join(" "),
                    output.stderr.trim()
                );
                false
            }
            Err(err) => {
                warn!("docker {} unavailable: {}", args.join(" "), err);
                false
            }
        }
    }
}

impl RemoteStore for FtpToolchain {
    fn list_remote_files(&self, location: &RemoteLocation) -> Result<Vec<RemoteFile>, RemoteError> {
        info!("Recursively searching for mass spec files in {}", location);
        let script = format!("find \"{}\"", location.base_path);
        let output = run_with_timeout(
            &mut self.lftp_script(location, script),
            self.settings.listing_timeout,
            &format!("listing of {}", location),
        )?;

        if !output.status.success() && output.stderr.contains("command not found") {
            return Err(RemoteError::ToolMissing(self.settings.lftp.clone()));
        }
        let output = check_status(&self.settings.lftp, output)?;

        let files = parse_listing(&output.stdout);
        if files.is_empty() {
            warn!("No spectral files found under {}", location);
        } else {
            info!("Found {} spectral files under {}", files.len(), location);
        }
        Ok(files)
    }

    fn count_markers_in_stream(
        &self,
        location: &RemoteLocation,
        file: &RemoteFile,
        markers: &MarkerSet,
    ) -> Result<u64, RemoteError> {
        info!("Counting MS2 (FTP stream): {} ({})", file.filename, file.extension);
        let started = Instant::now();

        let mut cmd = Command::new(&self.settings.curl);
        cmd.args(["--ftp-pasv", "-s"]).arg(location.url_for(&file.path));
        let child = spawn_piped(&mut cmd)?;

        let markers = markers.clone();
        let (count, status, stderr) = stream_with_timeout(
            child,
            self.settings.count_timeout,
            &format!("streaming count of {}", file.filename),
            move |reader| markers.count(reader),
        )?;

        if !status.success() {
            return Err(RemoteError::CommandFailed {
                command: self.settings.curl.clone(),
                code: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        info!(
            "Found {} MS2 spectra in {} (streamed in {:.2}s)",
            count,
            file.filename,
            started.elapsed().as_secs_f64()
        );
        Ok(count)
    }

    fn convert_to_interchange_format(
        &self,
        location: &RemoteLocation,
        file: &RemoteFile,
        workdir: &Path,
    ) -> Result<PathBuf, RemoteError> {
        info!("Converting vendor file via docker: {}", file.filename);

        let local = workdir.join(&file.filename);
        self.download(location, file, &local)?;

        let stem = Path::new(&file.filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.filename.clone());
        let converted_name = format!("{}.mzML", stem);

        let mut cmd = Command::new(&self.settings.docker);
        cmd.args(["run", "--rm", "-v"])
            .arg(format!("{}:/data", workdir.to_string_lossy()))
            .arg(&self.settings.converter_image)
            .args(["wine", "msconvert.exe"])
            .arg(format!("/data/{}", file.filename))
            .arg("--mzML")
            .arg("--outfile")
            .arg(format!("/data/{}", converted_name))
            .args(["-o", "/data", "--filter", "msLevel 2-"]);
        let output = run_with_timeout(
            &mut cmd,
            self.settings.convert_timeout,
            &format!("conversion of {}", file.filename),
        )?;
        check_status(&self.settings.docker, output)?;

        let converted = workdir.join(&converted_name);
        if !converted.exists() {
            return Err(RemoteError::MissingOutput(converted_name));
        }
        debug!("Converted {} -> {}", file.filename, converted.display());
        Ok(converted)
    }

    fn probe_converter(&self) -> bool {
        info!("Checking docker availability...");
        let available = self.docker_ok(&["--version"]) && self.docker_ok(&["ps", "-q"]);
        if available {
            info!("Docker appears available and running");
        }
        available
    }
}

/// Parse `lftp find` output into descriptors of known spectral formats.
pub fn parse_listing(stdout: &str) -> Vec<RemoteFile> {
    stdout
        .lines()
        .filter_map(RemoteFile::from_path)
        .filter(|file| file.format().is_some())
        .collect()
}

fn check_status(command: &str, output: CommandOutput) -> Result<CommandOutput, RemoteError> {
    if output.status.success() {
        Ok(output)
    } else {
        Err(RemoteError::CommandFailed {
            command: command.to_string(),
            code: output.status.code(),
            stderr: output.stderr.trim().to_string(),
        })
    }
}
