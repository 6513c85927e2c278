use std::fmt;

use super::markers::{MarkerSet, Segmentation};

/// Spectral file formats the pipeline knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// HUPO-PSI mzML
    MzMl,
    /// mzXML
    MzXml,
    /// Mascot generic format
    Mgf,
    /// ANDI-MS NetCDF
    Cdf,
    /// Thermo RAW
    ThermoRaw,
    /// Sciex WIFF
    Wiff,
    /// Bruker `.d` acquisition directory
    BrukerD,
}

impl FileFormat {
    /// Every known format.
    pub const ALL: [FileFormat; 7] = [
        FileFormat::MzMl,
        FileFormat::MzXml,
        FileFormat::Mgf,
        FileFormat::Cdf,
        FileFormat::ThermoRaw,
        FileFormat::Wiff,
        FileFormat::BrukerD,
    ];

    /// Look up a format from an extension, with or without the leading dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "mzml" => Some(FileFormat::MzMl),
            "mzxml" => Some(FileFormat::MzXml),
            "mgf" => Some(FileFormat::Mgf),
            "cdf" => Some(FileFormat::Cdf),
            "raw" => Some(FileFormat::ThermoRaw),
            "wiff" => Some(FileFormat::Wiff),
            "d" => Some(FileFormat::BrukerD),
            _ => None,
        }
    }

    /// Canonical lowercase extension including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::MzMl => ".mzml",
            FileFormat::MzXml => ".mzxml",
            FileFormat::Mgf => ".mgf",
            FileFormat::Cdf => ".cdf",
            FileFormat::ThermoRaw => ".raw",
            FileFormat::Wiff => ".wiff",
            FileFormat::BrukerD => ".d",
        }
    }

    /// Vendor formats must be converted to mzML before counting.
    pub fn requires_conversion(self) -> bool {
        matches!(
            self,
            FileFormat::ThermoRaw | FileFormat::Wiff | FileFormat::BrukerD
        )
    }

    /// Markers whose occurrences count MS2 spectra in a streamed file.
    /// `None` for formats that must be converted first.
    pub fn ms2_markers(self) -> Option<MarkerSet> {
        match self {
            FileFormat::MzMl => Some(MarkerSet::mzml()),
            FileFormat::MzXml => Some(MarkerSet::new(
                &["msLevel=\"2\""],
                Segmentation::Lines,
            )),
            FileFormat::Mgf => Some(MarkerSet::new(&["BEGIN IONS"], Segmentation::Lines)),
            // NetCDF is binary; markers are searched in printable runs
            FileFormat::Cdf => Some(MarkerSet::new(
                &["scan_type=MSMS", "msLevel=2"],
                Segmentation::PrintableRuns,
            )),
            FileFormat::ThermoRaw | FileFormat::Wiff | FileFormat::BrukerD => None,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
