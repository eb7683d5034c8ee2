//! File type classification by extension.

use serde::{Deserialize, Serialize};

/// File type of a document, derived from the original file name's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Doc,
    Docx,
    Xls,
    Xlsx,
    Ppt,
    Pptx,
    Txt,
    Csv,
    Jpg,
    Jpeg,
    Png,
    Gif,
    /// AutoCAD drawing.
    Dwg,
    /// Drawing exchange format.
    Dxf,
    Zip,
    /// Any extension not listed above.
    Other,
}

impl FileType {
    /// Every variant, in declaration order.
    pub const ALL: [FileType; 17] = [
        Self::Pdf,
        Self::Doc,
        Self::Docx,
        Self::Xls,
        Self::Xlsx,
        Self::Ppt,
        Self::Pptx,
        Self::Txt,
        Self::Csv,
        Self::Jpg,
        Self::Jpeg,
        Self::Png,
        Self::Gif,
        Self::Dwg,
        Self::Dxf,
        Self::Zip,
        Self::Other,
    ];

    /// Classify a file name by its extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Self {
        name.rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .and_then(|(_, ext)| ext.parse().ok())
            .unwrap_or(Self::Other)
    }

    /// Return the type as a string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
            Self::Ppt => "ppt",
            Self::Pptx => "pptx",
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Dwg => "dwg",
            Self::Dxf => "dxf",
            Self::Zip => "zip",
            Self::Other => "other",
        }
    }

    /// MIME type used when the upload did not declare one.
    pub fn default_mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Xls => "application/vnd.ms-excel",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Ppt => "application/vnd.ms-powerpoint",
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Self::Txt => "text/plain",
            Self::Csv => "text/csv",
            Self::Jpg | Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Dwg => "image/vnd.dwg",
            Self::Dxf => "image/vnd.dxf",
            Self::Zip => "application/zip",
            Self::Other => "application/octet-stream",
        }
    }

    /// Whether the type is a raster image.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Jpg | Self::Jpeg | Self::Png | Self::Gif)
    }

    /// Whether the browser can preview this type inline.
    pub fn is_previewable(&self) -> bool {
        self.is_image() || matches!(self, Self::Pdf | Self::Txt | Self::Csv)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| format!("Unknown file type '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name() {
        assert_eq!(FileType::from_file_name("site-plan.DWG"), FileType::Dwg);
        assert_eq!(FileType::from_file_name("contract.v2.pdf"), FileType::Pdf);
        assert_eq!(FileType::from_file_name("notes"), FileType::Other);
        assert_eq!(FileType::from_file_name(".bashrc"), FileType::Other);
        assert_eq!(FileType::from_file_name("archive.rar"), FileType::Other);
    }

    #[test]
    fn test_preview_capabilities() {
        assert!(FileType::Png.is_image());
        assert!(FileType::Pdf.is_previewable());
        assert!(!FileType::Pdf.is_image());
        assert!(!FileType::Dwg.is_previewable());
    }

    #[test]
    fn test_round_trip_str() {
        for t in FileType::ALL {
            assert_eq!(t.as_str().parse::<FileType>(), Ok(t));
        }
    }
}
