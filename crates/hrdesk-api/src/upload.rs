// File attachments for multipart bodies.
//
// The backend only stores PDF, JPEG and PNG documents up to 5 MiB.
// Attachments are checked when constructed so an oversized or mistyped
// file never reaches the wire.

use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::Part;
use strum::{AsRefStr, Display, EnumString};

use crate::Error;

/// Largest accepted attachment, in bytes.
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Multipart field an attachment is sent under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum AttachmentField {
    ProfileImage,
    AadharImage,
    PanImage,
    PassportImage,
    DrivingLicenseImage,
    VoterIdImage,
    PassbookImage,
    InvoiceFile,
}

/// Accepted document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Pdf,
    Jpeg,
    Png,
}

impl ContentKind {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Resolve from an explicit MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Resolve from a file name's extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// A validated file ready to be attached to a multipart request.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub field: AttachmentField,
    pub file_name: String,
    pub kind: ContentKind,
    pub bytes: Bytes,
}

impl Attachment {
    /// Validate and wrap an in-memory file.
    ///
    /// `content_type` wins over the file extension when both are present.
    pub fn new(
        field: AttachmentField,
        file_name: impl Into<String>,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<Self, Error> {
        let file_name = file_name.into();
        let kind = content_type
            .and_then(ContentKind::from_mime)
            .or_else(|| ContentKind::from_file_name(&file_name))
            .ok_or_else(|| Error::Attachment {
                field: field.to_string(),
                reason: "only PDF, JPEG and PNG files are accepted".into(),
            })?;

        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(Error::Attachment {
                field: field.to_string(),
                reason: format!(
                    "file is {} bytes; the limit is 5 MB ({MAX_ATTACHMENT_BYTES} bytes)",
                    bytes.len()
                ),
            });
        }

        Ok(Self {
            field,
            file_name,
            kind,
            bytes,
        })
    }

    /// Read a file from disk and validate it.
    pub fn from_path(field: AttachmentField, path: &Path) -> Result<Self, Error> {
        let data = std::fs::read(path).map_err(|e| Error::Attachment {
            field: field.to_string(),
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_owned();
        Self::new(field, file_name, None, Bytes::from(data))
    }

    pub(crate) fn into_part(self) -> Result<Part, Error> {
        Part::bytes(self.bytes.to_vec())
            .file_name(self.file_name)
            .mime_str(self.kind.mime())
            .map_err(Error::Transport)
    }
}
