//! `multipart/form-data` encoding.

use rand::RngExt;

use crate::forms::FormPart;

/// Encoded multipart body.
pub(crate) struct MultipartBody {
    pub(crate) boundary: String,
    pub(crate) body: Vec<u8>,
}

impl MultipartBody {
    /// Value for the `Content-Type` header.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// Encode form parts with a random boundary.
pub(crate) fn encode(parts: &[FormPart<'_>]) -> MultipartBody {
    let boundary = format!("----FolioFormBoundary{:016x}", rand::rng().random::<u64>());
    encode_with_boundary(parts, boundary)
}

fn encode_with_boundary(parts: &[FormPart<'_>], boundary: String) -> MultipartBody {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File(name, upload) => {
                let filename = upload.filename.replace('"', "");
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(
                    format!("Content-Type: {}\r\n\r\n", upload.content_type).as_bytes(),
                );
                body.extend_from_slice(&upload.data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    MultipartBody { boundary, body }
}
