//! Multipart form reading for the upload endpoints.

use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use thiserror::Error;

use crate::middleware::error::AppError;

/// A file field buffered out of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub data: Vec<u8>,
}

/// Text and file fields of one multipart form submission.
///
/// File fields are size-checked while the stream is read: an over-limit
/// upload is rejected before any byte reaches the media store.
#[derive(Debug, Default)]
pub struct UploadForm {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("uploaded file exceeds the {limit}-byte limit")]
    FileTooLarge { limit: usize },

    #[error("malformed multipart payload: {0}")]
    Malformed(String),
}

impl UploadError {
    /// Convert into a response error, using the endpoint's own wording for
    /// the size limit.
    pub fn into_app_error(self, too_large_message: &str) -> AppError {
        match self {
            UploadError::FileTooLarge { .. } => AppError::Validation(too_large_message.to_owned()),
            UploadError::Malformed(msg) => AppError::Validation(msg),
        }
    }
}

impl UploadForm {
    /// Drain a multipart stream into memory, capping each file field at
    /// `max_file_bytes`.
    pub async fn read(mut payload: Multipart, max_file_bytes: usize) -> Result<Self, UploadError> {
        let mut form = UploadForm::default();

        while let Some(mut field) = payload
            .try_next()
            .await
            .map_err(|e| UploadError::Malformed(e.to_string()))?
        {
            let name = field.name().to_owned();
            // Browsers send an empty filename for a file input left blank.
            let filename = field
                .content_disposition()
                .get_filename()
                .filter(|f| !f.is_empty())
                .map(ToOwned::to_owned);

            let mut data = Vec::new();
            while let Some(chunk) = field
                .try_next()
                .await
                .map_err(|e| UploadError::Malformed(e.to_string()))?
            {
                if filename.is_some() && data.len() + chunk.len() > max_file_bytes {
                    return Err(UploadError::FileTooLarge {
                        limit: max_file_bytes,
                    });
                }
                data.extend_from_slice(&chunk);
            }

            match filename {
                Some(original_name) => {
                    form.files.insert(name, UploadedFile { original_name, data });
                }
                None => {
                    let value = String::from_utf8(data)
                        .map_err(|_| UploadError::Malformed("text field is not UTF-8".to_owned()))?;
                    form.texts.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Non-empty text field, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Take ownership of a file field.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
