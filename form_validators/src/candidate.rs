// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::mime;

/// A file offered to a validator: its name, declared MIME type, size and a
/// way to read its content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateFile {
    name: String,
    mime_type: String,
    size: u64,
    content: FileContent,
}

/// Where the bytes of a [`CandidateFile`] come from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FileContent {
    /// Content already held in memory.
    InMemory(Vec<u8>),

    /// Content read lazily from disk.
    OnDisk(PathBuf),
}

impl CandidateFile {
    /// Describe an in-memory file. The size is the length of `bytes`.
    pub fn from_bytes<N, M>(name: N, mime_type: M, bytes: Vec<u8>) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            content: FileContent::InMemory(bytes),
        }
    }

    /// Describe a file on disk, guessing its MIME type from the extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            mime_type: mime::guess_from_path(path).unwrap_or_default().to_owned(),
            name,
            size: metadata.len(),
            content: FileContent::OnDisk(path.to_path_buf()),
        })
    }

    /// Override the declared MIME type.
    pub fn with_mime_type<M: Into<String>>(mut self, mime_type: M) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Override the reported size without touching the content.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// File name, without any directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type; empty when unknown.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Content source.
    pub fn content(&self) -> &FileContent {
        &self.content
    }

    /// Read the raw content.
    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.content {
            FileContent::InMemory(bytes) => Ok(bytes.clone()),
            FileContent::OnDisk(path) => fs::read(path),
        }
    }

    /// Read the content as UTF-8 text.
    pub fn read_text(&self) -> io::Result<String> {
        String::from_utf8(self.read_bytes()?)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
    }
}
