//! `fs` namespace: path-based filesystem operations on the host.

use serde::{Deserialize, Serialize};

use crate::bridge::{BridgeRequestor, make_bridge_requestor};
use crate::traits::{Action, Transport};
use crate::{Namespace, Result};

/// Separates an archive path from the entry inside it, e.g. `book.cbz>001.jpg`.
pub const CONTAINER_SEP: &str = ">";

/// Actions accepted by `/api/bridges/fs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsAction {
    Stats,
    ReadDir,
    CreateDir,
    Rename,
    Remove,
    CopyFile,
    ReadTextFile,
    WriteTextFile,
    DownloadFile,
    ReadArchive,
}

impl Action for FsAction {
    const NAMESPACE: Namespace = Namespace::Fs;
    const ALL: &'static [Self] = &[
        FsAction::Stats,
        FsAction::ReadDir,
        FsAction::CreateDir,
        FsAction::Rename,
        FsAction::Remove,
        FsAction::CopyFile,
        FsAction::ReadTextFile,
        FsAction::WriteTextFile,
        FsAction::DownloadFile,
        FsAction::ReadArchive,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            FsAction::Stats => "stats",
            FsAction::ReadDir => "read-dir",
            FsAction::CreateDir => "create-dir",
            FsAction::Rename => "rename",
            FsAction::Remove => "remove",
            FsAction::CopyFile => "copy-file",
            FsAction::ReadTextFile => "read-text-file",
            FsAction::WriteTextFile => "write-text-file",
            FsAction::DownloadFile => "download-file",
            FsAction::ReadArchive => "read-archive",
        }
    }
}

/// Metadata of a host path. `modified_time` is in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub size: u64,
    pub is_dir: bool,
    pub is_file: bool,
    pub modified_time: u64,
}

#[derive(Debug, Serialize)]
struct PathParams<'a> {
    path: &'a str,
}

#[derive(Debug, Serialize)]
struct RecursivePathParams<'a> {
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    recursive: Option<bool>,
}

#[derive(Debug, Serialize)]
struct SrcDstParams<'a> {
    src: &'a str,
    dst: &'a str,
}

#[derive(Debug, Serialize)]
struct WriteTextParams<'a> {
    path: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
struct DownloadParams<'a> {
    url: &'a str,
    path: &'a str,
}

#[derive(Debug, Serialize)]
struct ArchiveParams<'a> {
    path: &'a str,
    container: &'a str,
}

/// Client for the `fs` namespace.
#[derive(Debug, Clone)]
pub struct Client<T> {
    request: BridgeRequestor<T>,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            request: make_bridge_requestor(transport, FsAction::NAMESPACE),
        }
    }

    pub async fn stats(&self, path: &str) -> Result<Stats> {
        self.request
            .call(FsAction::Stats, PathParams { path })
            .await
    }

    /// Lists the entry names of a directory.
    pub async fn read_dir(&self, path: &str) -> Result<Vec<String>> {
        self.request
            .call(FsAction::ReadDir, PathParams { path })
            .await
    }

    /// Creates a directory; `recursive` also creates missing parents.
    pub async fn create_dir(&self, path: &str, recursive: Option<bool>) -> Result<()> {
        self.request
            .call(FsAction::CreateDir, RecursivePathParams { path, recursive })
            .await
    }

    pub async fn rename(&self, src: &str, dst: &str) -> Result<()> {
        self.request
            .call(FsAction::Rename, SrcDstParams { src, dst })
            .await
    }

    /// Removes a file, or a whole directory tree when `recursive` is set.
    pub async fn remove(&self, path: &str, recursive: Option<bool>) -> Result<()> {
        self.request
            .call(FsAction::Remove, RecursivePathParams { path, recursive })
            .await
    }

    pub async fn copy_file(&self, src: &str, dst: &str) -> Result<()> {
        self.request
            .call(FsAction::CopyFile, SrcDstParams { src, dst })
            .await
    }

    pub async fn read_text_file(&self, path: &str) -> Result<String> {
        self.request
            .call(FsAction::ReadTextFile, PathParams { path })
            .await
    }

    pub async fn write_text_file(&self, path: &str, data: &str) -> Result<()> {
        self.request
            .call(FsAction::WriteTextFile, WriteTextParams { path, data })
            .await
    }

    /// Has the host fetch `url` and store the body at `path`.
    pub async fn download_file(&self, url: &str, path: &str) -> Result<()> {
        self.request
            .call(FsAction::DownloadFile, DownloadParams { url, path })
            .await
    }

    /// Lists entry names inside an archive of kind `container` (e.g. `zip`).
    pub async fn read_archive(&self, path: &str, container: &str) -> Result<Vec<String>> {
        self.request
            .call(FsAction::ReadArchive, ArchiveParams { path, container })
            .await
    }
}

/// Builds the host path of an entry inside an archive.
pub fn container_entry_path(archive: &str, entry: &str) -> String {
    format!("{archive}{CONTAINER_SEP}{entry}")
}

/// Returns the text after the last `.` of a file name.
///
/// Empty when there is no dot, or when the only dot starts the name.
pub fn file_name_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i > 0 => &name[i + 1..],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::bridge::testing::RecordingTransport;
    use serde_json::json;

    #[tokio::test]
    async fn stats_decodes_camel_case() {
        let transport = RecordingTransport::answering(json!({
            "data": {"size": 12, "isDir": false, "isFile": true, "modifiedTime": 1700000000000u64}
        }));
        let client = Client::new(&transport);

        let stats = client.stats("/tmp/a.txt").await.unwrap();
        assert!(stats.is_file);
        assert_eq!(stats.modified_time, 1_700_000_000_000);

        let (path, body) = transport.last_call();
        assert_eq!(path, "/api/bridges/fs");
        assert_eq!(body, json!({"action": "stats", "data": {"path": "/tmp/a.txt"}}));
    }

    #[tokio::test]
    async fn create_dir_omits_unset_recursive() {
        let transport = RecordingTransport::answering(json!({"data": null}));
        let client = Client::new(&transport);

        client.create_dir("/tmp/x", None).await.unwrap();
        let (_, body) = transport.last_call();
        assert_eq!(body, json!({"action": "create-dir", "data": {"path": "/tmp/x"}}));
    }

    #[tokio::test]
    async fn remove_recursive() {
        let transport = RecordingTransport::answering(json!({"data": null}));
        let client = Client::new(&transport);

        client.remove("/tmp/x", Some(true)).await.unwrap();
        let (_, body) = transport.last_call();
        assert_eq!(
            body,
            json!({"action": "remove", "data": {"path": "/tmp/x", "recursive": true}})
        );
    }

    #[tokio::test]
    async fn write_text_file_envelope() {
        let transport = RecordingTransport::answering(json!({"data": null}));
        let client = Client::new(&transport);

        client.write_text_file("/tmp/n.txt", "hello").await.unwrap();
        let (_, body) = transport.last_call();
        assert_eq!(
            body,
            json!({"action": "write-text-file", "data": {"path": "/tmp/n.txt", "data": "hello"}})
        );
    }

    #[tokio::test]
    async fn read_archive_envelope() {
        let transport = RecordingTransport::answering(json!({"data": ["001.jpg", "002.jpg"]}));
        let client = Client::new(&transport);

        let entries = client.read_archive("/books/a.cbz", "cbz").await.unwrap();
        assert_eq!(entries, vec!["001.jpg", "002.jpg"]);

        let (_, body) = transport.last_call();
        assert_eq!(
            body,
            json!({"action": "read-archive", "data": {"path": "/books/a.cbz", "container": "cbz"}})
        );
    }

    #[tokio::test]
    async fn host_error_passes_through() {
        let transport = RecordingTransport::failing(Error::host("No such file or directory"));
        let client = Client::new(&transport);

        let err = client.read_text_file("/missing").await.unwrap_err();
        assert_eq!(err.to_string(), "No such file or directory");
    }

    #[test]
    fn action_names_round_trip() {
        for action in FsAction::ALL {
            assert_eq!(FsAction::parse(action.as_str()).unwrap(), *action);
        }
    }

    #[test]
    fn container_paths() {
        assert_eq!(container_entry_path("/b/a.zip", "x/y.png"), "/b/a.zip>x/y.png");
    }

    #[test]
    fn extensions() {
        assert_eq!(file_name_extension("a.png"), "png");
        assert_eq!(file_name_extension("a.tar.gz"), "gz");
        assert_eq!(file_name_extension("README"), "");
        assert_eq!(file_name_extension(".bashrc"), "");
        assert_eq!(file_name_extension("file."), "");
    }
}
