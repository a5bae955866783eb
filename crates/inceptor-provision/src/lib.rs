/*!
Makes sure a classifier graph and its label table are on local storage.

Models are published as a zip archive holding the frozen graph and the label
file side by side. [`ModelStore::ensure`] only touches the network when one of
the two files is missing and the archive hasn't been downloaded yet.

```no_run
use inceptor_provision::{ModelSource, ModelStore};

let store = ModelStore::new("/data/models");
let files = store.ensure(&ModelSource::default())?;
println!("graph at {:?}, labels at {:?}", files.graph, files.labels);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

#![warn(rust_2018_idioms)]

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Where the reference Inception graph is published.
pub const INCEPTION5H_URL: &str =
    "https://storage.googleapis.com/download.tensorflow.org/models/inception5h.zip";

/// Errors that can be returned while provisioning a model.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to unpack {path:?}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("expected {path:?} to exist after provisioning")]
    MissingFile { path: PathBuf },
}

type Result<T, E = ProvisionError> = std::result::Result<T, E>;

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ProvisionError + '_ {
    move |source| ProvisionError::Io {
        path: path.to_owned(),
        source,
    }
}

/// Describes a published model archive and the files it must provide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSource {
    /// Remote location of the zip archive.
    pub url: String,

    /// File name the archive is stored under locally.
    pub archive_name: String,

    /// The serialized graph inside the archive.
    pub graph_file: String,

    /// The newline-delimited label table inside the archive.
    pub labels_file: String,
}

impl Default for ModelSource {
    fn default() -> Self {
        Self {
            url: INCEPTION5H_URL.to_owned(),
            archive_name: "inception5h.zip".to_owned(),
            graph_file: "tensorflow_inception_graph.pb".to_owned(),
            labels_file: "imagenet_comp_graph_label_strings.txt".to_owned(),
        }
    }
}

/// Local paths of a provisioned model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelFiles {
    pub graph: PathBuf,
    pub labels: PathBuf,
}

impl ModelFiles {
    fn missing(&self) -> Option<&Path> {
        [&self.graph, &self.labels]
            .into_iter()
            .find(|path| !path.is_file())
            .map(PathBuf::as_path)
    }
}

/// A directory holding provisioned models.
#[derive(Clone, Debug)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the files of `source` live in this store, present or not.
    pub fn files(&self, source: &ModelSource) -> ModelFiles {
        ModelFiles {
            graph: self.dir.join(&source.graph_file),
            labels: self.dir.join(&source.labels_file),
        }
    }

    /// Check that both files of `source` are present, never fetching.
    ///
    /// # Errors
    ///
    /// [`ProvisionError::MissingFile`] naming the first absent file.
    pub fn ensure_offline(&self, source: &ModelSource) -> Result<ModelFiles> {
        let files = self.files(source);
        match files.missing() {
            Some(path) => Err(ProvisionError::MissingFile {
                path: path.to_owned(),
            }),
            None => Ok(files),
        }
    }

    /// Make sure both files of `source` are present, downloading and
    /// unpacking the archive if needed.
    ///
    /// An archive that already exists in the store is reused rather than
    /// fetched again.
    pub fn ensure(&self, source: &ModelSource) -> Result<ModelFiles> {
        let files = self.files(source);
        if files.missing().is_none() {
            log::debug!("model already present in {:?}", self.dir);
            return Ok(files);
        }

        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let archive = self.dir.join(&source.archive_name);
        if !archive.is_file() {
            download(&source.url, &archive)?;
        }

        let extracted = extract(&archive, &self.dir)?;
        log::info!("unpacked {} entries into {:?}", extracted.len(), self.dir);

        self.ensure_offline(source)
    }
}

/// Fetch `url` into `path`.
///
/// The body is streamed to a sibling `.part` file which is renamed into place
/// once complete, so an interrupted download never leaves a truncated `path`.
pub fn download(url: &str, path: &Path) -> Result<()> {
    log::info!("downloading {} to {:?}", url, path);

    let download_error = |source| ProvisionError::Download {
        url: url.to_owned(),
        source,
    };

    let mut response = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .map_err(download_error)?;

    let partial = path.with_extension("part");
    let mut file = File::create(&partial).map_err(io_error(&partial))?;
    let written = response.copy_to(&mut file).map_err(download_error)?;
    drop(file);

    fs::rename(&partial, path).map_err(io_error(path))?;
    log::debug!("downloaded {} bytes", written);

    Ok(())
}

/// Unpack the zip `archive` into `dest`, returning the paths written.
///
/// Entries whose names would escape `dest` are skipped.
pub fn extract(archive: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let archive_error = |source| ProvisionError::Archive {
        path: archive.to_owned(),
        source,
    };

    let file = File::open(archive).map_err(io_error(archive))?;
    let mut zip = zip::ZipArchive::new(file).map_err(archive_error)?;

    let mut extracted = Vec::with_capacity(zip.len());
    for idx in 0..zip.len() {
        let mut entry = zip.by_index(idx).map_err(archive_error)?;

        let relative = match entry.enclosed_name().map(|name| name.to_owned()) {
            Some(relative) => relative,
            None => {
                log::warn!("skipping unsafe archive entry {:?}", entry.name());
                continue;
            }
        };

        let target = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }

        let mut out = File::create(&target).map_err(io_error(&target))?;
        io::copy(&mut entry, &mut out).map_err(io_error(&target))?;
        extracted.push(target);
    }

    Ok(extracted)
}
