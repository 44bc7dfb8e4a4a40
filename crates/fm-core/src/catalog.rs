//! Shorthand groups: `gm`/`gms`, `test`/`tests`, `img`/`imgs`, `skp`/`skps`, `svg`/`svgs`.
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use fm_exec::ProcRunner;
use fm_model::Source;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::CatalogError;

pub const RAW_EXTS: &[&str] = &[
    "arw", "cr2", "dng", "nef", "nrw", "orf", "pef", "raf", "rw2", "srw",
];

/// Decodable image formats, excluding raw camera formats.
pub const IMG_EXTS: &[&str] = &[
    "astc", "bmp", "gif", "ico", "jpeg", "jpg", "ktx", "png", "wbmp", "webp",
];

pub const SKP_EXTS: &[&str] = &["skp"];
pub const SVG_EXTS: &[&str] = &["svg"];

/// Directories whose files become the `img`, `skp` and `svg` groups.
#[derive(Clone, Debug, Default)]
pub struct CatalogDirs {
    pub imgs: Option<PathBuf>,
    pub skps: Option<PathBuf>,
    pub svgs: Option<PathBuf>,
}

/// Read-only mapping from group name to sources, fixed after startup.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    groups: HashMap<String, Vec<Source>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` and its plural `name + "s"`.
    pub fn insert(&mut self, name: &str, sources: Vec<Source>) {
        self.groups.insert(format!("{name}s"), sources.clone());
        self.groups.insert(name.to_string(), sources);
    }

    pub fn get(&self, name: &str) -> Option<&[Source]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Sources of a group, empty when the group is unknown.
    pub fn group(&self, name: &str) -> &[Source] {
        self.get(name).unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Ask the runner for its gms and tests and walk the configured directories.
    pub async fn discover(runner: &ProcRunner, dirs: &CatalogDirs) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for (name, flag) in [("gm", "--listGMs"), ("test", "--listTests")] {
            let names = runner
                .query(flag)
                .await
                .map_err(|source| CatalogError::Query {
                    flag: flag.to_string(),
                    source,
                })?;
            catalog.insert(name, names.into_iter().map(Source::from).collect());
        }

        let img_exts: Vec<&str> = IMG_EXTS.iter().chain(RAW_EXTS).copied().collect();
        catalog.insert("img", walk(dirs.imgs.as_deref(), &img_exts)?);
        catalog.insert("skp", walk(dirs.skps.as_deref(), SKP_EXTS)?);
        catalog.insert("svg", walk(dirs.svgs.as_deref(), SVG_EXTS)?);

        info!(
            target: "fm.core.catalog",
            gms = catalog.group("gm").len(),
            tests = catalog.group("test").len(),
            imgs = catalog.group("img").len(),
            skps = catalog.group("skp").len(),
            svgs = catalog.group("svg").len(),
            "catalog ready"
        );
        Ok(catalog)
    }
}

/// Lowercased extension without the leading dot.
pub fn normalized_ext(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn is_raw(source: &Source) -> bool {
    normalized_ext(Path::new(source.as_str()))
        .is_some_and(|ext| RAW_EXTS.contains(&ext.as_str()))
}

/// Every regular file under `dir` with one of `exts`, in file-name order.
///
/// No directory configured means an empty group.
pub fn walk(dir: Option<&Path>, exts: &[&str]) -> Result<Vec<Source>, CatalogError> {
    let Some(dir) = dir else {
        return Ok(Vec::new());
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| CatalogError::Walk {
            dir: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if normalized_ext(entry.path()).is_some_and(|ext| exts.contains(&ext.as_str())) {
            files.push(Source::from(entry.path().display().to_string()));
        }
    }

    debug!(target: "fm.core.catalog", dir = %dir.display(), files = files.len(), "walked");
    Ok(files)
}
